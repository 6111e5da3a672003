//! Solutions for Advent of Code 2024

pub mod day_16;
pub mod day_21;
pub mod day_23;
