//! Solutions for Advent of Code 2021

pub mod day_19;
pub mod day_23;
pub mod day_24;
