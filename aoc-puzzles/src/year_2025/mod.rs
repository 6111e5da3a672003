//! Solutions for Advent of Code 2025

pub mod day_10;
