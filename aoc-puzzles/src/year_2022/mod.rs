//! Solutions for Advent of Code 2022

pub mod day_20;
