//! Solutions for Advent of Code 2020

pub mod day_01;
pub mod day_03;
pub mod day_05;
pub mod day_08;
pub mod day_13;
pub mod day_15;
pub mod day_23;
