//! Advent of Code puzzle solutions with automatic registration
//!
//! This crate contains the actual puzzle solutions organized by year.
//! Each solution is a self-contained module using the `DaySolver` and
//! `RegisterPuzzle` derive macros for automatic plugin registration with
//! the runner framework. Days deliberately share no solving machinery;
//! every puzzle carries its own state representation and traversal.

pub mod year_2020;
pub mod year_2021;
pub mod year_2022;
pub mod year_2024;
pub mod year_2025;
