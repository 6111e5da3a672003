//! Advent of Code runner library
//!
//! A type-safe harness for solving Advent of Code puzzles across multiple
//! years and days. Each puzzle is a solver with custom input parsing that
//! produces string answers for one or more parts; answers are checked
//! against recorded expected values.
//!
//! # Overview
//!
//! This library provides:
//! - Trait-based solver definitions with compile-time part validation
//! - Type-safe parsing separated from solving
//! - A registry keyed by year/day with inventory-based plugin registration
//! - Timed solver instances behind an object-safe interface
//! - Expected-answer parsing and pass/fail outcome classification
//!
//! # Quick Example
//!
//! ```
//! use aoc_runner::{ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};
//! use aoc_runner::{RegistryBuilder, RegisterableSolver};
//!
//! struct Day1;
//!
//! impl PuzzleParser for Day1 {
//!     type Input<'a> = Vec<i64>;
//!
//!     fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
//!         text.lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PuzzleSolver for Day1 {
//!     const PARTS: u8 = 1;
//!
//!     fn solve_part(input: &mut Self::Input<'_>, part: u8) -> Result<String, SolveError> {
//!         match part {
//!             1 => Ok(input.iter().sum::<i64>().to_string()),
//!             _ => Err(SolveError::PartNotImplemented(part)),
//!         }
//!     }
//! }
//!
//! let registry = Day1
//!     .register_with(RegistryBuilder::new(), 2020, 1)
//!     .unwrap()
//!     .build();
//! let mut solver = registry.create(2020, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! ```
//!
//! # Key Concepts
//!
//! ## Solver Traits
//!
//! [`PuzzleParser`] defines the working data (`Input<'a>`, a GAT so parsed
//! data may borrow from the raw text) and how to build it. [`PartSolver<N>`]
//! is implemented once per part; `#[derive(DaySolver)]` assembles those into
//! the [`PuzzleSolver`] impl the registry needs.
//!
//! ## Registration
//!
//! `#[derive(RegisterPuzzle)]` with `#[puzzle(year = ..., day = ...,
//! tags = [...])]` submits a [`PuzzlePlugin`] through `inventory`;
//! [`RegistryBuilder::register_all_plugins`] collects every plugin linked
//! into the binary, optionally filtered by tag.
//!
//! ## Answer checking
//!
//! [`ExpectedAnswers`] parses the `partN: answer` lines of an
//! expected-answer file; [`Outcome::classify`] grades a computed answer as
//! success, failure, unknown (no recorded answer), or TODO (placeholder).

mod error;
mod instance;
mod outcome;
mod registry;
mod solver;

// Re-export public API
pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynPuzzle, PuzzleInstance, SolveResult};
pub use outcome::{ExpectedAnswers, Outcome};
pub use registry::{
    BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS, PuzzleFactory, PuzzleInfo, PuzzlePlugin,
    PuzzleRegistry, PuzzleStorage, RegisterableSolver, RegistryBuilder,
};
pub use solver::{PartSolver, PuzzleParser, PuzzleSolver, PuzzleSolverExt};

// Re-export inventory for use by the derive macros
pub use inventory;

// Re-export the derive macros
pub use aoc_runner_macros::{DaySolver, RegisterPuzzle};
