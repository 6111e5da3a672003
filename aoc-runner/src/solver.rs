//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Trait for parsing puzzle input into the solver's working data
///
/// This trait defines the data type and parsing logic for a solver,
/// providing clean separation between parsing and solving concerns.
///
/// # Example
///
/// ```
/// use aoc_runner::{ParseError, PuzzleParser};
///
/// struct Day1;
///
/// impl PuzzleParser for Day1 {
///     type Input<'a> = Vec<i32>;
///
///     fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
///         text.lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
/// ```
pub trait PuzzleParser {
    /// The working data structure holding parsed input and intermediate results.
    ///
    /// Use any ownership strategy:
    /// - `Vec<T>` or custom structs for owned data (simplest, supports mutation)
    /// - `&'a str` for zero-copy borrowed data when no transformation is needed
    type Input<'a>;

    /// Parse the raw input text into the working data structure.
    fn parse<'a>(text: &'a str) -> Result<Self::Input<'a>, ParseError>;
}

/// Trait for solving a specific part of a puzzle.
///
/// The const generic `N` is the part number (1, 2, etc.), so a missing part
/// impl is a compile-time error rather than a runtime surprise.
///
/// # Example
///
/// ```
/// use aoc_runner::{ParseError, PartSolver, PuzzleParser, SolveError};
///
/// struct Day1;
///
/// impl PuzzleParser for Day1 {
///     type Input<'a> = Vec<i32>;
///
///     fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
///         text.lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Day1 {
///     fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
///         Ok(input.iter().sum::<i32>().to_string())
///     }
/// }
/// ```
pub trait PartSolver<const N: u8>: PuzzleParser {
    /// Solve this part of the puzzle.
    ///
    /// Takes mutable working data so later parts can reuse intermediate
    /// results computed by earlier ones.
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError>;
}

/// Core trait that every registered puzzle solver implements.
///
/// Extends [`PuzzleParser`] to inherit the `Input` type and `parse()`.
/// Normally generated by `#[derive(DaySolver)]` from the [`PartSolver`]
/// impls, but can be written by hand:
///
/// ```
/// use aoc_runner::{ParseError, PuzzleParser, PuzzleSolver, SolveError};
///
/// struct Day1;
///
/// impl PuzzleParser for Day1 {
///     type Input<'a> = Vec<i32>;
///
///     fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
///         text.lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
///
/// impl PuzzleSolver for Day1 {
///     const PARTS: u8 = 2;
///
///     fn solve_part(input: &mut Self::Input<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(input.iter().sum::<i32>().to_string()),
///             2 => Ok(input.iter().product::<i32>().to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
/// ```
pub trait PuzzleSolver: PuzzleParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the puzzle
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - The part is not implemented
    /// * `Err(SolveError::SolveFailed)` - An error occurred while solving
    fn solve_part(input: &mut Self::Input<'_>, part: u8) -> Result<String, SolveError>;
}

pub trait PuzzleSolverExt: PuzzleSolver {
    /// Like [`PuzzleSolver::solve_part`], but rejects part numbers outside
    /// `1..=PARTS` with [`SolveError::PartOutOfRange`].
    fn solve_part_bounded(input: &mut Self::Input<'_>, part: u8) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(input, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: PuzzleSolver + ?Sized> PuzzleSolverExt for T {}
