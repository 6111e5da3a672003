//! Property-based tests for solver part bounds validation

use aoc_runner::{ParseError, PuzzleParser, PuzzleSolver, PuzzleSolverExt, SolveError};
use proptest::prelude::*;

/// Test solver with configurable PARTS
struct TestSolver<const N: u8>;

impl<const N: u8> PuzzleParser for TestSolver<N> {
    type Input<'a> = ();

    fn parse(_text: &str) -> Result<Self::Input<'_>, ParseError> {
        Ok(())
    }
}

impl<const N: u8> PuzzleSolver for TestSolver<N> {
    const PARTS: u8 = N;

    fn solve_part(_input: &mut Self::Input<'_>, part: u8) -> Result<String, SolveError> {
        Ok(format!("part{}", part))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// For any solver with PARTS = N, `solve_part_bounded(part)` with
    /// part = 0 or part > N returns `PartOutOfRange(part)`.
    #[test]
    fn out_of_range_parts_are_rejected(max_parts in 1u8..=3, part in 0u8..=255) {
        let mut input = ();

        let result = match max_parts {
            1 => TestSolver::<1>::solve_part_bounded(&mut input, part),
            2 => TestSolver::<2>::solve_part_bounded(&mut input, part),
            _ => TestSolver::<3>::solve_part_bounded(&mut input, part),
        };

        if part == 0 || part > max_parts {
            match result {
                Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
                other => prop_assert!(false, "Expected PartOutOfRange, got {:?}", other),
            }
        } else {
            prop_assert_eq!(result.unwrap(), format!("part{}", part));
        }
    }

    /// In-range parts always dispatch to `solve_part` unchanged.
    #[test]
    fn in_range_parts_dispatch(part in 1u8..=25) {
        let mut input = ();
        let result = TestSolver::<25>::solve_part_bounded(&mut input, part);
        prop_assert_eq!(result.unwrap(), format!("part{}", part));
    }
}
