//! Shuttle search: bus schedules and the Chinese Remainder Theorem.
//!
//! The first input line is an arrival timestamp, the second a comma list of
//! bus periods with "x" for out-of-service slots. Part 1 finds the first bus
//! after the timestamp (answer: period times wait). Part 2 ignores the
//! timestamp and finds the earliest time where each bus departs at its list
//! offset, i.e. the Chinese Remainder of the offset congruences, computed
//! with Bezout coefficients from the extended Euclidean algorithm.

use anyhow::anyhow;
use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2020, day = 13, tags = ["2020", "number-theory"])]
pub struct Solver;

#[derive(Debug)]
pub struct Schedule {
    depart: i64,
    /// (offset in the list, period), "x" entries dropped
    buses: Vec<(i64, i64)>,
}

impl PuzzleParser for Solver {
    type Input<'a> = Schedule;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        let mut lines = text.lines();
        (|| -> Result<Schedule, anyhow::Error> {
            let depart = lines
                .next()
                .ok_or_else(|| anyhow!("missing timestamp line"))?
                .trim()
                .parse()?;
            let buses = lines
                .next()
                .ok_or_else(|| anyhow!("missing schedule line"))?
                .trim()
                .split(',')
                .enumerate()
                .filter(|(_, id)| *id != "x")
                .map(|(offset, id)| Ok((offset as i64, id.parse::<i64>()?)))
                .collect::<Result<_, anyhow::Error>>()?;
            Ok(Schedule { depart, buses })
        })()
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        input
            .buses
            .iter()
            .map(|&(_, period)| (period, period - input.depart % period))
            .min_by_key(|&(_, wait)| wait)
            .map(|(period, wait)| (period * wait).to_string())
            .ok_or_else(|| SolveError::SolveFailed("no buses in service".into()))
    }
}

/// Bezout coefficients (s, t) with s*x + t*y = gcd(x, y), by the extended
/// Euclidean algorithm.
fn bezout_coefficients(x: i128, y: i128) -> (i128, i128) {
    let (mut r0, mut r1) = (x, y);
    let (mut s0, mut s1) = (1i128, 0i128);
    let (mut t0, mut t1) = (0i128, 1i128);
    loop {
        let q = r0 / r1;
        let r = r0 % r1;
        let s = s0 - q * s1;
        let t = t0 - q * t1;
        if r == 0 {
            return (s1, t1);
        }
        (r0, r1) = (r1, r);
        (s0, s1) = (s1, s);
        (t0, t1) = (t1, t);
    }
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        // remainder each bus's departure time must have mod its period
        let pairs: Vec<(i128, i128)> = input
            .buses
            .iter()
            .map(|&(offset, period)| {
                let period = period as i128;
                let rem = if offset == 0 {
                    0
                } else {
                    period - (offset as i128 % period)
                };
                (rem, period)
            })
            .collect();
        if pairs.is_empty() {
            return Err(SolveError::SolveFailed("no buses in service".into()));
        }
        let product: i128 = pairs.iter().map(|&(_, period)| period).product();
        let sum: i128 = pairs
            .iter()
            .map(|&(rem, period)| {
                let (_, t) = bezout_coefficients(period, product / period);
                rem * t * (product / period)
            })
            .sum();
        Ok(sum.rem_euclid(product).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    const EXAMPLE: &str = "939\n7,13,x,x,59,31,19";

    #[test]
    fn part1_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "295");
    }

    #[test]
    fn part2_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "1068781");
    }

    #[test]
    fn part2_documented_schedules() {
        for (schedule, want) in [
            ("17,x,13,19", "3417"),
            ("67,7,59,61", "754018"),
            ("67,x,7,59,61", "779210"),
            ("67,7,x,59,61", "1261476"),
            ("1789,37,47,1889", "1202161486"),
        ] {
            let mut input = Solver::parse(&format!("0\n{schedule}")).unwrap();
            assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), want, "{schedule}");
        }
    }

    #[test]
    fn rejects_garbage_schedule() {
        assert!(Solver::parse("939\n7,teen,19").is_err());
        assert!(Solver::parse("939").is_err());
    }

    mod properties {
        use super::super::bezout_coefficients;
        use proptest::prelude::*;

        fn gcd(mut a: i128, mut b: i128) -> i128 {
            while b != 0 {
                (a, b) = (b, a % b);
            }
            a
        }

        proptest! {
            /// Bezout's identity: s*x + t*y equals gcd(x, y)
            #[test]
            fn bezout_identity_holds(x in 1i128..100_000, y in 1i128..100_000) {
                let (s, t) = bezout_coefficients(x, y);
                prop_assert_eq!(s * x + t * y, gcd(x, y));
            }
        }
    }
}
