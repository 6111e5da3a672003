//! Expense report: find the entries summing to 2020.
//!
//! Input is one integer per line. Part 1 reports the product of the pair of
//! entries summing to 2020, part 2 the product of the triple. Every match is
//! reported, one per line, in input order.

use std::collections::{HashMap, HashSet};

use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

const TARGET: i64 = 2020;

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2020, day = 1, tags = ["2020"])]
pub struct Solver;

impl PuzzleParser for Solver {
    type Input<'a> = Vec<i64>;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        text.trim()
            .lines()
            .map(|line| {
                line.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("expected integer: {line:?}")))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let mut seen = HashSet::new();
        let mut products = Vec::new();
        for &n in input.iter() {
            // the second entry of a pair triggers the match, so 1010 can't
            // pair with itself
            if seen.contains(&(TARGET - n)) {
                products.push((n * (TARGET - n)).to_string());
            }
            seen.insert(n);
        }
        Ok(products.join("\n"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let mut seen: Vec<i64> = Vec::new();
        let mut pair_sums: HashMap<i64, (i64, i64)> = HashMap::new();
        let mut products = Vec::new();
        for &n in input.iter() {
            if let Some(&(a, b)) = pair_sums.get(&(TARGET - n)) {
                products.push((n * a * b).to_string());
            }
            for &x in &seen {
                pair_sums.insert(x + n, (x, n));
            }
            seen.push(n);
        }
        Ok(products.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    const EXAMPLE: &str = "1721\n979\n366\n299\n675\n1456";

    #[test]
    fn part1_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "514579");
    }

    #[test]
    fn part2_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "241861950");
    }

    #[test]
    fn no_match_reports_nothing() {
        let mut input = Solver::parse("1\n2\n3").unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "");
    }

    #[test]
    fn rejects_non_integer_lines() {
        assert!(Solver::parse("12\nforty\n9").is_err());
    }
}
