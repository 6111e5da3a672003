//! Toboggan trajectory: count trees hit on fixed slopes.
//!
//! Input is a grid of `.` (open) and `#` (tree), conceptually repeating
//! infinitely to the right. Part 1 counts trees on the slope right 3, down 1.
//! Part 2 multiplies the counts for five fixed slopes.

use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2020, day = 3, tags = ["2020", "grid"])]
pub struct Solver;

impl PuzzleParser for Solver {
    type Input<'a> = Vec<&'a str>;

    fn parse<'a>(text: &'a str) -> Result<Self::Input<'a>, ParseError> {
        let rows: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        if rows.is_empty() {
            return Err(ParseError::MissingData("empty grid".into()));
        }
        if rows.iter().any(|r| r.bytes().any(|b| b != b'.' && b != b'#')) {
            return Err(ParseError::InvalidFormat(
                "grid rows must be '.' and '#'".into(),
            ));
        }
        Ok(rows)
    }
}

fn trees_hit(rows: &[&str], right: usize, down: usize) -> u64 {
    rows.iter()
        .enumerate()
        .filter(|(i, row)| {
            i % down == 0 && row.as_bytes()[i / down * right % row.len()] == b'#'
        })
        .count() as u64
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        Ok(trees_hit(input, 3, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let slopes = [(1, 1), (3, 1), (5, 1), (7, 1), (1, 2)];
        let product: u64 = slopes
            .iter()
            .map(|&(right, down)| trees_hit(input, right, down))
            .product();
        Ok(product.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    const EXAMPLE: &str = "\
..##.......
#...#...#..
.#....#..#.
..#.#...#.#
.#...##..#.
..#.##.....
.#.#.#....#
.#........#
#.##...#...
#...##....#
.#..#...#.#";

    #[test]
    fn part1_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "7");
    }

    #[test]
    fn part2_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "336");
    }

    #[test]
    fn grid_repeats_to_the_right() {
        // 2-wide grid with a tree in column 1: slope (3,1) wraps onto it
        let mut input = Solver::parse(".#\n.#\n.#\n.#").unwrap();
        // rows 1..3 land on columns 3%2=1, 6%2=0, 9%2=1
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "2");
    }

    #[test]
    fn rejects_unexpected_characters() {
        assert!(Solver::parse("..x\n...").is_err());
    }
}
