//! Rambunctious recitation: the elves' memory game.
//!
//! Each input line is a comma list of starting numbers. After the starting
//! numbers, each turn speaks how many turns passed since the previous number
//! was last spoken (0 if new). Part 1 reports the 2020th number spoken,
//! part 2 the 30,000,000th, one result line per input line.

use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2020, day = 15, tags = ["2020", "slow"])]
pub struct Solver;

impl PuzzleParser for Solver {
    type Input<'a> = Vec<Vec<u32>>;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        text.lines()
            .filter(|l| !l.is_empty())
            .map(|line| {
                line.split(',')
                    .map(|n| {
                        n.trim()
                            .parse()
                            .map_err(|_| ParseError::InvalidFormat(format!("bad number {n:?}")))
                    })
                    .collect()
            })
            .collect()
    }
}

/// Play until `n` numbers have been spoken; returns the last one.
fn play_to_n(n: u32, initial: &[u32]) -> u32 {
    // indexed by spoken number; grown to cover starters larger than n
    let table = n.max(initial.iter().copied().max().unwrap_or(0) + 1);
    let mut last_seen = vec![0u32; table as usize];
    let mut next = 0u32;
    for turn in 1..n {
        if turn as usize <= initial.len() {
            next = initial[turn as usize - 1];
        }
        let seen = last_seen[next as usize];
        let prev = turn - if seen == 0 { turn } else { seen };
        last_seen[next as usize] = turn;
        next = prev;
    }
    next
}

fn solve_to(input: &[Vec<u32>], n: u32) -> String {
    input
        .iter()
        .map(|initial| play_to_n(n, initial).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        Ok(solve_to(input, 2020))
    }
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        Ok(solve_to(input, 30_000_000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    #[test]
    fn early_turns_of_the_first_example() {
        assert_eq!(play_to_n(4, &[0, 3, 6]), 0);
        assert_eq!(play_to_n(5, &[0, 3, 6]), 3);
        assert_eq!(play_to_n(6, &[0, 3, 6]), 3);
        assert_eq!(play_to_n(7, &[0, 3, 6]), 1);
        assert_eq!(play_to_n(10, &[0, 3, 6]), 0);
    }

    #[test]
    fn part1_examples() {
        let mut input =
            Solver::parse("0,3,6\n1,3,2\n2,1,3\n1,2,3\n2,3,1\n3,2,1\n3,1,2").unwrap();
        assert_eq!(
            Solver::solve_part(&mut input, 1).unwrap(),
            "436\n1\n10\n27\n78\n438\n1836"
        );
    }

    #[test]
    #[ignore = "thirty million turns"]
    fn part2_example() {
        let mut input = Solver::parse("0,3,6").unwrap();
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "175594");
    }
}
