//! Crab cups: splicing cups around a circle.
//!
//! Input lines are digit strings naming cups in a cycle. Each move removes
//! the three cups after the current one, inserts them after the cup labeled
//! one less than the current (wrapping, skipping removed cups), then
//! advances. The circle is a successor array indexed by cup label, so each
//! move is O(1). Part 1 plays 100 moves and reports the labels after cup 1;
//! part 2 extends to one million cups, plays ten million moves, and reports
//! the product of the two labels after cup 1.

use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2020, day = 23, tags = ["2020", "slow"])]
pub struct Solver;

impl PuzzleParser for Solver {
    type Input<'a> = Vec<Vec<u32>>;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| {
                        c.to_digit(10)
                            .filter(|&d| d > 0)
                            .ok_or_else(|| ParseError::InvalidFormat(format!("bad cup {c:?}")))
                    })
                    .collect()
            })
            .collect()
    }
}

/// Successor-array cup circle: `next[label]` is the cup clockwise of `label`.
struct CupCircle {
    next: Vec<u32>,
    cur: u32,
    min: u32,
    max: u32,
}

impl CupCircle {
    fn new(initial: &[u32], total: u32) -> CupCircle {
        let min = *initial.iter().min().unwrap_or(&1);
        let start_extra = *initial.iter().max().unwrap_or(&0) + 1;
        let max = total + min - 1;
        let mut next = vec![0u32; max as usize + 1];
        let first = initial[0];
        let mut prev = first;
        for cup in initial[1..].iter().copied().chain(start_extra..=max) {
            next[prev as usize] = cup;
            prev = cup;
        }
        next[prev as usize] = first;
        CupCircle {
            next,
            cur: first,
            min,
            max,
        }
    }

    fn play_round(&mut self) {
        let a = self.next[self.cur as usize];
        let b = self.next[a as usize];
        let c = self.next[b as usize];
        self.next[self.cur as usize] = self.next[c as usize];
        let mut dest = self.cur;
        loop {
            dest = if dest <= self.min { self.max } else { dest - 1 };
            if dest != a && dest != b && dest != c {
                break;
            }
        }
        self.next[c as usize] = self.next[dest as usize];
        self.next[dest as usize] = a;
        self.cur = self.next[self.cur as usize];
    }
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let results: Vec<String> = input
            .iter()
            .map(|cups| {
                let mut circle = CupCircle::new(cups, cups.len() as u32);
                for _ in 0..100 {
                    circle.play_round();
                }
                let mut labels = String::new();
                let mut cup = circle.next[1];
                for _ in 0..cups.len() - 1 {
                    labels.push_str(&cup.to_string());
                    cup = circle.next[cup as usize];
                }
                labels
            })
            .collect();
        Ok(results.join("\n"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let results: Vec<String> = input
            .iter()
            .map(|cups| {
                let mut circle = CupCircle::new(cups, 1_000_000);
                for _ in 0..10_000_000 {
                    circle.play_round();
                }
                let one_after = circle.next[1] as u64;
                let two_after = circle.next[circle.next[1] as usize] as u64;
                (one_after * two_after).to_string()
            })
            .collect();
        Ok(results.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    #[test]
    fn ten_rounds_of_the_example() {
        let cups: Vec<u32> = "389125467".chars().map(|c| c.to_digit(10).unwrap()).collect();
        let mut circle = CupCircle::new(&cups, 9);
        for _ in 0..10 {
            circle.play_round();
        }
        let mut labels = String::new();
        let mut cup = circle.next[1];
        for _ in 0..8 {
            labels.push_str(&cup.to_string());
            cup = circle.next[cup as usize];
        }
        assert_eq!(labels, "92658374");
    }

    #[test]
    fn part1_example() {
        let mut input = Solver::parse("389125467").unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "67384529");
    }

    #[test]
    #[ignore = "a million cups, ten million moves"]
    fn part2_example() {
        let mut input = Solver::parse("389125467").unwrap();
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "149245887792");
    }

    #[test]
    fn rejects_zero_cup() {
        assert!(Solver::parse("3890").is_err());
    }
}
