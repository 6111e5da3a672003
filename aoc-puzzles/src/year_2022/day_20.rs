//! Grove positioning: mix a circular list of numbers.
//!
//! Each number moves forward or backward through the circle by its own
//! value, in the original input order; a moving number is removed from the
//! circle before stepping, so steps reduce modulo len - 1. The answer is
//! the sum of the values 1000, 2000 and 3000 positions after 0. Part 2
//! multiplies every value by a decryption key and mixes ten times.
//!
//! The circle is a pair of prev/next index arrays over the original input
//! order, so nodes keep their identity while values repeat.

use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

const DECRYPTION_KEY: i64 = 811589153;

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2022, day = 20, tags = ["2022"])]
pub struct Solver;

impl PuzzleParser for Solver {
    type Input<'a> = Vec<i64>;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        let values: Vec<i64> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad number {l:?}")))
            })
            .collect::<Result<_, _>>()?;
        if values.len() < 2 {
            return Err(ParseError::MissingData("need at least two numbers".into()));
        }
        Ok(values)
    }
}

/// Doubly linked circle over node indices in input order.
struct Ring {
    values: Vec<i64>,
    next: Vec<usize>,
    prev: Vec<usize>,
}

impl Ring {
    fn new(values: &[i64], multiplier: i64) -> Ring {
        let n = values.len();
        Ring {
            values: values.iter().map(|v| v * multiplier).collect(),
            next: (0..n).map(|i| (i + 1) % n).collect(),
            prev: (0..n).map(|i| (i + n - 1) % n).collect(),
        }
    }

    /// Walk `steps` nodes from `from`, forward or backward.
    fn find(&self, from: usize, steps: i64) -> usize {
        let mut node = from;
        if steps < 0 {
            for _ in 0..-steps {
                node = self.prev[node];
            }
        } else {
            for _ in 0..steps {
                node = self.next[node];
            }
        }
        node
    }

    fn unlink(&mut self, node: usize) {
        let (p, n) = (self.prev[node], self.next[node]);
        self.next[p] = n;
        self.prev[n] = p;
    }

    fn move_node(&mut self, node: usize, steps: i64) {
        if steps == 0 {
            return;
        }
        // unlink first; the node's own stale links still point into the
        // circle, so stepping from it skips the node itself
        self.unlink(node);
        let target = self.find(node, steps);
        if steps < 0 {
            let before = self.prev[target];
            self.prev[node] = before;
            self.next[node] = target;
            self.prev[target] = node;
            self.next[before] = node;
        } else {
            let after = self.next[target];
            self.next[node] = after;
            self.prev[node] = target;
            self.next[target] = node;
            self.prev[after] = node;
        }
    }

    fn mix(&mut self) {
        let wrap = self.values.len() as i64 - 1;
        for node in 0..self.values.len() {
            self.move_node(node, self.values[node] % wrap);
        }
    }

    /// Sum of the values 1000, 2000 and 3000 past the node valued 0.
    fn grove_coordinates(&self) -> Result<i64, SolveError> {
        let zero = self
            .values
            .iter()
            .position(|&v| v == 0)
            .ok_or_else(|| SolveError::SolveFailed("no 0 in the list".into()))?;
        let one = self.find(zero, 1000);
        let two = self.find(one, 1000);
        let three = self.find(two, 1000);
        Ok(self.values[one] + self.values[two] + self.values[three])
    }
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let mut ring = Ring::new(input, 1);
        ring.mix();
        Ok(ring.grove_coordinates()?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let mut ring = Ring::new(input, DECRYPTION_KEY);
        for _ in 0..10 {
            ring.mix();
        }
        Ok(ring.grove_coordinates()?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    const EXAMPLE: &str = "1\n2\n-3\n3\n-2\n0\n4";

    fn order_from_zero(ring: &Ring) -> Vec<i64> {
        let zero = ring.values.iter().position(|&v| v == 0).unwrap();
        let mut order = vec![0];
        let mut node = ring.next[zero];
        while node != zero {
            order.push(ring.values[node]);
            node = ring.next[node];
        }
        order
    }

    #[test]
    fn single_mix_matches_the_walkthrough() {
        let values = Solver::parse(EXAMPLE).unwrap();
        let mut ring = Ring::new(&values, 1);
        ring.mix();
        assert_eq!(order_from_zero(&ring), vec![0, 3, -2, 1, 2, -3, 4]);
    }

    #[test]
    fn part1_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "3");
    }

    #[test]
    fn part2_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "1623178306");
    }

    #[test]
    fn negative_moves_wrap_backwards() {
        let values = vec![0, -1, 5, 10];
        let mut ring = Ring::new(&values, 1);
        ring.move_node(1, -1);
        assert_eq!(order_from_zero(&ring), vec![0, 5, 10, -1]);
    }

    #[test]
    fn rejects_short_input() {
        assert!(Solver::parse("5").is_err());
    }
}
