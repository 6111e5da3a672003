//! Keypad conundrum: type door codes through layers of robot keypads.
//!
//! Codes are typed on a numeric keypad by a robot arm, which is driven from
//! a directional keypad, which is driven from another... each layer turns
//! one button press into a sequence of arrow moves plus an A press. The
//! minimal length through all layers is computed by memoized recursion on
//! (sequence, depth); candidate move sequences between two buttons are the
//! two L-shaped orders that don't cross a keypad's gap. The answer sums
//! sequence length times the code's numeric value. Part 1 has 2 directional
//! layers, part 2 has 25.

use std::collections::HashMap;

use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2024, day = 21, tags = ["2024", "keypad"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pad {
    Numeric,
    Directional,
}

impl Pad {
    /// Button position as (row, col); row grows downward.
    fn position(self, button: u8) -> Option<(i8, i8)> {
        match self {
            // 789 / 456 / 123 / gap 0 A
            Pad::Numeric => match button {
                b'7' => Some((0, 0)),
                b'8' => Some((0, 1)),
                b'9' => Some((0, 2)),
                b'4' => Some((1, 0)),
                b'5' => Some((1, 1)),
                b'6' => Some((1, 2)),
                b'1' => Some((2, 0)),
                b'2' => Some((2, 1)),
                b'3' => Some((2, 2)),
                b'0' => Some((3, 1)),
                b'A' => Some((3, 2)),
                _ => None,
            },
            // gap ^ A / < v >
            Pad::Directional => match button {
                b'^' => Some((0, 1)),
                b'A' => Some((0, 2)),
                b'<' => Some((1, 0)),
                b'v' => Some((1, 1)),
                b'>' => Some((1, 2)),
                _ => None,
            },
        }
    }

    fn gap(self) -> (i8, i8) {
        match self {
            Pad::Numeric => (3, 0),
            Pad::Directional => (0, 0),
        }
    }

    /// Candidate button sequences moving the arm from one button to
    /// another and pressing it: horizontal-first and vertical-first,
    /// skipping any order that would sweep the arm over the gap.
    fn moves(self, from: u8, to: u8) -> Result<Vec<String>, SolveError> {
        let (fr, fc) = self.position(from).ok_or_else(|| bad_button(from))?;
        let (tr, tc) = self.position(to).ok_or_else(|| bad_button(to))?;
        let vertical = if tr >= fr { "v" } else { "^" }.repeat(fr.abs_diff(tr) as usize);
        let horizontal = if tc >= fc { ">" } else { "<" }.repeat(fc.abs_diff(tc) as usize);
        let mut res = Vec::with_capacity(2);
        // horizontal first is unsafe if the gap is in this row at the far
        // column; vertical first if the gap is in this column's far row
        if (fr, tc) != self.gap() {
            res.push(format!("{horizontal}{vertical}A"));
        }
        if (tr, fc) != self.gap()
            && (!vertical.is_empty() && !horizontal.is_empty() || res.is_empty())
        {
            res.push(format!("{vertical}{horizontal}A"));
        }
        Ok(res)
    }
}

fn bad_button(button: u8) -> SolveError {
    SolveError::SolveFailed(format!("no keypad button {:?}", button as char).into())
}

/// Memoizing expander: pads[0] is the numeric keypad, the rest directional.
struct Expander {
    pads: Vec<Pad>,
    cache: HashMap<(String, usize), u64>,
}

impl Expander {
    /// `indirection` is the number of robot-driven directional keypads
    fn new(indirection: usize) -> Expander {
        let mut pads = vec![Pad::Numeric];
        pads.extend(std::iter::repeat_n(Pad::Directional, indirection));
        Expander {
            pads,
            cache: HashMap::new(),
        }
    }

    /// Minimal number of presses on the human keypad to run `seq` on the
    /// keypad at `depth`.
    fn sequence_length(&mut self, seq: &str, depth: usize) -> Result<u64, SolveError> {
        if depth >= self.pads.len() {
            return Ok(seq.len() as u64);
        }
        let key = (seq.to_string(), depth);
        if let Some(&len) = self.cache.get(&key) {
            return Ok(len);
        }
        let pad = self.pads[depth];
        let mut total = 0u64;
        let mut cur = b'A';
        for &button in seq.as_bytes() {
            let mut best = u64::MAX;
            for option in pad.moves(cur, button)? {
                best = best.min(self.sequence_length(&option, depth + 1)?);
            }
            total += best;
            cur = button;
        }
        self.cache.insert(key, total);
        Ok(total)
    }

    /// Sequence length times the code's numeric value
    fn score(&mut self, code: &str) -> Result<u64, SolveError> {
        let numeric: u64 = code
            .trim_end_matches('A')
            .parse()
            .map_err(|_| SolveError::SolveFailed(format!("non-numeric code {code:?}").into()))?;
        Ok(self.sequence_length(code, 0)? * numeric)
    }
}

fn total_complexity(codes: &[String], indirection: usize) -> Result<String, SolveError> {
    let mut expander = Expander::new(indirection);
    let mut total = 0u64;
    for code in codes {
        total += expander.score(code)?;
    }
    Ok(total.to_string())
}

impl PuzzleParser for Solver {
    type Input<'a> = Vec<String>;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        let codes: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        if codes.is_empty() {
            return Err(ParseError::MissingData("no codes".into()));
        }
        Ok(codes)
    }
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        total_complexity(input, 2)
    }
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        total_complexity(input, 25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    const EXAMPLE: &str = "029A\n980A\n179A\n456A\n379A";

    #[test]
    fn moves_avoid_the_gap() {
        // A to 7 must not pass the bottom-left gap going left first
        let options = Pad::Numeric.moves(b'A', b'7').unwrap();
        assert_eq!(options, vec!["^^^<<A".to_string()]);
        // A to < on the arrow pad must not pass the top-left gap
        let options = Pad::Directional.moves(b'A', b'<').unwrap();
        assert_eq!(options, vec!["v<<A".to_string()]);
        // staying put is a bare press
        assert_eq!(Pad::Numeric.moves(b'5', b'5').unwrap(), vec!["A".to_string()]);
    }

    #[test]
    fn depth_zero_sequence_is_itself() {
        let mut expander = Expander::new(0);
        // only the numeric pad: each of 029A's presses expands once
        assert_eq!(expander.sequence_length("<A^A^^>AvvvA", 1).unwrap(), 12);
    }

    #[test]
    fn documented_sequence_lengths() {
        let mut expander = Expander::new(2);
        for (code, len) in [("029A", 68), ("980A", 60), ("179A", 68), ("456A", 64), ("379A", 64)] {
            assert_eq!(expander.sequence_length(code, 0).unwrap(), len, "{code}");
        }
    }

    #[test]
    fn part1_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "126384");
    }

    #[test]
    fn part2_is_at_least_part1() {
        let mut expander2 = Expander::new(2);
        let mut expander25 = Expander::new(25);
        let short = expander2.sequence_length("029A", 0).unwrap();
        let long = expander25.sequence_length("029A", 0).unwrap();
        assert!(long > short);
    }

    #[test]
    fn score_rejects_non_numeric_codes() {
        let mut expander = Expander::new(2);
        assert!(expander.score("0x9A").is_err());
    }
}
