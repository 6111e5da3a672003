//! Binary boarding: decode seat IDs from partition strings.
//!
//! Each pass is 7 F/B characters halving the row range 0..=127 followed by
//! 3 L/R characters halving the column range 0..=7; the seat ID is
//! row * 8 + column. Part 1 is the highest ID, part 2 the single missing ID
//! in the occupied block.

use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2020, day = 5, tags = ["2020"])]
pub struct Solver;

/// Narrow an inclusive range by keeping its lower or upper half.
fn halve(range: (u32, u32), upper: bool) -> (u32, u32) {
    let size = range.1 - range.0 + 1;
    if upper {
        (range.0 + size / 2, range.1)
    } else {
        (range.0, range.1 - size / 2)
    }
}

fn seat_id(pass: &str) -> Result<u32, ParseError> {
    let mut rows = (0u32, 127u32);
    let mut cols = (0u32, 7u32);
    for c in pass.chars() {
        match c {
            'F' => rows = halve(rows, false),
            'B' => rows = halve(rows, true),
            'L' => cols = halve(cols, false),
            'R' => cols = halve(cols, true),
            _ => {
                return Err(ParseError::InvalidFormat(format!(
                    "unexpected {c:?} in {pass:?}"
                )));
            }
        }
    }
    if rows.0 != rows.1 || cols.0 != cols.1 {
        return Err(ParseError::InvalidFormat(format!(
            "left over {rows:?}, {cols:?} from {pass:?}"
        )));
    }
    Ok(rows.0 * 8 + cols.0)
}

impl PuzzleParser for Solver {
    type Input<'a> = Vec<u32>;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        text.lines().filter(|l| !l.is_empty()).map(seat_id).collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        match input.iter().max() {
            Some(max) => Ok(max.to_string()),
            None => Ok("Empty input".to_string()),
        }
    }
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let mut sorted = input.clone();
        sorted.sort_unstable();
        for (index, &id) in sorted.iter().enumerate() {
            if id - index as u32 != sorted[0] {
                return Ok((id - 1).to_string());
            }
        }
        Ok("Open seat ID not found".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    #[test]
    fn decodes_documented_passes() {
        assert_eq!(seat_id("FBFBBFFRLR").unwrap(), 357);
        assert_eq!(seat_id("BFFFBBFRRR").unwrap(), 567);
        assert_eq!(seat_id("FFFBBBFRRR").unwrap(), 119);
        assert_eq!(seat_id("BBFFBBFRLL").unwrap(), 820);
    }

    #[test]
    fn part1_takes_the_maximum() {
        let mut input =
            Solver::parse("BFFFBBFRRR\nFFFBBBFRRR\nBBFFBBFRLL\nFBFBBFFRLR").unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "820");
    }

    /// Re-encode a seat ID as a boarding pass string.
    fn encode(id: u32) -> String {
        let mut pass = String::new();
        for bit in (3..10).rev() {
            pass.push(if id & (1 << bit) != 0 { 'B' } else { 'F' });
        }
        for bit in (0..3).rev() {
            pass.push(if id & (1 << bit) != 0 { 'R' } else { 'L' });
        }
        pass
    }

    #[test]
    fn part2_finds_the_gap() {
        let passes: Vec<String> = [88, 89, 91, 92].iter().map(|&id| encode(id)).collect();
        let mut input = Solver::parse(&passes.join("\n")).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "90");
    }

    #[test]
    fn rejects_malformed_passes() {
        assert!(Solver::parse("FBFBBFFRLX").is_err());
        assert!(Solver::parse("FBFB").is_err());
    }
}
