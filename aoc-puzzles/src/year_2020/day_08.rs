//! Handheld halting: a tiny acc/jmp/nop machine that loops forever.
//!
//! Part 1 reports the accumulator just before any instruction runs a second
//! time. Part 2 flips exactly one jmp<->nop so the program terminates and
//! reports the final accumulator, found by a depth-first search that tries
//! the flip at each point along the execution path.

use std::collections::HashSet;

use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2020, day = 8, tags = ["2020", "vm"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Acc(i64),
    Jmp(i64),
    Nop(i64),
}

impl Instruction {
    fn parse(line: &str) -> Result<Instruction, ParseError> {
        let (op, value) = line
            .split_once(' ')
            .ok_or_else(|| ParseError::InvalidFormat(format!("bad instruction {line:?}")))?;
        let value = value
            .parse()
            .map_err(|_| ParseError::InvalidFormat(format!("bad operand in {line:?}")))?;
        match op {
            "acc" => Ok(Instruction::Acc(value)),
            "jmp" => Ok(Instruction::Jmp(value)),
            "nop" => Ok(Instruction::Nop(value)),
            _ => Err(ParseError::InvalidFormat(format!(
                "unknown instruction {line:?}"
            ))),
        }
    }
}

impl PuzzleParser for Solver {
    type Input<'a> = Vec<Instruction>;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        text.lines()
            .filter(|l| !l.is_empty())
            .map(Instruction::parse)
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let mut acc = 0i64;
        let mut pc = 0i64;
        let mut seen = HashSet::new();
        while seen.insert(pc) {
            let inst = *input.get(pc as usize).ok_or_else(|| {
                SolveError::SolveFailed(format!("program counter {pc} out of range").into())
            })?;
            match inst {
                Instruction::Acc(v) => {
                    acc += v;
                    pc += 1;
                }
                Instruction::Jmp(v) => pc += v,
                Instruction::Nop(_) => pc += 1,
            }
        }
        Ok(acc.to_string())
    }
}

/// Walk the program from `pc`, optionally with one instruction patched.
/// Returns the final accumulator if execution reaches one past the end,
/// None on a loop or an out-of-range jump. When no patch has been spent
/// yet, each jmp/nop along the path is retried flipped.
fn recurse(
    instructions: &[Instruction],
    pc: i64,
    mut acc: i64,
    seen: &mut HashSet<i64>,
    patch: Option<(i64, Instruction)>,
) -> Option<i64> {
    if pc == instructions.len() as i64 {
        return Some(acc);
    }
    let inst = match patch {
        Some((at, replacement)) if at == pc => replacement,
        _ => *instructions.get(usize::try_from(pc).ok()?)?,
    };
    if seen.contains(&pc) {
        return None; // loop detected
    }
    seen.insert(pc); // push
    if let Instruction::Acc(v) = inst {
        acc += v;
    }
    let next = match inst {
        Instruction::Acc(_) | Instruction::Nop(_) => pc + 1,
        Instruction::Jmp(v) => pc + v,
    };
    let mut result = recurse(instructions, next, acc, seen, patch);
    seen.remove(&pc); // pop
    if result.is_none() && patch.is_none() {
        let flipped = match inst {
            Instruction::Nop(v) => Some(Instruction::Jmp(v)),
            Instruction::Jmp(v) => Some(Instruction::Nop(v)),
            Instruction::Acc(_) => None,
        };
        if let Some(flipped) = flipped {
            // inst is jmp or nop, so acc is still the entry value
            result = recurse(instructions, pc, acc, seen, Some((pc, flipped)));
        }
    }
    result
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        match recurse(input, 0, 0, &mut HashSet::new(), None) {
            Some(acc) => Ok(acc.to_string()),
            None => Ok("no solution found".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    const EXAMPLE: &str = "\
nop +0
acc +1
jmp +4
acc +3
jmp -3
acc -99
acc +1
jmp -4
acc +6";

    #[test]
    fn part1_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "5");
    }

    #[test]
    fn part2_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "8");
    }

    #[test]
    fn part2_without_a_fix_reports_failure() {
        // jmp +0 loops on itself and no flip escapes: nop +0 also loops
        let mut input = Solver::parse("jmp +0").unwrap();
        assert_eq!(
            Solver::solve_part(&mut input, 2).unwrap(),
            "no solution found"
        );
    }

    #[test]
    fn parses_signed_operands() {
        assert_eq!(Instruction::parse("acc -99").unwrap(), Instruction::Acc(-99));
        assert_eq!(Instruction::parse("jmp +4").unwrap(), Instruction::Jmp(4));
        assert!(Instruction::parse("foo +1").is_err());
    }
}
