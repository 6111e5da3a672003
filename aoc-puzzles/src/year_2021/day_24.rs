//! Arithmetic Logic Unit: find the best 14-digit serial number the
//! submarine's MONAD program accepts.
//!
//! The input is a program of inp/add/mul/div/mod/eql instructions over
//! registers w, x, y, z; a 14-digit input (digits 1-9) is accepted when z
//! ends at 0. Inputs are encoded in base 9 so a numeric range covers exactly
//! the digit strings. The search splits a range across a bounded pool of
//! worker threads, each scanning from the top; the first hit cancels the
//! rest, the range is narrowed using the sub-ranges that came back empty,
//! and the scan recurses until nothing better is found. Part 1 reports the
//! maximum accepted input, part 2 the minimum.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use anyhow::anyhow;
use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

const DIGITS: usize = 14;
const WORKERS: usize = 10;

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2021, day = 24, tags = ["2021", "alu", "slow"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Reg(usize),
    Lit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    Inp(usize),
    Add(usize, Operand),
    Mul(usize, Operand),
    Div(usize, Operand),
    Mod(usize, Operand),
    Eql(usize, Operand),
}

fn parse_register(word: &str) -> Result<usize, anyhow::Error> {
    match word {
        "w" => Ok(0),
        "x" => Ok(1),
        "y" => Ok(2),
        "z" => Ok(3),
        _ => Err(anyhow!("unknown register {word:?}")),
    }
}

fn parse_operand(word: &str) -> Result<Operand, anyhow::Error> {
    parse_register(word).map(Operand::Reg).or_else(|_| {
        word.parse()
            .map(Operand::Lit)
            .map_err(|_| anyhow!("bad operand {word:?}"))
    })
}

fn parse_instruction(line: &str) -> Result<Instruction, anyhow::Error> {
    let mut words = line.split_whitespace();
    let op = words.next().ok_or_else(|| anyhow!("empty instruction"))?;
    let a = parse_register(words.next().ok_or_else(|| anyhow!("missing register in {line:?}"))?)?;
    if op == "inp" {
        return Ok(Instruction::Inp(a));
    }
    let b = parse_operand(words.next().ok_or_else(|| anyhow!("missing operand in {line:?}"))?)?;
    match op {
        "add" => Ok(Instruction::Add(a, b)),
        "mul" => Ok(Instruction::Mul(a, b)),
        "div" => Ok(Instruction::Div(a, b)),
        "mod" => Ok(Instruction::Mod(a, b)),
        "eql" => Ok(Instruction::Eql(a, b)),
        _ => Err(anyhow!("unknown instruction {line:?}")),
    }
}

#[derive(Debug, Clone)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Run the program on the digit stream; returns final register values
    /// [w, x, y, z].
    fn execute(&self, digits: &[u8; DIGITS]) -> Result<[i64; 4], SolveError> {
        let mut regs = [0i64; 4];
        let mut next_digit = 0usize;
        for inst in &self.instructions {
            match *inst {
                Instruction::Inp(a) => {
                    let d = digits.get(next_digit).ok_or_else(|| {
                        SolveError::SolveFailed("program reads more than 14 inputs".into())
                    })?;
                    regs[a] = i64::from(*d);
                    next_digit += 1;
                }
                Instruction::Add(a, b) => regs[a] += self.value(&regs, b),
                Instruction::Mul(a, b) => regs[a] *= self.value(&regs, b),
                Instruction::Div(a, b) => {
                    let v = self.value(&regs, b);
                    if v == 0 {
                        return Err(SolveError::SolveFailed("division by zero".into()));
                    }
                    regs[a] /= v;
                }
                Instruction::Mod(a, b) => {
                    let v = self.value(&regs, b);
                    if regs[a] < 0 || v <= 0 {
                        return Err(SolveError::SolveFailed("invalid modulo".into()));
                    }
                    regs[a] %= v;
                }
                Instruction::Eql(a, b) => {
                    regs[a] = i64::from(regs[a] == self.value(&regs, b));
                }
            }
        }
        Ok(regs)
    }

    fn value(&self, regs: &[i64; 4], operand: Operand) -> i64 {
        match operand {
            Operand::Reg(r) => regs[r],
            Operand::Lit(v) => v,
        }
    }

    /// True if the serial number leaves z at 0.
    fn accepts(&self, input: SerialNumber) -> bool {
        matches!(self.execute(&input.digits), Ok([_, _, _, 0]))
    }
}

impl PuzzleParser for Solver {
    type Input<'a> = Program;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        let instructions = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| parse_instruction(l).map_err(|e| ParseError::InvalidFormat(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        if !instructions.iter().any(|i| matches!(i, Instruction::Inp(_))) {
            return Err(ParseError::MissingData("program never reads input".into()));
        }
        Ok(Program { instructions })
    }
}

/// A candidate serial number: 14 digits, each 1-9, ordered by its base-9
/// index so numeric ranges cover digit strings exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SerialNumber {
    digits: [u8; DIGITS],
}

impl SerialNumber {
    fn from_index(index: i64) -> SerialNumber {
        let mut digits = [0u8; DIGITS];
        let mut d = index;
        for i in 1..=DIGITS {
            digits[DIGITS - i] = (d % 9) as u8 + 1;
            d /= 9;
        }
        SerialNumber { digits }
    }

    fn index(&self) -> i64 {
        self.digits
            .iter()
            .fold(0i64, |acc, &d| acc * 9 + i64::from(d - 1))
    }

    fn to_digit_string(self) -> String {
        self.digits.iter().map(|d| d.to_string()).collect()
    }
}

/// Inclusive index range, normalized so `min <= max`.
#[derive(Debug, Clone, Copy)]
struct ScanRange {
    min: i64,
    max: i64,
}

impl ScanRange {
    fn normalized(a: i64, b: i64) -> ScanRange {
        if a > b {
            ScanRange { min: b, max: a }
        } else {
            ScanRange { min: a, max: b }
        }
    }
}

enum WorkerReport {
    Found(SerialNumber),
    Empty(ScanRange),
}

/// Scan a sub-range from the top down, bailing out when cancelled. Reports
/// the first accepted input, or the whole range as empty.
fn search_range(
    program: &Program,
    r: ScanRange,
    factor: i64,
    cancel: &AtomicBool,
    report: &mpsc::Sender<WorkerReport>,
) {
    let mut i = r.max;
    while i >= r.min {
        if cancel.load(Ordering::Relaxed) {
            return;
        }
        let input = SerialNumber::from_index(factor * i);
        if program.accepts(input) {
            let _ = report.send(WorkerReport::Found(input));
            return;
        }
        i -= 1;
    }
    let _ = report.send(WorkerReport::Empty(r));
}

/// Split `min..=max` across the worker pool and search. On a hit, cancel
/// everyone, narrow the range past the hit (and past sub-ranges known
/// empty), and recurse looking for something better. `factor` 1 finds the
/// maximum accepted input, -1 the minimum.
fn scan_range(program: &Program, mut min: i64, mut max: i64, factor: i64) -> Option<SerialNumber> {
    if min > max {
        return None;
    }
    let cancel = AtomicBool::new(false);
    let mut found: Option<SerialNumber> = None;
    let mut empties: Vec<ScanRange> = Vec::with_capacity(WORKERS);
    std::thread::scope(|scope| {
        let (tx, rx) = mpsc::channel();
        if (max - min) as usize <= WORKERS {
            let tx = tx.clone();
            let cancel = &cancel;
            scope.spawn(move || {
                search_range(
                    program,
                    ScanRange::normalized(factor * min, factor * max),
                    factor,
                    cancel,
                    &tx,
                )
            });
        } else {
            let size = (max - min) / WORKERS as i64;
            for w in 0..WORKERS as i64 {
                let hi = max - size * w;
                let lo = if w == WORKERS as i64 - 1 {
                    min
                } else {
                    max - size * (w + 1) + 1
                };
                let tx = tx.clone();
                let cancel = &cancel;
                scope.spawn(move || {
                    search_range(
                        program,
                        ScanRange::normalized(factor * hi, factor * lo),
                        factor,
                        cancel,
                        &tx,
                    )
                });
            }
        }
        drop(tx);
        for msg in rx {
            match msg {
                WorkerReport::Found(input) => {
                    cancel.store(true, Ordering::Relaxed);
                    found = Some(input);
                    break;
                }
                WorkerReport::Empty(r) => empties.push(r),
            }
        }
    });

    let found = found?;
    if factor == 1 {
        min = found.index() + 1;
        // drop empty sub-ranges off the top
        while let Some(r) = empties.iter().find(|r| r.max == max) {
            max = r.min - 1;
        }
    } else {
        max = found.index() - 1;
        while let Some(r) = empties.iter().find(|r| r.min == min) {
            min = r.max + 1;
        }
    }
    scan_range(program, min, max, factor).or(Some(found))
}

/// Search prefix by prefix: first all leading digits pinned to the
/// extreme, then progressively fewer, so dense-prefix answers come fast.
fn best_serial(program: &Program, factor: i64) -> Option<SerialNumber> {
    for i in (0..DIGITS).rev() {
        let mut high = [0u8; DIGITS];
        let mut low = [0u8; DIGITS];
        if factor == 1 {
            high = [9; DIGITS];
            for slot in low.iter_mut().take(i) {
                *slot = 9;
            }
            for slot in low.iter_mut().skip(i) {
                *slot = 1;
            }
            high[i] = 8;
        } else {
            for slot in high.iter_mut().take(i) {
                *slot = 1;
            }
            for slot in high.iter_mut().skip(i + 1) {
                *slot = 9;
            }
            low = [1; DIGITS];
            high[i] = 9;
            low[i] = 2;
        }
        let low = SerialNumber { digits: low }.index();
        let high = SerialNumber { digits: high }.index();
        if let Some(winner) = scan_range(program, low, high, factor) {
            return Some(winner);
        }
    }
    None
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        best_serial(input, 1)
            .map(SerialNumber::to_digit_string)
            .ok_or_else(|| SolveError::SolveFailed("no accepted serial number".into()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        best_serial(input, -1)
            .map(SerialNumber::to_digit_string)
            .ok_or_else(|| SolveError::SolveFailed("no accepted serial number".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    fn digits(s: &str) -> [u8; DIGITS] {
        let mut d = [1u8; DIGITS];
        for (i, c) in s.chars().enumerate() {
            d[i] = c.to_digit(10).unwrap() as u8;
        }
        d
    }

    #[test]
    fn serial_number_round_trips() {
        assert_eq!(SerialNumber::from_index(0).digits, [1; DIGITS]);
        let top = SerialNumber { digits: [9; DIGITS] };
        assert_eq!(top.index(), 9i64.pow(DIGITS as u32) - 1);
        for index in [0, 1, 12345, 9i64.pow(14) - 1] {
            assert_eq!(SerialNumber::from_index(index).index(), index);
        }
        assert_eq!(
            SerialNumber::from_index(8).to_digit_string(),
            "11111111111119"
        );
    }

    #[test]
    fn negate_program() {
        let program = Solver::parse("inp z\nmul z -1").unwrap();
        let regs = program.execute(&digits("7")).unwrap();
        assert_eq!(regs[3], -7);
    }

    #[test]
    fn triple_check_program() {
        // second input equal to three times the first leaves z = 1
        let program = Solver::parse("inp z\ninp x\nmul z 3\neql z x").unwrap();
        assert_eq!(program.execute(&digits("26")).unwrap()[3], 1);
        assert_eq!(program.execute(&digits("27")).unwrap()[3], 0);
    }

    #[test]
    fn binary_digits_program() {
        let text = "\
inp w
add z w
mod z 2
div w 2
add y w
mod y 2
div w 2
add x w
mod x 2
div w 2
mod w 2";
        let program = Solver::parse(text).unwrap();
        // 9 = 0b1001 into w,x,y,z
        assert_eq!(program.execute(&digits("9")).unwrap(), [1, 0, 0, 1]);
        assert_eq!(program.execute(&digits("6")).unwrap(), [0, 1, 1, 0]);
    }

    #[test]
    fn execute_reports_bad_arithmetic() {
        let program = Solver::parse("inp w\ndiv w 0").unwrap();
        assert!(program.execute(&digits("1")).is_err());
        let program = Solver::parse("inp w\nmul w -1\nmod w 3").unwrap();
        assert!(program.execute(&digits("1")).is_err());
    }

    #[test]
    fn rejects_malformed_programs() {
        assert!(Solver::parse("inp q").is_err());
        assert!(Solver::parse("frob w 1").is_err());
        assert!(Solver::parse("add w 1").is_err()); // no inp at all
    }

    #[test]
    fn accept_everything_finds_the_scan_extremes() {
        // z is always 0, so the search tops out at the highest candidate the
        // prefix scan visits (it pins leading digits before widening)
        let mut program = Solver::parse("inp w\nmul w 0").unwrap();
        assert_eq!(
            Solver::solve_part(&mut program, 1).unwrap(),
            "99999999999998"
        );
        assert_eq!(
            Solver::solve_part(&mut program, 2).unwrap(),
            "11111111111112"
        );
    }
}
