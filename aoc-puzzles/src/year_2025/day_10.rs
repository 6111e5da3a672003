//! Factory machines: light toggles and joltage counters.
//!
//! Each input line is a machine: a target light pattern in brackets, button
//! definitions in parentheses (the indices a button touches), and target
//! joltage levels in braces, e.g. `[.##.] (3) (1,3) (2) {3,5,4}`.
//!
//! Part 1: buttons toggle lights; find the minimum number of distinct
//! button presses reaching the target pattern (breadth-first over press
//! subsets, XOR over bitmasks).
//!
//! Part 2: buttons increment the joltage counters they touch; find the
//! minimum total presses hitting the target levels exactly. The button
//! count matrix is reduced with integer row operations in the style of a
//! Hermite Normal Form computation, then the remaining free variables are
//! searched breadth-first with back-substitution, bounded by the best
//! solution so far and the total joltage.

use std::collections::{HashSet, VecDeque};

use anyhow::anyhow;
use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

/// Column limit of the free-variable state vector (buttons are single
/// digits, so at most 10 in practice)
const MAX_VARS: usize = 13;

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2025, day = 10, tags = ["2025", "linear-algebra"])]
pub struct Solver;

#[derive(Debug, Clone)]
pub struct Machine {
    desired: u32,
    buttons: Vec<u32>,
    joltage: Vec<i64>,
}

fn parse_indices(word: &str, open: char, close: char) -> Result<Vec<i64>, anyhow::Error> {
    let inner = word
        .strip_prefix(open)
        .and_then(|w| w.strip_suffix(close))
        .ok_or_else(|| anyhow!("expected {open}...{close}, got {word:?}"))?;
    inner
        .split(',')
        .map(|n| n.trim().parse().map_err(|_| anyhow!("bad number {n:?}")))
        .collect()
}

fn parse_machine(line: &str) -> Result<Machine, anyhow::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 3 {
        return Err(anyhow!("machine needs lights, buttons and joltages"));
    }
    let lights = words[0]
        .strip_prefix('[')
        .and_then(|w| w.strip_suffix(']'))
        .ok_or_else(|| anyhow!("expected [lights], got {:?}", words[0]))?;
    let mut desired = 0u32;
    for (i, c) in lights.chars().enumerate() {
        match c {
            '#' => desired |= 1 << i,
            '.' => {}
            _ => return Err(anyhow!("bad light {c:?}")),
        }
    }
    let buttons = words[1..words.len() - 1]
        .iter()
        .map(|word| {
            let mut mask = 0u32;
            for i in parse_indices(word, '(', ')')? {
                if !(0..32).contains(&i) {
                    return Err(anyhow!("button index {i} out of range"));
                }
                mask |= 1 << i;
            }
            Ok(mask)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let joltage = parse_indices(words[words.len() - 1], '{', '}')?;
    Ok(Machine {
        desired,
        buttons,
        joltage,
    })
}

impl PuzzleParser for Solver {
    type Input<'a> = Vec<Machine>;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        let machines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
            .map(|(i, line)| {
                parse_machine(line)
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {e}", i + 1)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if machines.is_empty() {
            return Err(ParseError::MissingData("no machines".into()));
        }
        Ok(machines)
    }
}

/// Fewest button presses toggling the lights to the target, level by level
/// over press subsets.
fn min_presses_lights(m: &Machine) -> Result<u32, SolveError> {
    if m.desired == 0 {
        return Ok(0);
    }
    #[derive(Clone, Copy)]
    struct PressState {
        pressed: u32,
        set: u32,
    }
    let mut prev = vec![PressState { pressed: 0, set: 0 }];
    loop {
        let mut cur = Vec::new();
        for s in &prev {
            for (i, &b) in m.buttons.iter().enumerate() {
                if s.pressed & (1 << i) == 0 {
                    let t = PressState {
                        pressed: s.pressed | 1 << i,
                        set: s.set ^ b,
                    };
                    if t.set == m.desired {
                        return Ok(t.pressed.count_ones());
                    }
                    cur.push(t);
                }
            }
        }
        if cur.is_empty() {
            return Err(SolveError::SolveFailed(
                "light pattern unreachable from the given buttons".into(),
            ));
        }
        prev = cur;
    }
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let mut sum = 0u64;
        for m in input.iter() {
            sum += u64::from(min_presses_lights(m)?);
        }
        Ok(sum.to_string())
    }
}

type Matrix = Vec<Vec<i64>>;

fn rightmost_nonzero(row: &[i64]) -> Option<usize> {
    row.iter().rposition(|&v| v != 0)
}

/// Integer row reduction toward a Hermite-Normal-Form-like shape: pivot
/// rows are swapped in by smallest absolute value, redundant columns are
/// swapped right (the variable order doesn't matter, only the press total),
/// and rows are eliminated with integer factors only.
fn reduce(m: &mut Matrix) {
    let rows = m.len();
    let cols = m[0].len();
    let mut col = 0;
    'outer: while col < rows.min(cols) {
        for i in col + 1..rows {
            if m[i][col] != 0 && (m[col][col] == 0 || m[i][col].abs() < m[col][col].abs()) {
                m.swap(col, i);
            }
        }
        if m[col][col] == 0 {
            for c in col + 1..cols - 1 {
                if m[col][c] != 0 {
                    for row in m.iter_mut() {
                        row.swap(col, c);
                    }
                    continue 'outer;
                }
            }
        }
        if m[col][col] == 0 {
            // park an all-zero row in the redundant position
            for i in col..rows {
                if rightmost_nonzero(&m[i]).is_none() {
                    if i != col {
                        m.swap(col, i);
                    }
                    break;
                }
            }
            col += 1;
            continue;
        }
        if m[col][col] < 0 {
            for c in 0..cols {
                m[col][c] *= -1;
            }
        }
        for i in 0..rows {
            if i == col || m[i][col] == 0 {
                continue;
            }
            let factor = m[i][col] / m[col][col];
            for c in 0..cols {
                m[i][c] -= m[col][c] * factor;
            }
            if i > col && m[i][col] != 0 {
                continue 'outer; // pivot doesn't divide evenly yet, re-pick
            }
        }
        col += 1;
    }
}

type Vals = [i64; MAX_VARS];

/// Candidate next free-variable assignments: bump one free variable where
/// doing so moves some equation's residual toward zero (or where the free
/// coefficients are all negative and the residual must get worse first).
fn successors(m: &Matrix, free: &[usize], vals: &Vals, worst: i64, seen: &HashSet<Vals>) -> Vec<Vals> {
    let mut res = Vec::with_capacity(free.len());
    if vals.iter().sum::<i64>() >= worst {
        return res;
    }
    let cols = m[0].len();
    for &i in free {
        let mut improves = false;
        let mut all_negative = true;
        for row in m {
            if row[i] != 0 {
                let mut v = row[cols - 1];
                for c in 0..cols - 1 {
                    v -= row[c] * vals[c];
                }
                let u = v - row[i];
                if v.abs() > u.abs() {
                    improves = true;
                }
                if row[i] > 0 && row[cols - 1] > 0 {
                    all_negative = false;
                }
            }
        }
        if !improves && !all_negative {
            continue;
        }
        let mut next = *vals;
        next[i] += 1;
        if !seen.contains(&next) {
            res.push(next);
        }
    }
    res
}

/// Solve the pinned variables bottom-up given the free assignments.
/// Returns (total presses, leftover residual, exactly solvable).
fn back_substitute(m: &Matrix, vals: &Vals) -> (i64, i64, bool) {
    let rows = m.len();
    let cols = m[0].len();
    let mut ok = true;
    let mut rem = 0i64;
    let mut all = *vals;
    for r in (0..rows).rev() {
        let mut v = m[r][cols - 1];
        for c in (r + 1..cols - 1).rev() {
            v -= all[c] * m[r][c];
        }
        if r > cols - 1 || m[r][r] == 0 {
            // over-determined row; any residual is unresolvable here
            if v != 0 {
                rem += v.abs();
                ok = false;
            }
        } else {
            if v < 0 {
                ok = false;
                rem += -v;
            }
            if v % m[r][r] == 0 {
                all[r] = v / m[r][r];
            } else {
                ok = false;
            }
        }
    }
    (all.iter().sum(), rem, ok)
}

/// Fewest total presses reaching the joltage targets exactly.
fn min_presses_joltage(machine: &Machine) -> Result<i64, SolveError> {
    let mut buttons = machine.buttons.clone();
    buttons.sort_by_key(|b| std::cmp::Reverse(b.count_ones()));
    let rows = machine.joltage.len();
    let cols = buttons.len() + 1;
    if cols - 1 > MAX_VARS {
        return Err(SolveError::SolveFailed(
            format!("more than {MAX_VARS} buttons").into(),
        ));
    }
    let mut m: Matrix = vec![vec![0; cols]; rows];
    for (i, row) in m.iter_mut().enumerate() {
        for (j, &b) in buttons.iter().enumerate() {
            if b & (1 << i) != 0 {
                row[j] = 1;
            }
        }
        row[cols - 1] = machine.joltage[i];
    }
    // near-empty rows first so small pivots surface early
    m.sort_by_key(|row| (row[..cols - 1].iter().sum::<i64>(), row[cols - 1]));
    reduce(&mut m);

    let free: Vec<usize> = (0..cols - 1)
        .filter(|&i| i >= rows || m[i][i] == 0)
        .collect();
    let initial: Vals = [0; MAX_VARS];
    let (init_sum, init_rem, init_ok) = back_substitute(&m, &initial);
    if free.is_empty() {
        if init_ok && init_rem == 0 {
            return Ok(init_sum);
        }
        return Err(SolveError::SolveFailed(
            format!("fully determined system has no exact solution (rem {init_rem})").into(),
        ));
    }
    let worst: i64 = machine.joltage.iter().sum();
    let mut best = if init_ok && init_rem == 0 {
        init_sum
    } else {
        worst
    };
    let mut seen: HashSet<Vals> = HashSet::from([initial]);
    let mut queue: VecDeque<Vals> = VecDeque::from([initial]);
    while let Some(cur) = queue.pop_front() {
        for next in successors(&m, &free, &cur, worst, &seen) {
            seen.insert(next);
            let (sum, rem, ok) = back_substitute(&m, &next);
            if ok && rem == 0 {
                best = best.min(sum);
            }
            if sum < worst && next.iter().sum::<i64>() < best {
                queue.push_back(next);
            }
        }
    }
    Ok(best)
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let mut sum = 0i64;
        for m in input.iter() {
            sum += min_presses_joltage(m)?;
        }
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    const MACHINE: &str = "[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}";

    #[test]
    fn parses_a_machine() {
        let m = parse_machine(MACHINE).unwrap();
        assert_eq!(m.desired, 0b0110);
        assert_eq!(m.buttons, vec![0b1000, 0b1010, 0b0100, 0b1100, 0b0101, 0b0011]);
        assert_eq!(m.joltage, vec![3, 5, 4, 7]);
    }

    #[test]
    fn part1_example_machine() {
        // (1,3) xor (2,3) leaves exactly lights 1 and 2 on
        let mut input = Solver::parse(MACHINE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "2");
    }

    #[test]
    fn part2_example_machine() {
        // every press adds at most 2 joltage and the targets total 19,
        // so 10 presses is a lower bound, and it is achievable
        let mut input = Solver::parse(MACHINE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "10");
    }

    #[test]
    fn single_counter_machine() {
        let mut input = Solver::parse("[#] (0) (0) {2}").unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "1");
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "2");
    }

    #[test]
    fn machines_sum_across_lines() {
        let mut input = Solver::parse(&format!("{MACHINE}\n[#] (0) (0) {{2}}")).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "3");
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "12");
    }

    #[test]
    fn already_satisfied_lights_need_no_presses() {
        let mut input = Solver::parse("[...] (0) (1) {1,1,1}").unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "0");
    }

    #[test]
    fn unreachable_lights_are_an_error() {
        let mut input = Solver::parse("[#.] (1) {1,1}").unwrap();
        assert!(Solver::solve_part(&mut input, 1).is_err());
    }

    #[test]
    fn rejects_malformed_machines() {
        assert!(Solver::parse("[..] (0)").is_err());
        assert!(Solver::parse("(0) (1) {1}").is_err());
        assert!(Solver::parse("[.x.] (0) {1}").is_err());
        assert!(Solver::parse("[#] (40) {1}").is_err());
    }
}
