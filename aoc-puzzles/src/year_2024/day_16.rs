//! Reindeer maze: cheapest path with expensive turns.
//!
//! The grid is walled; S is the start (facing east), E the end. Stepping
//! forward costs 1, turning left or right costs 1000. Part 1 is the cost of
//! a cheapest path. Part 2 counts the squares lying on any cheapest path,
//! found by tracking every equal-cost parent during the Dijkstra sweep and
//! walking the parents back from the end state.

use std::collections::{HashMap, HashSet};

use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2024, day = 16, tags = ["2024", "grid", "dijkstra"])]
pub struct Solver;

const STEP_COST: u32 = 1;
const TURN_COST: u32 = 1000;

/// East, south, west, north; turning right adds 1, left adds 3
const DELTAS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct State {
    row: i32,
    col: i32,
    dir: u8,
}

impl State {
    fn forward(self) -> State {
        let (dr, dc) = DELTAS[self.dir as usize];
        State {
            row: self.row + dr,
            col: self.col + dc,
            dir: self.dir,
        }
    }

    fn turn_right(self) -> State {
        State {
            dir: (self.dir + 1) % 4,
            ..self
        }
    }

    fn turn_left(self) -> State {
        State {
            dir: (self.dir + 3) % 4,
            ..self
        }
    }
}

/// Cheapest known cost to a state plus every parent achieving it
struct Provenance {
    cost: u32,
    parents: Vec<State>,
}

impl Provenance {
    fn maybe_add(&mut self, parent: State, cost: u32) {
        if self.cost > cost {
            self.cost = cost;
            self.parents = vec![parent];
        } else if self.cost == cost {
            self.parents.push(parent);
        }
    }
}

/// Cost-bucket Dijkstra state: the frontier, best known costs, and the
/// equal-cost parent links part 2 walks back.
#[derive(Default)]
struct Sweep {
    queue: HashMap<u32, Vec<State>>,
    visited: HashMap<State, u32>,
    provenance: HashMap<State, Provenance>,
    highest: u32,
}

impl Sweep {
    fn add(&mut self, v: State, prev: Option<State>, cost: u32) {
        let p = self.provenance.entry(v).or_insert(Provenance {
            cost,
            parents: Vec::new(),
        });
        if let Some(prev) = prev {
            p.maybe_add(prev, cost);
        }
        if self.visited.get(&v).is_none_or(|&c| cost < c) {
            self.visited.insert(v, cost);
            self.queue.entry(cost).or_default().push(v);
            self.highest = self.highest.max(cost);
        }
    }
}

struct Solved {
    cheapest: u32,
    end: State,
    provenance: HashMap<State, Provenance>,
}

pub struct Maze<'a> {
    grid: Vec<&'a [u8]>,
    start: State,
}

impl Maze<'_> {
    fn at(&self, row: i32, col: i32) -> u8 {
        self.grid[row as usize][col as usize]
    }

    fn is_open(&self, s: State) -> bool {
        self.at(s.row, s.col) != b'#'
    }

    fn is_end(&self, s: State) -> bool {
        self.at(s.row, s.col) == b'E'
    }

    fn solve(&self) -> Result<Solved, SolveError> {
        let mut sweep = Sweep::default();
        sweep.add(self.start, None, 0);
        let mut cheapest = 0u32;
        loop {
            let Some(batch) = sweep.queue.remove(&cheapest) else {
                if cheapest > sweep.highest {
                    return Err(SolveError::SolveFailed("no path to the end".into()));
                }
                cheapest += 1;
                continue;
            };
            for v in batch {
                if self.is_end(v) {
                    return Ok(Solved {
                        cheapest,
                        end: v,
                        provenance: sweep.provenance,
                    });
                }
                let straight = v.forward();
                if self.is_open(straight) {
                    sweep.add(straight, Some(v), cheapest + STEP_COST);
                }
                // turns stay on the square, so they're always open
                sweep.add(v.turn_left(), Some(v), cheapest + TURN_COST);
                sweep.add(v.turn_right(), Some(v), cheapest + TURN_COST);
            }
        }
    }
}

impl PuzzleParser for Solver {
    type Input<'a> = Maze<'a>;

    fn parse<'a>(text: &'a str) -> Result<Self::Input<'a>, ParseError> {
        let grid: Vec<&[u8]> = text
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::as_bytes)
            .collect();
        let mut start = None;
        for (r, row) in grid.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                match cell {
                    b'S' => {
                        start = Some(State {
                            row: r as i32,
                            col: c as i32,
                            dir: 0,
                        });
                    }
                    b'E' | b'#' | b'.' => {}
                    other => {
                        return Err(ParseError::InvalidFormat(format!(
                            "unexpected {:?} in maze",
                            other as char
                        )));
                    }
                }
            }
        }
        let start = start.ok_or_else(|| ParseError::MissingData("no S in maze".into()))?;
        Ok(Maze { grid, start })
    }
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        Ok(input.solve()?.cheapest.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let solved = input.solve()?;
        let mut squares: HashSet<(i32, i32)> = HashSet::new();
        let mut walked: HashSet<State> = HashSet::new();
        let mut pending = vec![solved.end];
        while let Some(v) = pending.pop() {
            if !walked.insert(v) {
                continue;
            }
            squares.insert((v.row, v.col));
            if let Some(p) = solved.provenance.get(&v) {
                pending.extend(p.parents.iter().copied());
            }
        }
        Ok(squares.len().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    const FIRST_EXAMPLE: &str = "\
###############
#.......#....E#
#.#.###.#.###.#
#.....#.#...#.#
#.###.#####.#.#
#.#.#.......#.#
#.#.#####.###.#
#...........#.#
###.#.#####.#.#
#...#.....#.#.#
#.#.#.###.#.#.#
#.....#...#.#.#
#.###.#.#.#.#.#
#S..#.....#...#
###############";

    const SECOND_EXAMPLE: &str = "\
#################
#...#...#...#..E#
#.#.#.#.#.#.#.#.#
#.#.#.#...#...#.#
#.#.#.#.###.#.#.#
#...#.#.#.....#.#
#.#.#.#.#.#####.#
#.#...#.#.#.....#
#.#.#####.#.###.#
#.#.#.......#...#
#.#.###.#####.###
#.#.#...#.....#.#
#.#.#.#####.###.#
#.#.#.........#.#
#.#.#.#########.#
#S#.............#
#################";

    #[test]
    fn part1_examples() {
        let mut input = Solver::parse(FIRST_EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "7036");
        let mut input = Solver::parse(SECOND_EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "11048");
    }

    #[test]
    fn part2_examples() {
        let mut input = Solver::parse(FIRST_EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "45");
        let mut input = Solver::parse(SECOND_EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "64");
    }

    #[test]
    fn straight_corridor_costs_its_length() {
        let mut input = Solver::parse("#####\n#S.E#\n#####").unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "2");
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "3");
    }

    #[test]
    fn turning_in_place_is_allowed() {
        // the only way out is behind the start
        let mut input = Solver::parse("#####\n#E.S#\n#####").unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "2002");
    }

    #[test]
    fn walled_off_end_is_an_error() {
        let mut input = Solver::parse("#####\n#S#E#\n#####").unwrap();
        assert!(Solver::solve_part(&mut input, 1).is_err());
    }
}
