//! LAN party: triangles and the largest clique in the connection graph.
//!
//! Input lines `ab-cd` are undirected connections between computers. Part 1
//! counts sets of three fully-connected computers where a name starts with
//! 't'. Part 2 finds the largest fully-connected set: candidate sets (each
//! edge's common-neighbor set plus its endpoints) go into a largest-first
//! queue and shrink one member at a time until one is a clique; its sorted,
//! comma-joined names are the answer.

use std::collections::{BTreeSet, HashMap, HashSet};

use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};
use itertools::Itertools;

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2024, day = 23, tags = ["2024", "graph"])]
pub struct Solver;

type Network<'a> = HashMap<&'a str, HashSet<&'a str>>;

impl PuzzleParser for Solver {
    type Input<'a> = Network<'a>;

    fn parse<'a>(text: &'a str) -> Result<Self::Input<'a>, ParseError> {
        let mut network: Network<'a> = HashMap::new();
        for line in text.lines().filter(|l| !l.is_empty()) {
            let (a, b) = line
                .split_once('-')
                .ok_or_else(|| ParseError::InvalidFormat(format!("bad connection {line:?}")))?;
            network.entry(a).or_default().insert(b);
            network.entry(b).or_default().insert(a);
        }
        if network.is_empty() {
            return Err(ParseError::MissingData("no connections".into()));
        }
        Ok(network)
    }
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let mut seen: HashSet<Vec<&str>> = HashSet::new();
        for (&a, neighbors) in input.iter() {
            if !a.starts_with('t') {
                continue;
            }
            for &b in neighbors {
                for &c in &input[b] {
                    if neighbors.contains(c) {
                        seen.insert([a, b, c].iter().copied().sorted().collect());
                    }
                }
            }
        }
        Ok(seen.len().to_string())
    }
}

fn fully_connected(network: &Network, set: &BTreeSet<&str>) -> bool {
    set.iter().all(|&k| {
        let neighbors = &network[k];
        set.iter().all(|&x| x == k || neighbors.contains(x))
    })
}

fn set_key(set: &BTreeSet<&str>) -> String {
    set.iter().join(",")
}

/// Queue of candidate sets bucketed by size, popped biggest first
#[derive(Default)]
struct SetQueue<'a> {
    sets: Vec<Vec<BTreeSet<&'a str>>>,
    biggest: usize,
}

impl<'a> SetQueue<'a> {
    fn add(&mut self, set: BTreeSet<&'a str>) {
        while set.len() >= self.sets.len() {
            self.sets.push(Vec::new());
            self.biggest = set.len();
        }
        let size = set.len();
        self.sets[size].push(set);
    }

    fn pop(&mut self) -> Option<BTreeSet<&'a str>> {
        let popped = self.sets.get_mut(self.biggest)?.pop()?;
        while self.biggest > 0 && self.sets[self.biggest].is_empty() {
            self.biggest -= 1;
        }
        Some(popped)
    }
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let mut queue = SetQueue::default();
        let mut seen: HashSet<String> = HashSet::new();
        for (&k, neighbors) in input.iter() {
            for &v in neighbors {
                let pair_key = if k < v {
                    format!("{k},{v}")
                } else {
                    format!("{v},{k}")
                };
                if seen.insert(pair_key) {
                    let mut set: BTreeSet<&str> =
                        neighbors.intersection(&input[v]).copied().collect();
                    set.insert(k);
                    set.insert(v);
                    queue.add(set);
                }
            }
        }
        while let Some(set) = queue.pop() {
            if fully_connected(input, &set) {
                return Ok(set_key(&set));
            }
            for &k in &set {
                let mut smaller = set.clone();
                smaller.remove(k);
                if seen.insert(set_key(&smaller)) {
                    queue.add(smaller);
                }
            }
        }
        Err(SolveError::SolveFailed(
            "ran out of candidate sets without finding a clique".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;

    const EXAMPLE: &str = "\
kh-tc
qp-kh
de-cg
ka-co
yn-aq
qp-ub
cg-tb
vc-aq
tb-ka
wh-tc
yn-cg
kh-ub
ta-co
de-co
tc-td
tb-wq
wh-td
ta-ka
td-qp
aq-cg
wq-ub
ub-vc
de-ta
wq-aq
wq-vc
wh-yn
ka-de
kh-ta
co-tc
wh-qp
tb-vc
td-yn";

    #[test]
    fn part1_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "7");
    }

    #[test]
    fn part2_example() {
        let mut input = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "co,de,ka,ta");
    }

    #[test]
    fn triangle_without_t_does_not_count() {
        let mut input = Solver::parse("ab-cd\ncd-ef\nef-ab").unwrap();
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "0");
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "ab,cd,ef");
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(Solver::parse("abcd").is_err());
    }
}
