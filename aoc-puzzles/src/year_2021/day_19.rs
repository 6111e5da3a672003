//! Beacon scanner: align 3-D point clouds from scanners with unknown
//! positions and orientations.
//!
//! Each scanner reports beacon positions in its own frame, rotated by one of
//! 24 axis-aligned orientations and translated by its position. Two scanners
//! align when some orientation and translation makes at least 12 beacons
//! coincide. Part 1 counts distinct beacons after aligning everything into
//! scanner 0's frame; part 2 is the largest Manhattan distance between two
//! scanner positions.

use std::collections::HashSet;

use anyhow::anyhow;
use aoc_runner::{DaySolver, ParseError, PartSolver, PuzzleParser, RegisterPuzzle, SolveError};

/// Beacons two scanners must share to count as overlapping
const OVERLAP: usize = 12;

#[derive(DaySolver, RegisterPuzzle)]
#[day_solver(parts = 2)]
#[puzzle(year = 2021, day = 19, tags = ["2021", "geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Point {
    x: i32,
    y: i32,
    z: i32,
}

impl Point {
    fn rotate_x(self) -> Point {
        Point {
            x: self.x,
            y: self.z,
            z: -self.y,
        }
    }

    fn rotate_y(self) -> Point {
        Point {
            x: -self.z,
            y: self.y,
            z: self.x,
        }
    }

    fn rotate_z(self) -> Point {
        Point {
            x: self.y,
            y: -self.x,
            z: self.z,
        }
    }

    /// Apply quarter turns around each axis in x, y, z order.
    fn rotate(self, r: Rotation) -> Point {
        let mut q = self;
        for _ in 0..r.x {
            q = q.rotate_x();
        }
        for _ in 0..r.y {
            q = q.rotate_y();
        }
        for _ in 0..r.z {
            q = q.rotate_z();
        }
        q
    }

    fn plus(self, o: Point) -> Point {
        Point {
            x: self.x + o.x,
            y: self.y + o.y,
            z: self.z + o.z,
        }
    }

    fn minus(self, o: Point) -> Point {
        Point {
            x: self.x - o.x,
            y: self.y - o.y,
            z: self.z - o.z,
        }
    }

    fn manhattan(self, o: Point) -> i32 {
        let d = self.minus(o);
        d.x.abs() + d.y.abs() + d.z.abs()
    }
}

/// Quarter-turn counts around each axis
#[derive(Debug, Clone, Copy)]
struct Rotation {
    x: u8,
    y: u8,
    z: u8,
}

impl Rotation {
    const fn new(x: u8, y: u8, z: u8) -> Rotation {
        Rotation { x, y, z }
    }

    fn union(self, o: Rotation) -> Rotation {
        Rotation::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

/// Six ways to face, then four rolls around the x axis, covering the 24
/// rotations of a cube.
const FACES: [Rotation; 6] = [
    Rotation::new(0, 0, 0),
    Rotation::new(0, 1, 0),
    Rotation::new(0, 2, 0),
    Rotation::new(0, 3, 0),
    Rotation::new(0, 0, 1),
    Rotation::new(0, 0, 3),
];
const X_TURNS: [Rotation; 4] = [
    Rotation::new(0, 0, 0),
    Rotation::new(1, 0, 0),
    Rotation::new(2, 0, 0),
    Rotation::new(3, 0, 0),
];

/// A scanner's beacons plus the scanner's own position in the current frame
#[derive(Debug, Clone)]
struct PointSet {
    points: HashSet<Point>,
    origin: Point,
}

impl PointSet {
    fn new(points: HashSet<Point>) -> PointSet {
        PointSet {
            points,
            origin: Point { x: 0, y: 0, z: 0 },
        }
    }

    fn rotate(&self, r: Rotation) -> PointSet {
        PointSet {
            points: self.points.iter().map(|p| p.rotate(r)).collect(),
            origin: self.origin.rotate(r),
        }
    }

    fn all_orientations(&self) -> Vec<PointSet> {
        let mut res = Vec::with_capacity(24);
        for f in FACES {
            for x in X_TURNS {
                res.push(self.rotate(f.union(x)));
            }
        }
        res
    }

    fn offset(&self, p: Point) -> PointSet {
        PointSet {
            points: self.points.iter().map(|q| q.plus(p)).collect(),
            origin: self.origin.plus(p),
        }
    }

    /// Try every translation mapping one of `other`'s points onto one of
    /// ours; return the translated set if at least [`OVERLAP`] points match.
    fn overlap(&self, other: &PointSet) -> Option<PointSet> {
        for &p in &self.points {
            for &q in &other.points {
                let t = other.offset(p.minus(q));
                let matches = t.points.iter().filter(|r| self.points.contains(r)).count();
                if matches >= OVERLAP {
                    return Some(t);
                }
            }
        }
        None
    }
}

pub struct Scan {
    scanners: Vec<PointSet>,
    aligned: Option<Vec<PointSet>>,
}

impl PuzzleParser for Solver {
    type Input<'a> = Scan;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        let mut scanners: Vec<HashSet<Point>> = Vec::new();
        for line in text.lines() {
            if line.contains("scanner") {
                scanners.push(HashSet::new());
            } else if line.contains(',') {
                let coords = line
                    .split(',')
                    .map(|n| n.trim().parse::<i32>().map_err(|e| anyhow!("{n:?}: {e}")))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| ParseError::InvalidFormat(format!("bad beacon {line:?}: {e}")))?;
                let &[x, y, z] = &coords[..] else {
                    return Err(ParseError::InvalidFormat(format!(
                        "expected x,y,z: {line:?}"
                    )));
                };
                scanners
                    .last_mut()
                    .ok_or_else(|| {
                        ParseError::MissingData("beacon line before any scanner header".into())
                    })?
                    .insert(Point { x, y, z });
            }
        }
        if scanners.is_empty() {
            return Err(ParseError::MissingData("no scanners in input".into()));
        }
        Ok(Scan {
            scanners: scanners.into_iter().map(PointSet::new).collect(),
            aligned: None,
        })
    }
}

/// Fix scanner 0's frame and grow the set of aligned scanners until every
/// scanner overlaps something already aligned. Checked pairs are cached so
/// each (scanner, anchor) combination is tried once.
fn align(scanners: &[PointSet]) -> Result<Vec<PointSet>, SolveError> {
    let orientations: Vec<Vec<PointSet>> =
        scanners.iter().map(PointSet::all_orientations).collect();
    let mut found: Vec<Option<PointSet>> = vec![None; scanners.len()];
    found[0] = Some(scanners[0].clone());
    let mut checked: HashSet<(usize, usize)> = HashSet::new();
    let mut remaining = scanners.len() - 1;
    while remaining > 0 {
        let mut this_pass = 0;
        'each_scanner: for i in 0..scanners.len() {
            if found[i].is_some() {
                continue;
            }
            for j in 0..scanners.len() {
                if i == j || checked.contains(&(i, j)) {
                    continue;
                }
                let Some(source) = found[j].clone() else {
                    continue;
                };
                checked.insert((i, j));
                for orient in &orientations[i] {
                    if let Some(t) = source.overlap(orient) {
                        found[i] = Some(t);
                        remaining -= 1;
                        this_pass += 1;
                        continue 'each_scanner;
                    }
                }
            }
        }
        if this_pass == 0 {
            return Err(SolveError::SolveFailed(
                format!(
                    "couldn't align any more scanners after {} matches",
                    scanners.len() - remaining
                )
                .into(),
            ));
        }
    }
    Ok(found.into_iter().flatten().collect())
}

fn aligned(input: &mut Scan) -> Result<&[PointSet], SolveError> {
    let sets = match input.aligned.take() {
        Some(sets) => sets,
        None => align(&input.scanners)?,
    };
    Ok(input.aligned.insert(sets))
}

impl PartSolver<1> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let mut all: HashSet<Point> = HashSet::new();
        for set in aligned(input)? {
            all.extend(set.points.iter().copied());
        }
        Ok(all.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let sets = aligned(input)?;
        let mut max = 0;
        for a in sets {
            for b in sets {
                max = max.max(a.origin.manhattan(b.origin));
            }
        }
        Ok(max.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_runner::PuzzleSolver;
    use std::fmt::Write;

    #[test]
    fn quarter_turns() {
        let p = Point { x: 1, y: 2, z: 3 };
        assert_eq!(p.rotate_x(), Point { x: 1, y: 3, z: -2 });
        assert_eq!(p.rotate_y(), Point { x: -3, y: 2, z: 1 });
        assert_eq!(p.rotate_z(), Point { x: 2, y: -1, z: 3 });
        // four turns come back around
        assert_eq!(p.rotate(Rotation::new(4, 0, 0)), p);
        assert_eq!(p.rotate(Rotation::new(0, 4, 0)), p);
        assert_eq!(p.rotate(Rotation::new(0, 0, 4)), p);
    }

    #[test]
    fn twenty_four_distinct_orientations() {
        let mut points = HashSet::new();
        points.insert(Point { x: 1, y: 2, z: 3 });
        let set = PointSet::new(points);
        let seen: HashSet<Vec<(i32, i32, i32)>> = set
            .all_orientations()
            .iter()
            .map(|s| s.points.iter().map(|p| (p.x, p.y, p.z)).collect())
            .collect();
        assert_eq!(seen.len(), 24);
    }

    fn base_points() -> Vec<Point> {
        [
            (0, 0, 0),
            (1, 2, 3),
            (4, -5, 6),
            (-7, 8, -9),
            (10, 11, -12),
            (-13, -14, 15),
            (2, 4, 8),
            (3, -6, 9),
            (-1, 5, -2),
            (6, 7, 1),
            (-8, 2, 4),
            (9, -3, -7),
            (5, 5, 5),
        ]
        .iter()
        .map(|&(x, y, z)| Point { x, y, z })
        .collect()
    }

    /// Render two scanners: the base beacons, and the same beacons rotated
    /// and translated into a second scanner's frame.
    fn two_scanner_input(rot: Rotation, offset: Point) -> String {
        let mut text = String::from("--- scanner 0 ---\n");
        for p in base_points() {
            writeln!(text, "{},{},{}", p.x, p.y, p.z).unwrap();
        }
        text.push_str("\n--- scanner 1 ---\n");
        for p in base_points() {
            let q = p.rotate(rot).plus(offset);
            writeln!(text, "{},{},{}", q.x, q.y, q.z).unwrap();
        }
        text
    }

    #[test]
    fn aligns_a_rotated_translated_scanner() {
        let text = two_scanner_input(
            Rotation::new(1, 2, 3),
            Point {
                x: 100,
                y: -200,
                z: 300,
            },
        );
        let mut input = Solver::parse(&text).unwrap();
        // every beacon is shared, so the union is just the base set
        assert_eq!(Solver::solve_part(&mut input, 1).unwrap(), "13");
        // rotations preserve Manhattan length, so the recovered scanner
        // distance is the offset's
        assert_eq!(Solver::solve_part(&mut input, 2).unwrap(), "600");
    }

    #[test]
    fn unalignable_scanners_fail() {
        let text = "--- scanner 0 ---\n0,0,0\n1,1,1\n\n--- scanner 1 ---\n500,500,500\n";
        let mut input = Solver::parse(&text).unwrap();
        assert!(Solver::solve_part(&mut input, 1).is_err());
    }

    #[test]
    fn rejects_malformed_beacons() {
        assert!(Solver::parse("--- scanner 0 ---\n1,2\n").is_err());
        assert!(Solver::parse("--- scanner 0 ---\n1,2,zebra\n").is_err());
        assert!(Solver::parse("1,2,3\n").is_err());
    }
}
