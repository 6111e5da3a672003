use aoc_runner::{
    DaySolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, PuzzleSolverExt, SolveError,
};

#[derive(DaySolver)]
#[day_solver(parts = 2)]
struct TwoParts;

impl PuzzleParser for TwoParts {
    type Input<'a> = Vec<i32>;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        text.lines()
            .map(|line| {
                line.trim()
                    .parse::<i32>()
                    .map_err(|_| ParseError::InvalidFormat("Expected integer".into()))
            })
            .collect()
    }
}

impl PartSolver<1> for TwoParts {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        Ok(input.iter().sum::<i32>().to_string())
    }
}

impl PartSolver<2> for TwoParts {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        Ok(input.iter().product::<i32>().to_string())
    }
}

#[test]
fn dispatches_parts_to_impls() {
    let mut input = TwoParts::parse("1\n2\n3\n4").unwrap();
    assert_eq!(TwoParts::solve_part(&mut input, 1).unwrap(), "10");
    assert_eq!(TwoParts::solve_part(&mut input, 2).unwrap(), "24");
    assert_eq!(TwoParts::PARTS, 2);
}

#[test]
fn unimplemented_part_is_an_error() {
    let mut input = TwoParts::parse("1").unwrap();
    assert!(matches!(
        TwoParts::solve_part(&mut input, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
    assert!(matches!(
        TwoParts::solve_part_bounded(&mut input, 3),
        Err(SolveError::PartOutOfRange(3))
    ));
}

// Parts default to 2 when the attribute is omitted
#[derive(DaySolver)]
struct DefaultParts;

impl PuzzleParser for DefaultParts {
    type Input<'a> = &'a str;

    fn parse<'a>(text: &'a str) -> Result<Self::Input<'a>, ParseError> {
        Ok(text)
    }
}

impl PartSolver<1> for DefaultParts {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        Ok(input.len().to_string())
    }
}

impl PartSolver<2> for DefaultParts {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        Ok(input.chars().rev().collect())
    }
}

#[test]
fn parts_attribute_defaults_to_two() {
    assert_eq!(DefaultParts::PARTS, 2);
    let mut input = DefaultParts::parse("abc").unwrap();
    assert_eq!(DefaultParts::solve_part(&mut input, 2).unwrap(), "cba");
}

// Part 2 reuses an intermediate computed by part 1
#[derive(DaySolver)]
#[day_solver(parts = 2)]
struct SharedWork;

struct Counted {
    values: Vec<u32>,
    total: Option<u32>,
}

impl PuzzleParser for SharedWork {
    type Input<'a> = Counted;

    fn parse(text: &str) -> Result<Self::Input<'_>, ParseError> {
        let values = text
            .lines()
            .map(|l| {
                l.parse::<u32>()
                    .map_err(|_| ParseError::InvalidFormat(l.to_string()))
            })
            .collect::<Result<_, _>>()?;
        Ok(Counted {
            values,
            total: None,
        })
    }
}

fn total(input: &mut Counted) -> u32 {
    *input
        .total
        .get_or_insert_with(|| input.values.iter().sum())
}

impl PartSolver<1> for SharedWork {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        Ok(total(input).to_string())
    }
}

impl PartSolver<2> for SharedWork {
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
        Ok((total(input) * 2).to_string())
    }
}

#[test]
fn parts_share_cached_intermediate() {
    let mut input = SharedWork::parse("5\n6").unwrap();
    assert_eq!(SharedWork::solve_part(&mut input, 1).unwrap(), "11");
    assert!(input.total.is_some());
    assert_eq!(SharedWork::solve_part(&mut input, 2).unwrap(), "22");
}
