//! Expected-answer files and pass/fail classification
//!
//! An expected-answer file sits next to an input file and holds one line per
//! part, e.g. `part1: 1234`. Literal `\n` sequences decode to newlines so
//! multi-line ASCII-art answers fit on one line.

use std::collections::HashMap;

/// Classification of a computed answer against the recorded expectation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Answer matches the expectation
    Success,
    /// Expectation is recorded and the answer differs
    Failure,
    /// No expectation recorded for this part
    Unknown,
    /// The solver returned the literal placeholder answer "TODO"
    Todo,
}

impl Outcome {
    /// Classify an answer against an optional expected value.
    ///
    /// A matching expectation wins over the TODO placeholder, so an expected
    /// answer that is literally "TODO" still counts as success.
    pub fn classify(answer: &str, expected: Option<&str>) -> Outcome {
        match expected {
            Some(want) if answer == want => Outcome::Success,
            _ if answer == "TODO" => Outcome::Todo,
            None => Outcome::Unknown,
            Some(_) => Outcome::Failure,
        }
    }

    /// Only failures make a run unsuccessful; unknown and TODO do not.
    pub fn is_failure(self) -> bool {
        self == Outcome::Failure
    }

    /// Upper-case label used in reports
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "SUCCESS",
            Outcome::Failure => "FAILURE",
            Outcome::Unknown => "UNKNOWN",
            Outcome::Todo => "TODO",
        }
    }
}

/// Expected answers for one dataset, keyed by part number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedAnswers {
    parts: HashMap<u8, String>,
}

impl ExpectedAnswers {
    /// Expectations with no recorded answers; everything classifies Unknown
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the `partN: answer` lines of an expected-answer file.
    ///
    /// Lines that don't match the format are ignored, as is an empty answer
    /// (an unanswered `part2: ` stub means the answer is unknown, not "").
    pub fn parse(text: &str) -> Self {
        let mut parts = HashMap::new();
        for line in text.lines() {
            let Some(rest) = line.strip_prefix("part") else {
                continue;
            };
            let Some((num, answer)) = rest.split_once(": ") else {
                continue;
            };
            let Ok(part) = num.parse::<u8>() else {
                continue;
            };
            if !answer.is_empty() {
                parts.insert(part, answer.replace("\\n", "\n"));
            }
        }
        Self { parts }
    }

    /// Get the expected answer for a part, if recorded
    pub fn get(&self, part: u8) -> Option<&str> {
        self.parts.get(&part).map(String::as_str)
    }

    /// True if no part has a recorded answer
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
