//! Output formatting for solver results

use crate::executor::SolverResult;
use aoc_runner::Outcome;
use chrono::TimeDelta;

/// ANSI palette for outcome labels, matching the classic harness colors
const COLOR_SUCCESS: &str = "30;102"; // black on bright green
const COLOR_FAILURE: &str = "30;101"; // black on bright red
const COLOR_UNKNOWN: &str = "30;103"; // black on bright yellow
const COLOR_TODO: &str = "30;106"; // black on bright cyan

/// Output formatter for solver results
pub struct OutputFormatter {
    verbose: bool,
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        if self.quiet {
            self.print_quiet(result);
        } else {
            self.print_full(result);
        }
    }

    /// Print in quiet mode (just the answer)
    fn print_quiet(&self, result: &SolverResult) {
        match &result.answer {
            Ok(answer) => println!("{}", answer),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    /// Print full output with timing and outcome info
    fn print_full(&self, result: &SolverResult) {
        let prefix = format!(
            "{}/day{:02} {} part{}",
            result.year, result.day, result.label, result.part
        );

        match &result.answer {
            Ok(answer) => {
                let parse_timing = result
                    .parse_duration
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default();
                let solve_timing = format_duration(result.solve_duration);

                let outcome = Outcome::classify(answer, result.expected.as_deref());
                println!(
                    "{}: {} ({}solve: {}) {}",
                    prefix,
                    answer,
                    parse_timing,
                    solve_timing,
                    format_outcome(outcome, answer, result.expected.as_deref())
                );
                if self.verbose {
                    eprintln!("{} took {}", prefix, format_duration(result.solve_duration));
                }
            }
            Err(e) => {
                eprintln!("{}: Error - {}", prefix, e);
            }
        }
    }

    /// Print a summary after all results
    /// Shows both total compute time (sum of durations) and actual
    /// elapsed wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let outcomes: Vec<Option<Outcome>> = results
            .iter()
            .map(|r| {
                r.answer
                    .as_ref()
                    .ok()
                    .map(|answer| Outcome::classify(answer, r.expected.as_deref()))
            })
            .collect();
        let count =
            |want: Outcome| outcomes.iter().flatten().filter(|&&o| o == want).count();
        let errors = outcomes.iter().filter(|o| o.is_none()).count();

        let total_parse_time = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .filter_map(|r| r.parse_duration)
            .fold(TimeDelta::zero(), |acc, d| acc + d);
        let total_solve_time = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .map(|r| r.solve_duration)
            .fold(TimeDelta::zero(), |acc, d| acc + d);
        let total_compute_time = total_parse_time + total_solve_time;
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Parts: {} succeeded, {} failed, {} unknown, {} todo, {} errored",
            count(Outcome::Success),
            count(Outcome::Failure),
            count(Outcome::Unknown),
            count(Outcome::Todo),
            errors
        );
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let total_compute_secs =
                total_compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            let speedup = total_compute_secs / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// True if any part failed its expected answer or errored out
pub fn has_failures(results: &[SolverResult]) -> bool {
    results.iter().any(|r| match &r.answer {
        Ok(answer) => Outcome::classify(answer, r.expected.as_deref()).is_failure(),
        Err(_) => true,
    })
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

fn colored(color: &str, s: &str) -> String {
    format!("\x1B[{}m{}\x1B[0m", color, s)
}

/// Format an outcome for display, in the classic harness's shape
fn format_outcome(outcome: Outcome, answer: &str, expected: Option<&str>) -> String {
    match outcome {
        Outcome::Success => format!("✅ {}", colored(COLOR_SUCCESS, outcome.label())),
        Outcome::Failure => format!(
            "❌ {} want {}",
            colored(COLOR_FAILURE, outcome.label()),
            expected.unwrap_or_default()
        ),
        Outcome::Unknown => format!("❓ {}", colored(COLOR_UNKNOWN, outcome.label())),
        Outcome::Todo => {
            let mut msg = format!("❗ {} implement it", colored(COLOR_TODO, outcome.label()));
            if let Some(want) = expected
                && want != answer
            {
                msg.push_str(&format!(", want {}", want));
            }
            msg
        }
    }
}
