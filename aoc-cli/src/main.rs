//! AOC CLI - run Advent of Code solvers against stored inputs and check
//! their answers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod output;
mod store;

// Import aoc-puzzles to link the solver plugins
use aoc_puzzles as _;

use aoc_runner::RegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use executor::Executor;
use output::OutputFormatter;
use store::DatasetStore;

fn main() {
    let args = Args::parse();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns Ok(true) when everything ran and nothing failed its expected
/// answer
fn run(args: Args) -> Result<bool, error::CliError> {
    let config = Config::from_args(args);

    // Build registry with tag filtering (only once)
    let registry = build_registry(&config.tags)?;

    let store = DatasetStore::new(config.data_dir.clone());
    let executor = Executor::new(registry, store, &config)
        .map_err(|e| error::CliError::Config(e.to_string()))?;

    // Solvers that match the filters but have nothing on disk to run on
    let missing = executor
        .missing_datasets()
        .map_err(|e| error::CliError::Executor(e.into()))?;
    if !missing.is_empty() && !config.quiet {
        println!("No datasets for {} solver(s) under {}:", missing.len(), config.data_dir.display());
        for (year, day) in &missing {
            println!("  - {}/day{:02}", year, day);
        }
    }

    let work_items = executor
        .collect_work_items()
        .map_err(|e| error::CliError::Executor(e.into()))?;
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(true);
    }

    run_executor(executor, work_items, &config)
}

/// Run the executor, print results in order, and report overall success
fn run_executor(
    executor: Executor,
    work_items: Vec<executor::WorkItem>,
    config: &Config,
) -> Result<bool, error::CliError> {
    if !config.quiet {
        println!("Running {} solver dataset(s)...", work_items.len());
    }

    // Build expected keys for result aggregation
    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(|p| aggregator::ResultKey {
                year: w.year,
                day: w.day,
                label: w.label.clone(),
                part: p,
            })
        })
        .collect();

    // Set up result channel
    let (tx, rx) = std::sync::mpsc::channel();

    // Run executor in background thread
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    // Collect and display results in order using the aggregator
    let formatter = OutputFormatter::new(config.verbose, config.quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        // Add to aggregator and print any results that are ready (in order)
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    // Drain any remaining buffered results (shouldn't happen if all results arrived)
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    // Verify all expected results were received
    if !aggregator.is_complete() {
        eprintln!("Warning: Not all expected results were received");
    }

    // Wait for executor to finish
    executor_handle
        .join()
        .map_err(|_| error::CliError::Config("Executor thread panicked".to_string()))?
        .map_err(error::CliError::Executor)?;

    // Print summary
    formatter.print_summary(&results);

    Ok(!output::has_failures(&results))
}

/// Build registry from linked plugins, with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_runner::PuzzleRegistry, error::CliError> {
    let builder = RegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
