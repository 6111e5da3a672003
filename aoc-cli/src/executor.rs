//! Parallel executor for running solvers over stored datasets

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::store::DatasetStore;
use aoc_runner::{DynPuzzle, ExpectedAnswers, PuzzleRegistry, SolverError};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver execution on one dataset part
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub label: String,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    /// Recorded expected answer for this part, if any
    pub expected: Option<String>,
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item: one solver run over one dataset
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub label: String,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    shared: SharedExecutorState,
    thread_pool: rayon::ThreadPool,
}

/// State shared with worker closures across the thread pool
struct SharedExecutorState {
    registry: PuzzleRegistry,
    store: DatasetStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
    label_filter: Option<String>,
    verbose: bool,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(
        registry: PuzzleRegistry,
        store: DatasetStore,
        config: &Config,
    ) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            shared: SharedExecutorState {
                registry,
                store,
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
                label_filter: config.label_filter.clone(),
                verbose: config.verbose,
            },
            thread_pool,
        })
    }

    /// Registered solvers matching the year/day filters but with no
    /// datasets on disk, reported so missing inputs don't pass silently
    pub fn missing_datasets(&self) -> Result<Vec<(u16, u8)>, ExecutorError> {
        let mut missing = Vec::new();
        for info in self.filtered_info() {
            if self.labels_for(info.year, info.day)?.is_empty() {
                missing.push((info.year, info.day));
            }
        }
        Ok(missing)
    }

    /// Collect work items: filtered registry entries crossed with the
    /// datasets present on disk
    pub fn collect_work_items(&self) -> Result<Vec<WorkItem>, ExecutorError> {
        let mut work = Vec::new();
        for info in self.filtered_info() {
            let parts = self.filter_parts(info.parts);
            if parts.is_empty() {
                continue;
            }
            for label in self.labels_for(info.year, info.day)? {
                work.push(WorkItem {
                    year: info.year,
                    day: info.day,
                    label,
                    parts: parts.clone(),
                });
            }
        }
        Ok(work)
    }

    fn filtered_info(&self) -> impl Iterator<Item = aoc_runner::PuzzleInfo> + '_ {
        let cfg = &self.shared;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
    }

    fn labels_for(&self, year: u16, day: u8) -> Result<Vec<String>, ExecutorError> {
        let labels = self
            .shared
            .store
            .labels(year, day)
            .map_err(|e| ExecutorError::InputRead {
                year,
                day,
                label: "*".to_string(),
                source: Box::new(e),
            })?;
        Ok(labels
            .into_iter()
            .filter(|label| self.shared.label_filter.as_ref().is_none_or(|l| l == label))
            .collect())
    }

    /// Filter parts based on config.part_filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.shared.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0, // Empty range - intentional
            None => 1..=max_parts,
        }
    }

    /// Execute all work items and stream results to the channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items().map_err(ArcExecutorError::from)?;

        match self.shared.parallelize_by {
            ParallelizeBy::Sequential => {
                // No parallelization, execute all in order
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_solver(&work, &tx, &self.shared) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                // Group by year, parallelize years using the configured pool
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Day and Part both parallelize across all work items (Part
            // additionally splits within run_solver)
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let shared = &self.shared;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_solver(&work, tx, shared).err())
                .reduce_with(|err1, err2| {
                    err1.map(|err1| ArcExecutorError::combine_opt(err2, err1))
                })
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for year-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let shared = &self.shared;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_solver(&work, tx, shared) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| {
                    err1.map(|err1| ArcExecutorError::combine_opt(err2, err1))
                })
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }
}

/// Create an error result for a part that never got to run
fn make_error_result(work: &WorkItem, part: u8, error: &ArcExecutorError) -> SolverResult {
    SolverResult {
        year: work.year,
        day: work.day,
        label: work.label.clone(),
        part,
        answer: Err(SolverError::ParseError(aoc_runner::ParseError::Other(
            error.to_string(),
        ))),
        expected: None,
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
    }
}

/// Run one work item: read the dataset, solve its parts, attach expected
/// answers, stream results
fn run_solver(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    shared: &SharedExecutorState,
) -> Result<(), ArcExecutorError> {
    let loaded = shared
        .store
        .read_input(work.year, work.day, &work.label)
        .and_then(|input| {
            let expected = shared.store.read_expected(work.year, work.day, &work.label)?;
            Ok((input, expected))
        })
        .map_err(|e| {
            ArcExecutorError::from(ExecutorError::InputRead {
                year: work.year,
                day: work.day,
                label: work.label.clone(),
                source: Box::new(e),
            })
        });
    let (input, expected) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            // Report the failure once per part so the aggregator stays whole
            for part in work.parts.clone() {
                tx.send(make_error_result(work, part, &e))
                    .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))?;
            }
            return Ok(());
        }
    };

    if shared.verbose {
        eprintln!(
            "Running {}/day{:02} on {} ({} lines)",
            work.year,
            work.day,
            work.label,
            input.lines().count()
        );
    }

    if matches!(shared.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, &expected, tx, shared)
    } else {
        run_parts_sequential(work, &input, &expected, tx, shared)
    }
}

/// Solve parts in parallel, buffering results to emit in part order. Each
/// part re-parses through its own solver instance, trading parse work for
/// part-level parallelism.
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    expected: &ExpectedAnswers,
    tx: &Sender<SolverResult>,
    shared: &SharedExecutorState,
) -> Result<(), ArcExecutorError> {
    let (result_tx, result_rx) = std::sync::mpsc::channel();
    work.parts
        .clone()
        .into_par_iter()
        .for_each_with(result_tx, |rtx, part| {
            let result = match shared.registry.create(work.year, work.day, input) {
                Ok(mut solver) => solve_part(work, part, expected, &mut *solver),
                Err(e) => SolverResult {
                    year: work.year,
                    day: work.day,
                    label: work.label.clone(),
                    part,
                    answer: Err(e),
                    expected: expected.get(part).map(str::to_string),
                    parse_duration: None,
                    solve_duration: TimeDelta::zero(),
                },
            };
            rtx.send(result).ok();
        });

    // Buffer and emit results in part order
    let mut buffer: [Option<SolverResult>; 2] = [None, None];
    let start_part = *work.parts.start();
    let mut next_part = start_part;

    for result in result_rx {
        let idx = (result.part - start_part) as usize;
        if idx < buffer.len() {
            buffer[idx] = Some(result);
        }
        while let Some(result) = buffer
            .get_mut((next_part - start_part) as usize)
            .and_then(Option::take)
        {
            tx.send(result)
                .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))?;
            next_part += 1;
        }
    }
    Ok(())
}

/// Solve parts in order on one solver instance, streaming each result as
/// it lands
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    expected: &ExpectedAnswers,
    tx: &Sender<SolverResult>,
    shared: &SharedExecutorState,
) -> Result<(), ArcExecutorError> {
    match shared.registry.create(work.year, work.day, input) {
        Ok(mut solver) => {
            for part in work.parts.clone() {
                tx.send(solve_part(work, part, expected, &mut *solver))
                    .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))?;
            }
        }
        Err(e) => {
            // Parsing failed; report once per part
            let e = ArcExecutorError::from(ExecutorError::from(e));
            for part in work.parts.clone() {
                tx.send(make_error_result(work, part, &e))
                    .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))?;
            }
        }
    }
    Ok(())
}

/// Solve a single part with timing and expected-answer lookup
fn solve_part(
    work: &WorkItem,
    part: u8,
    expected: &ExpectedAnswers,
    solver: &mut dyn DynPuzzle,
) -> SolverResult {
    let solved = solver.solve(part);
    let (answer, solve_duration) = match solved {
        Ok(result) => {
            let duration = result.duration();
            (Ok(result.answer), duration)
        }
        Err(e) => (Err(SolverError::from(e)), TimeDelta::zero()),
    };

    SolverResult {
        year: work.year,
        day: work.day,
        label: work.label.clone(),
        part,
        answer,
        expected: expected.get(part).map(str::to_string),
        parse_duration: Some(solver.parse_duration()),
        solve_duration,
    }
}
