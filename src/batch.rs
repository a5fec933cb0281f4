use serde::Serialize;
use tracing::info;

use crate::engine::{run_simulation_summary, validate_config};
use crate::error::{Error, Result};
use crate::metrics::MetricsCollector;
use crate::models::SimConfig;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchRow {
    pub run_index: usize,
    pub seed: u64,
    pub total_calls: usize,
    pub completed: usize,
    pub avg_wait: f64,
    pub max_wait: f64,
    pub avg_duration: f64,
}

/// Figures pooled over every sample of every run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchAggregate {
    pub runs: usize,
    pub avg_total_calls: f64,
    pub avg_wait: f64,
    pub max_wait: f64,
    pub avg_duration: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct BatchReport {
    pub base_seed: u64,
    pub rows: Vec<BatchRow>,
    pub aggregate: BatchAggregate,
}

/// Runs `config.batch.runs` independent simulations seeded
/// `base_seed + i`.
pub fn run_batch(config: &SimConfig) -> Result<BatchReport> {
    validate_config(config)?;
    if config.batch.runs == 0 {
        return Err(Error::RunsZero);
    }
    let base_seed = config.batch.base_seed;
    let runs = config.batch.runs;

    let mut pooled = MetricsCollector::new();
    let mut total_calls = 0usize;
    let mut rows = Vec::with_capacity(runs);
    for run_index in 0..runs {
        let seed = base_seed.wrapping_add(run_index as u64);
        let outcome = run_simulation_summary(config, seed)?;
        info!(run_index, seed, total_calls = outcome.total_calls, "batch run done");

        for (wait, duration) in outcome.waits.iter().zip(&outcome.durations) {
            pooled.record(*wait, *duration);
        }
        total_calls += outcome.total_calls;

        rows.push(BatchRow {
            run_index,
            seed,
            total_calls: outcome.total_calls,
            completed: outcome.summary.count,
            avg_wait: outcome.summary.mean_wait,
            max_wait: outcome.summary.max_wait,
            avg_duration: outcome.summary.mean_duration,
        });
    }

    let summary = pooled.summary();
    Ok(BatchReport {
        base_seed,
        rows,
        aggregate: BatchAggregate {
            runs,
            avg_total_calls: total_calls as f64 / runs as f64,
            avg_wait: summary.mean_wait,
            max_wait: summary.max_wait,
            avg_duration: summary.mean_duration,
        },
    })
}
