use std::fmt::Write;

use crate::batch::BatchReport;
use crate::engine::RunOutcome;
use crate::metrics::RunSummary;
use crate::models::{ServiceProcess, SimConfig};

pub trait Formatter {
    fn write_run(&self, outcome: &RunOutcome) -> String;
    fn write_batch(&self, report: &BatchReport) -> String;
}

/// Full report including one line per completed call.
pub struct HumanFormatter;

/// Header and totals only.
pub struct SummaryFormatter;

pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write_run(&self, outcome: &RunOutcome) -> String {
        let mut output = String::new();
        write_run_header(&mut output, outcome);
        output.push_str("Completed calls:\n");
        for call in &outcome.calls {
            let _ = writeln!(
                output,
                "Call {} -> slot {} (wait: {:.2} min, service: {:.2}-{:.2})",
                call.session_id,
                call.slot_id,
                call.wait_time,
                call.service_start,
                call.completion_time
            );
        }
        write_summary(&mut output, &outcome.summary);
        output
    }

    fn write_batch(&self, report: &BatchReport) -> String {
        let mut output = String::new();
        write_batch_header(&mut output, report);
        write_batch_rows(&mut output, report);
        write_aggregate(&mut output, report);
        output
    }
}

impl Formatter for SummaryFormatter {
    fn write_run(&self, outcome: &RunOutcome) -> String {
        let mut output = String::new();
        write_run_header(&mut output, outcome);
        write_summary(&mut output, &outcome.summary);
        output
    }

    fn write_batch(&self, report: &BatchReport) -> String {
        let mut output = String::new();
        write_batch_header(&mut output, report);
        write_aggregate(&mut output, report);
        output
    }
}

impl Formatter for JsonFormatter {
    fn write_run(&self, outcome: &RunOutcome) -> String {
        to_json(outcome)
    }

    fn write_batch(&self, report: &BatchReport) -> String {
        to_json(report)
    }
}

pub fn write_config(config: &SimConfig) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Horizon: {} min", config.horizon_minutes);
    let _ = writeln!(output, "Seed: {}", config.seed);
    let _ = writeln!(
        output,
        "Batch: {} runs from seed {}",
        config.batch.runs, config.batch.base_seed
    );
    output.push_str("Windows:\n");
    for window in &config.windows {
        let service = match window.service_process {
            ServiceProcess::Normal => format!(
                "normal({:.2}, {:.2})",
                window.service_mean, window.service_stddev
            ),
            ServiceProcess::Fixed => format!("fixed({:.2})", window.service_mean),
        };
        let _ = writeln!(
            output,
            "- {} [{}, {}) arrivals: {} {:.2}/min, service: {} min, capacity: {}",
            window.label,
            window.start_minute,
            window.end_minute,
            window.arrival_process,
            window.arrival_rate,
            service,
            window.target_capacity
        );
    }
    output
}

fn write_run_header(output: &mut String, outcome: &RunOutcome) {
    let _ = writeln!(output, "Run:");
    let _ = writeln!(output, "seed: {}", outcome.seed);
    let _ = writeln!(output, "horizon_minutes: {}", outcome.horizon_minutes);
    let _ = writeln!(output, "total_calls: {}", outcome.total_calls);
    let _ = writeln!(output, "queued_at_horizon: {}", outcome.unfinished.queued);
    let _ = writeln!(
        output,
        "in_service_at_horizon: {}",
        outcome.unfinished.in_service
    );
    let _ = writeln!(output, "final_pool_size: {}", outcome.final_pool_size);
}

fn write_summary(output: &mut String, summary: &RunSummary) {
    let _ = writeln!(output, "Summary:");
    let _ = writeln!(output, "completed: {}", summary.count);
    let _ = writeln!(output, "avg_wait: {:.2} min", summary.mean_wait);
    let _ = writeln!(output, "max_wait: {:.2} min", summary.max_wait);
    let _ = writeln!(output, "p95_wait: {:.2} min", summary.p95_wait);
    let _ = writeln!(output, "avg_duration: {:.2} min", summary.mean_duration);
}

fn write_batch_header(output: &mut String, report: &BatchReport) {
    let _ = writeln!(output, "Batch:");
    let _ = writeln!(output, "runs: {}", report.aggregate.runs);
    let _ = writeln!(output, "base_seed: {}", report.base_seed);
}

fn write_batch_rows(output: &mut String, report: &BatchReport) {
    let _ = writeln!(output, "Runs:");
    for row in &report.rows {
        let _ = writeln!(
            output,
            "Run {} (seed {}): total_calls={} completed={} avg_wait={:.2} max_wait={:.2} avg_duration={:.2}",
            row.run_index,
            row.seed,
            row.total_calls,
            row.completed,
            row.avg_wait,
            row.max_wait,
            row.avg_duration
        );
    }
}

fn write_aggregate(output: &mut String, report: &BatchReport) {
    let aggregate = &report.aggregate;
    let _ = writeln!(output, "Aggregate:");
    let _ = writeln!(output, "avg_total_calls: {:.2}", aggregate.avg_total_calls);
    let _ = writeln!(output, "avg_wait: {:.2} min", aggregate.avg_wait);
    let _ = writeln!(output, "max_wait: {:.2} min", aggregate.max_wait);
    let _ = writeln!(output, "avg_duration: {:.2} min", aggregate.avg_duration);
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(mut json) => {
            json.push('\n');
            json
        }
        Err(err) => format!("{{\"error\": \"{}\"}}\n", err),
    }
}
