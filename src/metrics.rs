use serde::Serialize;

/// Wait and duration samples of completed calls, in completion order.
#[derive(Clone, Debug, Default)]
pub struct MetricsCollector {
    waits: Vec<f64>,
    durations: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub count: usize,
    pub mean_wait: f64,
    pub max_wait: f64,
    pub p95_wait: f64,
    pub mean_duration: f64,
}

impl RunSummary {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, wait_time: f64, duration: f64) {
        self.waits.push(wait_time);
        self.durations.push(duration);
    }

    /// Empty collectors summarize to all zeros.
    pub fn summary(&self) -> RunSummary {
        let count = self.waits.len();
        if count == 0 {
            return RunSummary::default();
        }

        let mut sorted = self.waits.clone();
        sorted.sort_unstable_by(f64::total_cmp);

        RunSummary {
            count,
            mean_wait: mean(&self.waits),
            max_wait: sorted[count - 1],
            p95_wait: nearest_rank_percentile(&sorted, 95.0),
            mean_duration: mean(&self.durations),
        }
    }

    pub fn into_samples(self) -> (Vec<f64>, Vec<f64>) {
        (self.waits, self.durations)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn nearest_rank_percentile(sorted: &[f64], percentile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = ((percentile / 100.0) * sorted.len() as f64).ceil() as usize;
    let idx = rank.saturating_sub(1).min(sorted.len() - 1);
    sorted[idx]
}
