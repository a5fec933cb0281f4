use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SimConfig {
    pub horizon_minutes: u32,
    #[serde(default)]
    pub seed: u64,
    pub windows: Vec<ShiftWindow>,
    #[serde(default)]
    pub batch: BatchConfig,
}

/// A window whose `end_minute` is below its `start_minute` wraps past midnight.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ShiftWindow {
    pub label: String,
    pub start_minute: u32,
    pub end_minute: u32,
    pub arrival_rate: f64,
    #[serde(default)]
    pub arrival_process: ArrivalProcess,
    pub service_mean: f64,
    pub service_stddev: f64,
    #[serde(default)]
    pub service_process: ServiceProcess,
    pub target_capacity: usize,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ArrivalProcess {
    #[default]
    Poisson,
    Fixed,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceProcess {
    #[default]
    Normal,
    Fixed,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct BatchConfig {
    #[serde(default = "default_runs")]
    pub runs: usize,
    #[serde(default = "default_base_seed")]
    pub base_seed: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            base_seed: default_base_seed(),
        }
    }
}

impl fmt::Display for ArrivalProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalProcess::Poisson => write!(f, "poisson"),
            ArrivalProcess::Fixed => write!(f, "fixed"),
        }
    }
}

impl fmt::Display for ServiceProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceProcess::Normal => write!(f, "normal"),
            ServiceProcess::Fixed => write!(f, "fixed"),
        }
    }
}

fn default_runs() -> usize {
    5
}

fn default_base_seed() -> u64 {
    404
}
