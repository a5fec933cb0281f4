use std::fmt;

use crate::models::{ArrivalProcess, BatchConfig, ServiceProcess, ShiftWindow, SimConfig};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Preset {
    /// Emergency dispatch day profile with a midday peak.
    Dispatch911,
    SingleShift,
    /// Constant three calls a minute over an eight-hour shift.
    FixedRate,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Dispatch911, Preset::SingleShift, Preset::FixedRate];

    pub fn config(self) -> SimConfig {
        match self {
            Preset::Dispatch911 => SimConfig {
                horizon_minutes: 24 * 60,
                seed: 404,
                windows: vec![
                    poisson("off-peak", 16 * 60, 8 * 60, 0.5, 5.0, 1.0, 12),
                    poisson("morning", 8 * 60, 12 * 60, 1.5, 7.0, 2.0, 12),
                    poisson("peak", 12 * 60, 16 * 60, 2.5, 10.0, 3.0, 12),
                ],
                batch: BatchConfig {
                    runs: 5,
                    base_seed: 404,
                },
            },
            Preset::SingleShift => SimConfig {
                horizon_minutes: 24 * 60,
                seed: 404,
                windows: vec![poisson("all-day", 0, 24 * 60, 1.5, 7.0, 5.0, 15)],
                batch: BatchConfig {
                    runs: 25,
                    base_seed: 404,
                },
            },
            Preset::FixedRate => SimConfig {
                horizon_minutes: 8 * 60,
                seed: 404,
                windows: vec![ShiftWindow {
                    arrival_process: ArrivalProcess::Fixed,
                    ..poisson("shift", 0, 24 * 60, 3.0, 8.0, 5.0, 25)
                }],
                batch: BatchConfig {
                    runs: 5,
                    base_seed: 404,
                },
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Dispatch911 => write!(f, "dispatch-911"),
            Preset::SingleShift => write!(f, "single-shift"),
            Preset::FixedRate => write!(f, "fixed-rate"),
        }
    }
}

fn poisson(
    label: &str,
    start_minute: u32,
    end_minute: u32,
    arrival_rate: f64,
    service_mean: f64,
    service_stddev: f64,
    target_capacity: usize,
) -> ShiftWindow {
    ShiftWindow {
        label: label.to_string(),
        start_minute,
        end_minute,
        arrival_rate,
        arrival_process: ArrivalProcess::Poisson,
        service_mean,
        service_stddev,
        service_process: ServiceProcess::Normal,
        target_capacity,
    }
}
