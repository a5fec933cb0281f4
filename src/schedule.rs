use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::{ArrivalProcess, ServiceProcess, ShiftWindow};

pub const MINUTES_PER_DAY: usize = 1440;

pub const MIN_SERVICE_MINUTES: f64 = 1.0;

#[derive(Clone, Debug)]
enum ArrivalSampler {
    Silent,
    Poisson(Poisson<f64>),
    Fixed(u64),
}

#[derive(Clone, Debug)]
enum ServiceSampler {
    Normal(Normal<f64>),
    Fixed(f64),
}

#[derive(Clone, Debug)]
struct CompiledWindow {
    window: ShiftWindow,
    arrivals: ArrivalSampler,
    service: ServiceSampler,
}

#[derive(Clone, Debug)]
pub struct RateSchedule {
    windows: Vec<CompiledWindow>,
    lookup: Vec<usize>,
}

impl RateSchedule {
    pub fn new(windows: &[ShiftWindow]) -> Result<Self> {
        if windows.is_empty() {
            return Err(Error::EmptyWindows);
        }

        let mut labels = HashSet::new();
        let mut compiled = Vec::with_capacity(windows.len());
        for window in windows {
            if window.label.trim().is_empty() {
                return Err(Error::EmptyWindowLabel);
            }
            if !labels.insert(window.label.as_str()) {
                return Err(Error::DuplicateWindowLabel(window.label.clone()));
            }
            compiled.push(compile_window(window)?);
        }

        let mut lookup: Vec<Option<usize>> = vec![None; MINUTES_PER_DAY];
        for (idx, window) in windows.iter().enumerate() {
            for minute in covered_minutes(window) {
                if let Some(existing) = lookup[minute] {
                    return Err(Error::WindowOverlap {
                        first: windows[existing].label.clone(),
                        second: window.label.clone(),
                        minute,
                    });
                }
                lookup[minute] = Some(idx);
            }
        }

        let lookup = lookup
            .into_iter()
            .enumerate()
            .map(|(minute, slot)| slot.ok_or(Error::WindowGap(minute)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            windows: compiled,
            lookup,
        })
    }

    pub fn active_window(&self, time: f64) -> &ShiftWindow {
        &self.compiled_at(time).window
    }

    pub fn target_capacity(&self, time: f64) -> usize {
        self.active_window(time).target_capacity
    }

    pub fn draw_arrival_count<R: Rng + ?Sized>(&self, time: f64, rng: &mut R) -> u64 {
        match &self.compiled_at(time).arrivals {
            ArrivalSampler::Silent => 0,
            ArrivalSampler::Poisson(dist) => {
                let count: f64 = dist.sample(rng);
                count as u64
            }
            ArrivalSampler::Fixed(count) => *count,
        }
    }

    // Clamped, not redrawn.
    pub fn draw_service_duration<R: Rng + ?Sized>(&self, time: f64, rng: &mut R) -> f64 {
        let raw: f64 = match &self.compiled_at(time).service {
            ServiceSampler::Normal(dist) => dist.sample(rng),
            ServiceSampler::Fixed(minutes) => *minutes,
        };
        raw.max(MIN_SERVICE_MINUTES)
    }

    fn compiled_at(&self, time: f64) -> &CompiledWindow {
        &self.windows[self.lookup[minute_of_day(time)]]
    }
}

pub fn minute_of_day(time: f64) -> usize {
    let minute = time.max(0.0).floor() as u64;
    (minute % MINUTES_PER_DAY as u64) as usize
}

fn compile_window(window: &ShiftWindow) -> Result<CompiledWindow> {
    let start = window.start_minute as usize;
    let end = window.end_minute as usize;
    if start >= MINUTES_PER_DAY || end > MINUTES_PER_DAY || start == end {
        return Err(Error::InvalidWindowBounds {
            label: window.label.clone(),
            start: window.start_minute,
            end: window.end_minute,
        });
    }

    let rate = window.arrival_rate;
    if !rate.is_finite() || rate < 0.0 {
        return Err(Error::InvalidArrivalRate {
            label: window.label.clone(),
            rate,
        });
    }
    let arrivals = match window.arrival_process {
        ArrivalProcess::Fixed if rate.fract() != 0.0 => {
            return Err(Error::InvalidFixedArrivalRate {
                label: window.label.clone(),
                rate,
            });
        }
        ArrivalProcess::Fixed => ArrivalSampler::Fixed(rate as u64),
        ArrivalProcess::Poisson if rate == 0.0 => ArrivalSampler::Silent,
        ArrivalProcess::Poisson => {
            ArrivalSampler::Poisson(Poisson::new(rate).map_err(|_| Error::InvalidArrivalRate {
                label: window.label.clone(),
                rate,
            })?)
        }
    };

    let mean = window.service_mean;
    if !mean.is_finite() || mean <= 0.0 {
        return Err(Error::InvalidServiceMean {
            label: window.label.clone(),
            mean,
        });
    }
    let stddev = window.service_stddev;
    if !stddev.is_finite() || stddev < 0.0 {
        return Err(Error::InvalidServiceStddev {
            label: window.label.clone(),
            stddev,
        });
    }
    let service = match window.service_process {
        ServiceProcess::Fixed => ServiceSampler::Fixed(mean),
        ServiceProcess::Normal => {
            ServiceSampler::Normal(Normal::new(mean, stddev).map_err(|_| {
                Error::InvalidServiceStddev {
                    label: window.label.clone(),
                    stddev,
                }
            })?)
        }
    };

    Ok(CompiledWindow {
        window: window.clone(),
        arrivals,
        service,
    })
}

fn covered_minutes(window: &ShiftWindow) -> Box<dyn Iterator<Item = usize>> {
    let start = window.start_minute as usize;
    let end = window.end_minute as usize;
    if start < end {
        Box::new(start..end)
    } else {
        Box::new((start..MINUTES_PER_DAY).chain(0..end))
    }
}
