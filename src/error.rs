use thiserror::Error;

use crate::events::SessionId;
use crate::pool::SlotId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("shift windows must not be empty")]
    EmptyWindows,
    #[error("horizon must be greater than 0 minutes")]
    HorizonZero,
    #[error("batch runs must be greater than 0")]
    RunsZero,
    #[error("shift window label must not be empty")]
    EmptyWindowLabel,
    #[error("duplicate shift window label '{0}'")]
    DuplicateWindowLabel(String),
    #[error("invalid bounds for shift window '{label}': start {start}, end {end}")]
    InvalidWindowBounds { label: String, start: u32, end: u32 },
    #[error("shift windows '{first}' and '{second}' overlap at minute {minute}")]
    WindowOverlap {
        first: String,
        second: String,
        minute: usize,
    },
    #[error("shift windows leave minute {0} uncovered")]
    WindowGap(usize),
    #[error("arrival rate must be >= 0 in '{label}' (got {rate})")]
    InvalidArrivalRate { label: String, rate: f64 },
    #[error("fixed arrival rate must be a whole number in '{label}' (got {rate})")]
    InvalidFixedArrivalRate { label: String, rate: f64 },
    #[error("service mean must be > 0 in '{label}' (got {mean})")]
    InvalidServiceMean { label: String, mean: f64 },
    #[error("service stddev must be >= 0 in '{label}' (got {stddev})")]
    InvalidServiceStddev { label: String, stddev: f64 },
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
    #[error("internal: slot {0} released while not busy")]
    SlotNotBusy(SlotId),
    #[error("internal: unknown slot {0}")]
    UnknownSlot(SlotId),
    #[error("internal: unknown session {0}")]
    UnknownSession(SessionId),
    #[error("internal: session {session} cannot move from {from} to {to}")]
    InvalidTransition {
        session: SessionId,
        from: &'static str,
        to: &'static str,
    },
    #[error("internal: clock moved backwards from {from} to {to}")]
    ClockRegression { from: f64, to: f64 },
    #[error("internal: pool accounting broken ({0})")]
    PoolInvariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
