use std::cmp::Ordering;

use crate::error::{Error, Result};

pub type SessionId = usize;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    MinuteTick,
    ServiceComplete(SessionId),
}

/// Queue entry. Ordered by time, then event priority, then the sequence
/// number assigned when the event was enqueued.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledEvent {
    pub time: f64,
    pub sequence: u64,
    pub event: Event,
}

impl ScheduledEvent {
    pub fn new(time: f64, sequence: u64, event: Event) -> Self {
        Self {
            time,
            sequence,
            event,
        }
    }
}

impl Eq for ScheduledEvent {}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.event.priority().cmp(&other.event.priority()))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Event {
    fn priority(&self) -> u8 {
        match self {
            Event::ServiceComplete(_) => 0,
            Event::MinuteTick => 1,
        }
    }
}

/// Simulated time in minutes. Only moves forward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimClock {
    now: f64,
}

impl SimClock {
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn advance_to(&mut self, time: f64) -> Result<()> {
        if time < self.now {
            return Err(Error::ClockRegression {
                from: self.now,
                to: time,
            });
        }
        self.now = time;
        Ok(())
    }
}
