use serde::Serialize;

use crate::error::{Error, Result};
use crate::events::SessionId;
use crate::pool::SlotId;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionState {
    Arrived,
    Queued,
    InService {
        slot: SlotId,
        service_start: f64,
        duration: f64,
    },
    Completed,
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::Arrived => "arrived",
            SessionState::Queued => "queued",
            SessionState::InService { .. } => "in-service",
            SessionState::Completed => "completed",
        }
    }
}

/// One call from arrival to completion.
#[derive(Clone, Debug)]
pub struct CallSession {
    id: SessionId,
    arrival_time: f64,
    state: SessionState,
}

/// Metrics of a call whose completion fired before the horizon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CompletedCall {
    pub session_id: SessionId,
    pub slot_id: SlotId,
    pub arrival_time: f64,
    pub service_start: f64,
    pub completion_time: f64,
    pub wait_time: f64,
    pub duration: f64,
}

impl CallSession {
    pub fn new(id: SessionId, arrival_time: f64) -> Self {
        Self {
            id,
            arrival_time,
            state: SessionState::Arrived,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn assigned_slot(&self) -> Option<SlotId> {
        match self.state {
            SessionState::InService { slot, .. } => Some(slot),
            _ => None,
        }
    }

    pub fn wait_time(&self) -> Option<f64> {
        match self.state {
            SessionState::InService { service_start, .. } => Some(service_start - self.arrival_time),
            _ => None,
        }
    }

    pub fn enqueue(&mut self) -> Result<()> {
        match self.state {
            SessionState::Arrived => {
                self.state = SessionState::Queued;
                Ok(())
            }
            other => Err(self.invalid(other, "queued")),
        }
    }

    pub fn begin_service(&mut self, slot: SlotId, now: f64, duration: f64) -> Result<()> {
        match self.state {
            SessionState::Queued if now >= self.arrival_time => {
                self.state = SessionState::InService {
                    slot,
                    service_start: now,
                    duration,
                };
                Ok(())
            }
            other => Err(self.invalid(other, "in-service")),
        }
    }

    pub fn complete(&mut self, now: f64) -> Result<CompletedCall> {
        match self.state {
            SessionState::InService {
                slot,
                service_start,
                duration,
            } => {
                self.state = SessionState::Completed;
                Ok(CompletedCall {
                    session_id: self.id,
                    slot_id: slot,
                    arrival_time: self.arrival_time,
                    service_start,
                    completion_time: now,
                    wait_time: service_start - self.arrival_time,
                    duration,
                })
            }
            other => Err(self.invalid(other, "completed")),
        }
    }

    fn invalid(&self, from: SessionState, to: &'static str) -> Error {
        Error::InvalidTransition {
            session: self.id,
            from: from.name(),
            to,
        }
    }
}
