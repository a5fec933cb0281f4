use rand::Rng;

use crate::events::SessionId;
use crate::schedule::RateSchedule;
use crate::session::CallSession;

/// Emits one batch of calls per simulated minute until the horizon.
/// Session ids increase in draw order.
#[derive(Clone, Debug)]
pub struct ArrivalGenerator {
    horizon: f64,
    next_id: SessionId,
    exhausted: bool,
}

impl ArrivalGenerator {
    pub fn new(horizon_minutes: u32) -> Self {
        Self {
            horizon: f64::from(horizon_minutes),
            next_id: 0,
            exhausted: false,
        }
    }

    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        time: f64,
        schedule: &RateSchedule,
        rng: &mut R,
    ) -> Vec<CallSession> {
        if self.exhausted || time >= self.horizon {
            self.exhausted = true;
            return Vec::new();
        }

        let count = schedule.draw_arrival_count(time, rng);
        (0..count)
            .map(|_| {
                let session = CallSession::new(self.next_id, time);
                self.next_id += 1;
                session
            })
            .collect()
    }

    pub fn generated(&self) -> usize {
        self.next_id
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
