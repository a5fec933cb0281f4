use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use tracing::{debug, info, trace, warn};

use crate::arrivals::ArrivalGenerator;
use crate::error::{Error, Result};
use crate::events::{Event, ScheduledEvent, SessionId, SimClock};
use crate::metrics::{MetricsCollector, RunSummary};
use crate::models::SimConfig;
use crate::pool::{Grant, ServerPool};
use crate::schedule::RateSchedule;
use crate::session::{CallSession, CompletedCall, SessionState};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchedulerPhase {
    /// Minute ticks are still being generated.
    Running,
    /// The last tick has fired; only completions before the horizon remain.
    Draining,
    Finished,
}

/// Calls still open when the horizon cut the run off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UnfinishedCalls {
    pub queued: usize,
    pub in_service: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunOutcome {
    pub seed: u64,
    pub horizon_minutes: u32,
    pub total_calls: usize,
    pub summary: RunSummary,
    pub unfinished: UnfinishedCalls,
    pub final_pool_size: usize,
    pub waits: Vec<f64>,
    pub durations: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<CompletedCall>,
}

/// Discrete-event driver for one seeded run. A tick draws its arrival
/// count before any service duration it triggers.
pub struct EventScheduler {
    horizon: f64,
    horizon_minutes: u32,
    seed: u64,
    schedule: RateSchedule,
    arrivals: ArrivalGenerator,
    pool: ServerPool,
    sessions: HashMap<SessionId, CallSession>,
    events: BinaryHeap<Reverse<ScheduledEvent>>,
    clock: SimClock,
    sequence: u64,
    metrics: MetricsCollector,
    calls: Vec<CompletedCall>,
    store_calls: bool,
    rng: StdRng,
    phase: SchedulerPhase,
}

impl EventScheduler {
    pub fn new(config: &SimConfig, seed: u64) -> Result<Self> {
        validate_config(config)?;
        let schedule = RateSchedule::new(&config.windows)?;
        let pool = ServerPool::new(schedule.target_capacity(0.0));

        let mut scheduler = Self {
            horizon: f64::from(config.horizon_minutes),
            horizon_minutes: config.horizon_minutes,
            seed,
            schedule,
            arrivals: ArrivalGenerator::new(config.horizon_minutes),
            pool,
            sessions: HashMap::new(),
            events: BinaryHeap::new(),
            clock: SimClock::default(),
            sequence: 0,
            metrics: MetricsCollector::new(),
            calls: Vec::new(),
            store_calls: true,
            rng: StdRng::seed_from_u64(seed),
            phase: SchedulerPhase::Running,
        };
        scheduler.push(0.0, Event::MinuteTick);
        Ok(scheduler)
    }

    pub fn store_calls(mut self, store: bool) -> Self {
        self.store_calls = store;
        self
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn pool(&self) -> &ServerPool {
        &self.pool
    }

    pub fn sessions(&self) -> impl Iterator<Item = &CallSession> {
        self.sessions.values()
    }

    pub fn step(&mut self) -> Result<bool> {
        let due = matches!(self.events.peek(), Some(Reverse(next)) if next.time < self.horizon);
        if !due {
            self.phase = SchedulerPhase::Finished;
            return Ok(false);
        }
        let Some(Reverse(scheduled)) = self.events.pop() else {
            self.phase = SchedulerPhase::Finished;
            return Ok(false);
        };

        self.clock.advance_to(scheduled.time)?;
        trace!(time = scheduled.time, event = ?scheduled.event, "dispatch");
        match scheduled.event {
            Event::MinuteTick => self.on_minute_tick()?,
            Event::ServiceComplete(session_id) => self.on_service_complete(session_id)?,
        }
        Ok(true)
    }

    pub fn run(mut self) -> Result<RunOutcome> {
        info!(seed = self.seed, horizon = self.horizon_minutes, "run started");
        while self.step()? {}
        Ok(self.finish())
    }

    fn on_minute_tick(&mut self) -> Result<()> {
        let now = self.clock.now();
        let target = self.schedule.target_capacity(now);
        let before = (self.pool.len(), self.pool.retire_pending_count());
        let freed = self.pool.review_capacity(target);
        if (self.pool.len(), self.pool.retire_pending_count()) != before {
            debug!(
                time = now,
                target,
                slots = self.pool.len(),
                retiring = self.pool.retire_pending_count(),
                "capacity review"
            );
        }

        let arrivals = self.arrivals.tick(now, &self.schedule, &mut self.rng);

        for grant in freed {
            self.start_service(grant)?;
        }
        for mut session in arrivals {
            session.enqueue()?;
            let session_id = session.id();
            self.sessions.insert(session_id, session);
            if let Some(slot) = self.pool.acquire(session_id) {
                self.start_service(Grant {
                    session: session_id,
                    slot,
                })?;
            }
        }

        let next = now + 1.0;
        if next < self.horizon {
            self.push(next, Event::MinuteTick);
        } else {
            self.phase = SchedulerPhase::Draining;
        }
        Ok(())
    }

    fn on_service_complete(&mut self, session_id: SessionId) -> Result<()> {
        let now = self.clock.now();
        let mut session = self
            .sessions
            .remove(&session_id)
            .ok_or(Error::UnknownSession(session_id))?;
        let completed = session.complete(now)?;
        self.metrics.record(completed.wait_time, completed.duration);
        if self.store_calls {
            self.calls.push(completed);
        }

        if let Some(grant) = self.pool.release(completed.slot_id)? {
            self.start_service(grant)?;
        }
        Ok(())
    }

    // Duration comes from the window active at service start.
    fn start_service(&mut self, grant: Grant) -> Result<()> {
        let now = self.clock.now();
        let session = self
            .sessions
            .get_mut(&grant.session)
            .ok_or(Error::UnknownSession(grant.session))?;
        let duration = self.schedule.draw_service_duration(now, &mut self.rng);
        session.begin_service(grant.slot, now, duration)?;
        self.push(now + duration, Event::ServiceComplete(grant.session));
        Ok(())
    }

    fn push(&mut self, time: f64, event: Event) {
        self.events
            .push(Reverse(ScheduledEvent::new(time, self.sequence, event)));
        self.sequence += 1;
    }

    fn finish(self) -> RunOutcome {
        let mut unfinished = UnfinishedCalls::default();
        for session in self.sessions.values() {
            match session.state() {
                SessionState::InService { .. } => unfinished.in_service += 1,
                _ => unfinished.queued += 1,
            }
        }

        let summary = self.metrics.summary();
        if summary.is_empty() {
            warn!(seed = self.seed, "no calls completed before the horizon");
        }
        let total_calls = self.arrivals.generated();
        info!(
            seed = self.seed,
            total_calls,
            completed = summary.count,
            queued = unfinished.queued,
            in_service = unfinished.in_service,
            "run finished"
        );

        let final_pool_size = self.pool.len();
        let (waits, durations) = self.metrics.into_samples();
        RunOutcome {
            seed: self.seed,
            horizon_minutes: self.horizon_minutes,
            total_calls,
            summary,
            unfinished,
            final_pool_size,
            waits,
            durations,
            calls: self.calls,
        }
    }
}

/// One full run with per-call records kept.
pub fn run_simulation(config: &SimConfig, seed: u64) -> Result<RunOutcome> {
    run_simulation_with_options(config, seed, true)
}

pub fn run_simulation_summary(config: &SimConfig, seed: u64) -> Result<RunOutcome> {
    run_simulation_with_options(config, seed, false)
}

pub fn run_simulation_with_options(
    config: &SimConfig,
    seed: u64,
    store_calls: bool,
) -> Result<RunOutcome> {
    EventScheduler::new(config, seed)?
        .store_calls(store_calls)
        .run()
}

pub fn validate_config(config: &SimConfig) -> Result<()> {
    if config.horizon_minutes == 0 {
        return Err(Error::HorizonZero);
    }
    if config.windows.is_empty() {
        return Err(Error::EmptyWindows);
    }
    Ok(())
}
