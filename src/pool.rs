use std::collections::{BTreeMap, VecDeque};

use crate::error::{Error, Result};
use crate::events::SessionId;

pub type SlotId = usize;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlotStatus {
    Idle,
    Busy(SessionId),
    RetirePending(SessionId),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerSlot {
    pub id: SlotId,
    pub status: SlotStatus,
}

impl ServerSlot {
    pub fn current_session(&self) -> Option<SessionId> {
        match self.status {
            SlotStatus::Idle => None,
            SlotStatus::Busy(session) | SlotStatus::RetirePending(session) => Some(session),
        }
    }
}

/// A slot handed to a session that was waiting for one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Grant {
    pub session: SessionId,
    pub slot: SlotId,
}

#[derive(Clone, Debug, Default)]
pub struct ServerPool {
    slots: BTreeMap<SlotId, ServerSlot>,
    idle: VecDeque<SlotId>,
    waiting: VecDeque<SessionId>,
    next_slot_id: SlotId,
}

impl ServerPool {
    pub fn new(capacity: usize) -> Self {
        let mut pool = Self::default();
        for _ in 0..capacity {
            pool.add_idle_slot();
        }
        pool
    }

    pub fn acquire(&mut self, session: SessionId) -> Option<SlotId> {
        if self.waiting.is_empty() {
            if let Some(slot) = self.take_idle(session) {
                return Some(slot);
            }
        }
        self.waiting.push_back(session);
        None
    }

    // Retiring slots are destroyed on release.
    pub fn release(&mut self, slot_id: SlotId) -> Result<Option<Grant>> {
        let slot = self
            .slots
            .get_mut(&slot_id)
            .ok_or(Error::UnknownSlot(slot_id))?;
        match slot.status {
            SlotStatus::Idle => Err(Error::SlotNotBusy(slot_id)),
            SlotStatus::RetirePending(_) => {
                self.slots.remove(&slot_id);
                Ok(None)
            }
            SlotStatus::Busy(_) => {
                slot.status = SlotStatus::Idle;
                self.idle.push_back(slot_id);
                Ok(self.hand_off())
            }
        }
    }

    pub fn review_capacity(&mut self, target: usize) -> Vec<Grant> {
        let pending = self.retire_pending_count();
        let effective = self.slots.len() - pending;

        if target > effective {
            let mut needed = target - effective;
            for slot in self.slots.values_mut() {
                if needed == 0 {
                    break;
                }
                if let SlotStatus::RetirePending(session) = slot.status {
                    slot.status = SlotStatus::Busy(session);
                    needed -= 1;
                }
            }
            for _ in 0..needed {
                self.add_idle_slot();
            }
        } else if target < effective {
            let mut excess = effective - target;
            while excess > 0 {
                let Some(slot_id) = self.idle.pop_back() else {
                    break;
                };
                self.slots.remove(&slot_id);
                excess -= 1;
            }
            for slot in self.slots.values_mut() {
                if excess == 0 {
                    break;
                }
                if let SlotStatus::Busy(session) = slot.status {
                    slot.status = SlotStatus::RetirePending(session);
                    excess -= 1;
                }
            }
        }

        std::iter::from_fn(|| self.hand_off()).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Slots serving a call, including those marked for retirement.
    pub fn busy_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.current_session().is_some())
            .count()
    }

    pub fn retire_pending_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| matches!(slot.status, SlotStatus::RetirePending(_)))
            .count()
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    pub fn slot(&self, slot_id: SlotId) -> Option<&ServerSlot> {
        self.slots.get(&slot_id)
    }

    pub fn slots(&self) -> impl Iterator<Item = &ServerSlot> {
        self.slots.values()
    }

    pub fn check_invariants(&self) -> Result<()> {
        let busy = self
            .slots
            .values()
            .filter(|slot| matches!(slot.status, SlotStatus::Busy(_)))
            .count();
        let pending = self.retire_pending_count();
        if self.idle.len() + busy + pending != self.slots.len() {
            return Err(Error::PoolInvariant(format!(
                "idle {} + busy {} + retiring {} != slots {}",
                self.idle.len(),
                busy,
                pending,
                self.slots.len()
            )));
        }
        for slot_id in &self.idle {
            match self.slots.get(slot_id) {
                Some(slot) if slot.status == SlotStatus::Idle => {}
                _ => {
                    return Err(Error::PoolInvariant(format!(
                        "slot {} queued as idle but is not idle",
                        slot_id
                    )))
                }
            }
        }
        if !self.idle.is_empty() && !self.waiting.is_empty() {
            return Err(Error::PoolInvariant(format!(
                "{} idle slots while {} sessions wait",
                self.idle.len(),
                self.waiting.len()
            )));
        }
        Ok(())
    }

    fn add_idle_slot(&mut self) {
        let id = self.next_slot_id;
        self.next_slot_id += 1;
        self.slots.insert(
            id,
            ServerSlot {
                id,
                status: SlotStatus::Idle,
            },
        );
        self.idle.push_back(id);
    }

    fn take_idle(&mut self, session: SessionId) -> Option<SlotId> {
        let slot_id = self.idle.pop_front()?;
        if let Some(slot) = self.slots.get_mut(&slot_id) {
            slot.status = SlotStatus::Busy(session);
        }
        Some(slot_id)
    }

    fn hand_off(&mut self) -> Option<Grant> {
        if self.idle.is_empty() {
            return None;
        }
        let session = self.waiting.pop_front()?;
        let slot = self.take_idle(session)?;
        Some(Grant { session, slot })
    }
}
