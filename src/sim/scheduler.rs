//! Deferred work keyed by simulation tick
//!
//! Delayed effects (like an enemy coming back after a hit) are queued here
//! and drained by the tick, so they fire in a fixed order relative to the
//! rest of the frame. Tasks cannot be cancelled; whatever applies them must
//! check the session phase at fire time.

use serde::{Deserialize, Serialize};

/// Work a scheduled task performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Append one enemy to the pool
    SpawnEnemy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub fire_tick: u64,
    pub action: DeferredAction,
}

/// Pending tasks, kept in fire order (stable for equal ticks)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_tick: u64, action: DeferredAction) {
        // Insert after every task due at or before `fire_tick`
        let at = self.tasks.partition_point(|t| t.fire_tick <= fire_tick);
        self.tasks.insert(at, ScheduledTask { fire_tick, action });
    }

    /// Remove and return every action due at or before `now`
    pub fn take_due(&mut self, now: u64) -> Vec<DeferredAction> {
        let due = self.tasks.partition_point(|t| t.fire_tick <= now);
        self.tasks.drain(..due).map(|t| t.action).collect()
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Tick of the earliest pending task
    pub fn next_fire_tick(&self) -> Option<u64> {
        self.tasks.first().map(|t| t.fire_tick)
    }
}
