//! Cooperative timer scheduler for kill sequences.
//!
//! [`KillTimers`] is the ECS side of
//! [`TimerScheduler`](crate::components::killerhost::TimerScheduler). Each
//! armed timer is a small entry with an owner and a due time on the
//! [`WorldTime`](crate::resources::worldtime::WorldTime) clock. Nothing runs
//! in parallel: once per frame
//! [`update_kill_timers`](crate::systems::killtimers::update_kill_timers)
//! drains the entries that are due and delivers them as
//! [`KillTimerEvent`](crate::events::killtimer::KillTimerEvent)s.

use bevy_ecs::prelude::*;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::killerhost::TimerHandle;

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingTimer {
    owner: Entity,
    due: f32,
}

/// Pending one-shot timers keyed by handle.
#[derive(Resource, Debug, Default)]
pub struct KillTimers {
    next_handle: u64,
    pending: FxHashMap<TimerHandle, PendingTimer>,
}

impl KillTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer for `owner` that is due at `now + delay`.
    pub fn schedule(&mut self, owner: Entity, now: f32, delay: f32) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let due = now + delay.max(0.0);
        self.pending.insert(handle, PendingTimer { owner, due });
        debug!("Armed kill timer {:?} for {:?}, due at {:.3}", handle, owner, due);
        handle
    }

    /// Drop a timer. Returns false when it already fired or was canceled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_for(&self, owner: Entity) -> usize {
        self.pending.values().filter(|t| t.owner == owner).count()
    }

    /// Remove and return every timer due at or before `now`.
    ///
    /// Results are ordered by due time, then by arming order.
    pub fn drain_due(&mut self, now: f32) -> Vec<(Entity, TimerHandle)> {
        let mut due: Vec<(f32, TimerHandle, Entity)> = self
            .pending
            .iter()
            .filter(|(_, t)| t.due <= now)
            .map(|(&h, t)| (t.due, h, t.owner))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        for (_, handle, _) in &due {
            self.pending.remove(handle);
        }
        due.into_iter().map(|(_, h, owner)| (owner, h)).collect()
    }
}
