//! Kill timer expiry system.

use bevy_ecs::prelude::*;

use crate::events::killtimer::KillTimerEvent;
use crate::resources::killtimers::KillTimers;
use crate::resources::worldtime::WorldTime;

/// Trigger a [`KillTimerEvent`] for every kill timer that is due.
///
/// Expired timers are removed before their events go out, so each one fires
/// at most once.
pub fn update_kill_timers(
    world_time: Res<WorldTime>,
    mut timers: ResMut<KillTimers>,
    mut commands: Commands,
) {
    for (entity, handle) in timers.drain_due(world_time.elapsed) {
        commands.trigger(KillTimerEvent { entity, handle });
    }
}
