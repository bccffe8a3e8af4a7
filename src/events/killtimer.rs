//! Kill timer expiry events.
//!
//! When a timer armed through [`KillTimers`](crate::resources::killtimers::KillTimers)
//! comes due, [`update_kill_timers`](crate::systems::killtimers::update_kill_timers)
//! triggers a [`KillTimerEvent`]. The [`kill_timer_observer`] hands the
//! handle back to the owner's [`PooledKiller`], which starts the kill
//! sequence if the handle is still one of its own.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::active::Active;
use crate::components::collider::Collider;
use crate::components::killerhost::TimerHandle;
use crate::components::pooledkiller::PooledKiller;
use crate::components::rigidbody::RigidBody;
use crate::components::scale::Scale;
use crate::components::worldposition::WorldPosition;
use crate::resources::killtimers::KillTimers;
use crate::resources::worldtime::WorldTime;
use crate::systems::pooledkiller::KillerContext;

/// Event emitted when a kill timer expires.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillTimerEvent {
    /// The entity that armed the timer.
    pub entity: Entity,
    pub handle: TimerHandle,
}

/// Observer that resumes a killer when one of its timers expires.
pub fn kill_timer_observer(
    trigger: On<KillTimerEvent>,
    world_time: Res<WorldTime>,
    mut timers: ResMut<KillTimers>,
    mut query: Query<(
        &Active,
        &mut PooledKiller,
        &mut WorldPosition,
        &mut Scale,
        Option<&mut RigidBody>,
        Option<&mut Collider>,
    )>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok((active, mut killer, mut position, mut scale, mut body, mut collider)) =
        query.get_mut(event.entity)
    else {
        return;
    };
    if !active.is_active() {
        debug!("Kill timer {:?} fired for inactive {:?}", event.handle, event.entity);
        return;
    }

    let mut ctx = KillerContext {
        entity: event.entity,
        now: world_time.elapsed,
        position: &mut *position,
        scale: &mut *scale,
        body: body.as_deref_mut(),
        collider: collider.as_deref_mut(),
        timers: &mut *timers,
        commands: &mut commands,
    };
    killer.on_timer_fired(event.handle, &mut ctx);
}
