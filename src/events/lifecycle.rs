//! Activation and deactivation hooks for pooled entities.
//!
//! These two events are the only integration points between the pool and
//! the [`PooledKiller`]: the spawner triggers [`ActivateEvent`] when it hands
//! an entity out, and the killer itself triggers [`DeactivateEvent`] when its
//! kill sequence ends. Anything else that wants to return an entity early
//! (a level reset, say) triggers [`DeactivateEvent`] too.
//!
//! # Example
//!
//! ```ignore
//! world.spawn(Observer::new(activate_observer));
//! world.spawn(Observer::new(deactivate_observer));
//! world.flush();
//! world.trigger(ActivateEvent { entity });
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::active::Active;
use crate::components::collider::Collider;
use crate::components::pooled::Pooled;
use crate::components::pooledkiller::PooledKiller;
use crate::components::rigidbody::RigidBody;
use crate::components::scale::Scale;
use crate::components::worldposition::WorldPosition;
use crate::resources::killtimers::KillTimers;
use crate::resources::pool::EntityPool;
use crate::resources::worldtime::WorldTime;
use crate::systems::pooledkiller::KillerContext;

/// Request to (re)activate a pooled entity.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivateEvent {
    pub entity: Entity,
}

/// Request to deactivate a pooled entity and park it in the pool.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeactivateEvent {
    pub entity: Entity,
}

/// Components the lifecycle observers need mutable access to.
type KillerQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Active,
        &'static mut PooledKiller,
        &'static mut WorldPosition,
        &'static mut Scale,
        Option<&'static mut RigidBody>,
        Option<&'static mut Collider>,
    ),
>;

/// Observer for [`ActivateEvent`].
///
/// Marks the entity active, then runs [`PooledKiller::on_activate`], which
/// resets the lifecycle and arms its timers.
pub fn activate_observer(
    trigger: On<ActivateEvent>,
    world_time: Res<WorldTime>,
    mut timers: ResMut<KillTimers>,
    mut query: KillerQuery,
    mut commands: Commands,
) {
    let entity = trigger.event().entity;
    let Ok((mut active, mut killer, mut position, mut scale, mut body, mut collider)) =
        query.get_mut(entity)
    else {
        warn!("ActivateEvent for {:?}, which has no PooledKiller", entity);
        return;
    };

    active.0 = true;
    let mut ctx = KillerContext {
        entity,
        now: world_time.elapsed,
        position: &mut *position,
        scale: &mut *scale,
        body: body.as_deref_mut(),
        collider: collider.as_deref_mut(),
        timers: &mut *timers,
        commands: &mut commands,
    };
    killer.on_activate(&mut ctx);
    debug!("Activated {:?} at {:.3}", entity, world_time.elapsed);
}

/// Observer for [`DeactivateEvent`].
///
/// Cancels the killer's timers, marks the entity inactive and parks pooled
/// entities. Deactivating an inactive entity only repeats the cancel.
pub fn deactivate_observer(
    trigger: On<DeactivateEvent>,
    world_time: Res<WorldTime>,
    mut timers: ResMut<KillTimers>,
    mut pool: Option<ResMut<EntityPool>>,
    mut query: KillerQuery,
    pooled: Query<&Pooled>,
    mut commands: Commands,
) {
    let entity = trigger.event().entity;
    let Ok((mut active, mut killer, mut position, mut scale, mut body, mut collider)) =
        query.get_mut(entity)
    else {
        warn!("DeactivateEvent for {:?}, which has no PooledKiller", entity);
        return;
    };

    let mut ctx = KillerContext {
        entity,
        now: world_time.elapsed,
        position: &mut *position,
        scale: &mut *scale,
        body: body.as_deref_mut(),
        collider: collider.as_deref_mut(),
        timers: &mut *timers,
        commands: &mut commands,
    };
    killer.on_deactivate(&mut ctx);
    active.0 = false;

    if let (Ok(_), Some(pool)) = (pooled.get(entity), pool.as_deref_mut()) {
        pool.give_back(entity);
    }
    debug!("Deactivated {:?} at {:.3}", entity, world_time.elapsed);
}
