//! ECS host for [`PooledKiller`] and its per-frame system.
//!
//! [`KillerContext`] borrows the pieces of one entity (transform, body,
//! collider) together with the shared [`KillTimers`] and [`Commands`], and
//! implements the killer's host traits on top of them. Changes to other
//! entities (child nodes) and the final deactivation go through `Commands`,
//! so they land once the current system or observer finishes.

use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::components::active::Active;
use crate::components::collider::Collider;
use crate::components::killerhost::{Clock, PhysicsBody, SceneGraph, TimerHandle, TimerScheduler};
use crate::components::pooledkiller::PooledKiller;
use crate::components::rigidbody::RigidBody;
use crate::components::scale::Scale;
use crate::components::worldposition::WorldPosition;
use crate::events::lifecycle::DeactivateEvent;
use crate::resources::killtimers::KillTimers;
use crate::resources::worldtime::WorldTime;

/// Borrowed view of one killer-owning entity.
pub struct KillerContext<'a, 'w, 's> {
    pub entity: Entity,
    /// `WorldTime::elapsed` at the time of the call.
    pub now: f32,
    pub position: &'a mut WorldPosition,
    pub scale: &'a mut Scale,
    pub body: Option<&'a mut RigidBody>,
    pub collider: Option<&'a mut Collider>,
    pub timers: &'a mut KillTimers,
    pub commands: &'a mut Commands<'w, 's>,
}

impl Clock for KillerContext<'_, '_, '_> {
    fn now(&self) -> f32 {
        self.now
    }
}

impl PhysicsBody for KillerContext<'_, '_, '_> {
    fn has_body(&self) -> bool {
        self.body.is_some()
    }

    fn is_resting(&self) -> bool {
        self.body.as_deref().is_some_and(RigidBody::is_sleeping)
    }

    fn set_collision_enabled(&mut self, enabled: bool) {
        if let Some(collider) = self.collider.as_deref_mut() {
            collider.enabled = enabled;
        }
    }

    fn set_body_simulated(&mut self, simulated: bool) {
        if let Some(body) = self.body.as_deref_mut() {
            body.kinematic = !simulated;
        }
    }
}

impl SceneGraph for KillerContext<'_, '_, '_> {
    fn set_node_active(&mut self, node: Entity, active: bool) {
        self.commands.entity(node).try_insert(Active(active));
    }

    fn deactivate_self(&mut self) {
        self.commands.trigger(DeactivateEvent {
            entity: self.entity,
        });
    }

    fn world_position(&self) -> Vec3 {
        self.position.pos
    }

    fn set_world_position(&mut self, position: Vec3) {
        self.position.pos = position;
    }

    fn local_scale(&self) -> Vec3 {
        self.scale.scale
    }

    fn set_local_scale(&mut self, scale: Vec3) {
        self.scale.scale = scale;
    }
}

impl TimerScheduler for KillerContext<'_, '_, '_> {
    fn wait_then_fire(&mut self, delay: f32) -> TimerHandle {
        self.timers.schedule(self.entity, self.now, delay)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.cancel(handle);
    }
}

/// Tick every active [`PooledKiller`] once.
///
/// Checks the rest trigger for live entities and advances the kill sequence
/// for dying ones. Should run after
/// [`update_kill_timers`](crate::systems::killtimers::update_kill_timers) so
/// that a timer expiring this frame already started the sequence.
pub fn pooled_killer_system(
    world_time: Res<WorldTime>,
    mut timers: ResMut<KillTimers>,
    mut query: Query<(
        Entity,
        &Active,
        &mut PooledKiller,
        &mut WorldPosition,
        &mut Scale,
        Option<&mut RigidBody>,
        Option<&mut Collider>,
    )>,
    mut commands: Commands,
) {
    let now = world_time.elapsed;
    for (entity, active, mut killer, mut position, mut scale, mut body, mut collider) in
        query.iter_mut()
    {
        if !active.is_active() {
            continue;
        }
        let mut ctx = KillerContext {
            entity,
            now,
            position: &mut *position,
            scale: &mut *scale,
            body: body.as_deref_mut(),
            collider: collider.as_deref_mut(),
            timers: &mut *timers,
            commands: &mut commands,
        };
        killer.on_tick(&mut ctx);
    }
}
