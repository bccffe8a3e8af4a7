//! Host interfaces consumed by [`PooledKiller`](super::pooledkiller::PooledKiller).
//!
//! The killer never talks to the ECS directly. Everything it needs from the
//! outside world (time, physics, the scene, timers) goes through the traits
//! in this module, so the same state machine runs inside the engine (see
//! [`crate::systems::pooledkiller::KillerContext`]) and against plain fakes in
//! unit tests.
//!
//! - [`Clock`] – monotonic simulation time
//! - [`PhysicsBody`] – rest query plus collider/body toggles
//! - [`SceneGraph`] – node activation and transform access
//! - [`TimerScheduler`] – cooperative, cancelable one-shot timers
//!
//! [`KillerHost`] bundles all four and is implemented automatically.

use bevy_ecs::prelude::Entity;
use glam::Vec3;

/// Opaque handle identifying one armed timer.
///
/// Handles are never reused by a scheduler, so a stale handle from a previous
/// lifecycle can't be mistaken for a fresh one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Monotonic simulation clock in seconds.
pub trait Clock {
    fn now(&self) -> f32;
}

/// Physics collaborators attached to the entity.
pub trait PhysicsBody {
    /// Whether a body able to answer [`is_resting`](Self::is_resting) is present.
    fn has_body(&self) -> bool;
    /// True while the body reports it is not moving. Always false without a body.
    fn is_resting(&self) -> bool;
    fn set_collision_enabled(&mut self, enabled: bool);
    /// `false` makes the body kinematic (ignored by the simulation).
    fn set_body_simulated(&mut self, simulated: bool);
}

/// Scene access for the owning entity and its configured child nodes.
pub trait SceneGraph {
    fn set_node_active(&mut self, node: Entity, active: bool);
    /// Deactivate the owning entity, returning it to its pool.
    fn deactivate_self(&mut self);
    fn world_position(&self) -> Vec3;
    fn set_world_position(&mut self, position: Vec3);
    fn local_scale(&self) -> Vec3;
    fn set_local_scale(&mut self, scale: Vec3);
}

/// Cooperative one-shot timers.
///
/// `wait_then_fire` never blocks. When `delay` seconds of simulation time
/// have passed the host calls
/// [`PooledKiller::on_timer_fired`](super::pooledkiller::PooledKiller::on_timer_fired)
/// with the returned handle, unless it was canceled first.
pub trait TimerScheduler {
    fn wait_then_fire(&mut self, delay: f32) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Everything the killer consumes from its host.
pub trait KillerHost: Clock + PhysicsBody + SceneGraph + TimerScheduler {}

impl<T: Clock + PhysicsBody + SceneGraph + TimerScheduler> KillerHost for T {}
