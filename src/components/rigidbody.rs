//! Dynamic body with named acceleration forces and sleep detection.
//!
//! The [`RigidBody`] component stores velocity and a set of named acceleration
//! forces (gravity, wind, ...) that add up to its acceleration. The
//! [`physics_system`](crate::systems::physics::physics_system) integrates it
//! and decides when the body falls asleep: once its speed stays below
//! `sleep_speed` for `sleep_delay` seconds, `sleeping` is set and stays set
//! until something wakes the body up.
//!
//! A kinematic body is skipped by the simulation entirely. Kill sequences
//! make bodies kinematic so that they can be moved by hand.

use bevy_ecs::prelude::Component;
use glam::Vec3;
use rustc_hash::FxHashMap;

/// Default speed below which a body counts as still.
pub const DEFAULT_SLEEP_SPEED: f32 = 0.05;
/// Default seconds a body must stay still before it sleeps.
pub const DEFAULT_SLEEP_DELAY: f32 = 0.5;

/// Dynamic body updated by the physics system.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_physics(0.5, 0.4);
/// rb.add_force("gravity", Vec3::new(0.0, -9.81, 0.0));
/// rb.wake_with_velocity(Vec3::new(1.0, 4.0, 0.0));
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec3,
    /// Named accelerations in world units per second squared.
    pub forces: FxHashMap<String, Vec3>,
    /// Velocity damping factor. Applied as: velocity *= (1 - friction * delta).
    pub friction: f32,
    /// Fraction of vertical speed kept when bouncing off the ground.
    pub restitution: f32,
    /// When true, the physics system leaves the body alone.
    pub kinematic: bool,
    pub sleep_speed: f32,
    pub sleep_delay: f32,
    /// Seconds the body has spent below `sleep_speed`.
    pub still_time: f32,
    pub sleeping: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no forces.
    pub fn new() -> Self {
        Self::with_physics(0.0, 0.0)
    }

    /// Create a RigidBody with friction and bounce configured.
    pub fn with_physics(friction: f32, restitution: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            forces: FxHashMap::default(),
            friction,
            restitution,
            kinematic: false,
            sleep_speed: DEFAULT_SLEEP_SPEED,
            sleep_delay: DEFAULT_SLEEP_DELAY,
            still_time: 0.0,
            sleeping: false,
        }
    }

    /// Add or replace a named acceleration force.
    pub fn add_force(&mut self, name: &str, value: Vec3) {
        self.forces.insert(name.to_string(), value);
    }

    /// Sum of all forces.
    pub fn total_acceleration(&self) -> Vec3 {
        self.forces.values().copied().sum()
    }

    /// True while the body is asleep. Kinematic bodies never report rest.
    pub fn is_sleeping(&self) -> bool {
        !self.kinematic && self.sleeping
    }

    /// Set a new velocity and clear the sleep state.
    pub fn wake_with_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.wake();
    }

    pub fn wake(&mut self) {
        self.sleeping = false;
        self.still_time = 0.0;
    }

    /// Accumulate stillness for one step of `dt` seconds.
    pub fn update_sleep(&mut self, dt: f32) {
        if self.velocity.length_squared() <= self.sleep_speed * self.sleep_speed {
            self.still_time += dt;
            if self.still_time >= self.sleep_delay {
                self.sleeping = true;
                self.velocity = Vec3::ZERO;
            }
        } else {
            self.wake();
        }
    }
}
