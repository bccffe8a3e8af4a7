//! Object pool for killable entities.
//!
//! Entities are built once and recycled: the spawner takes a parked entity
//! from [`EntityPool`] and activates it, and the deactivation observer puts it
//! back once its [`PooledKiller`](crate::components::pooledkiller::PooledKiller)
//! has run the kill sequence.

use bevy_ecs::prelude::*;

/// Parked entities plus lifetime counters.
#[derive(Resource, Debug, Default)]
pub struct EntityPool {
    inactive: Vec<Entity>,
    /// Maximum number of entities the pool will build.
    pub capacity: usize,
    /// Entities built so far.
    pub built: usize,
    pub activations: u64,
    pub returns: u64,
}

impl EntityPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Take a parked entity, most recently returned first.
    ///
    /// Not counted as an activation until [`record_reused`](Self::record_reused).
    pub fn take(&mut self) -> Option<Entity> {
        self.inactive.pop()
    }

    /// Record a parked entity handed out again.
    pub fn record_reused(&mut self) {
        self.activations += 1;
    }

    /// True when the pool may build another entity.
    pub fn can_build(&self) -> bool {
        self.built < self.capacity
    }

    /// Record a freshly built entity handed out immediately.
    pub fn record_built(&mut self) {
        self.built += 1;
        self.activations += 1;
    }

    /// Park an entity. Returning an entity that is already parked is a no-op.
    pub fn give_back(&mut self, entity: Entity) {
        if self.inactive.contains(&entity) {
            return;
        }
        self.inactive.push(entity);
        self.returns += 1;
    }

    pub fn parked(&self) -> usize {
        self.inactive.len()
    }

    pub fn is_parked(&self, entity: Entity) -> bool {
        self.inactive.contains(&entity)
    }
}

/// When the spawner fires next and which template it uses.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SpawnSchedule {
    /// Seconds between two spawns. `<= 0` disables spawning.
    pub interval: f32,
    /// Upper bound of the random launch speed.
    pub launch_speed: f32,
    pub next_at: f32,
    pub next_template: usize,
}

impl SpawnSchedule {
    pub fn every(interval: f32, launch_speed: f32) -> Self {
        Self {
            interval,
            launch_speed,
            next_at: 0.0,
            next_template: 0,
        }
    }
}

/// Seeded RNG for spawn parameters.
#[derive(Resource, Debug)]
pub struct SpawnRng(pub fastrand::Rng);

impl SpawnRng {
    pub fn seeded(seed: u64) -> Self {
        SpawnRng(fastrand::Rng::with_seed(seed))
    }

    /// Uniform value in `[min, max)`.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.0.f32()
    }
}
