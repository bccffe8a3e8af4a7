//! World setup and the main loop for the headless pool simulation.
//!
//! [`setup_world`] inserts resources and registers the lifecycle observers,
//! [`build_schedule`] wires the per-frame systems in order, and
//! [`run_frames`] drives both for a fixed number of frames.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::active::Active;
use crate::components::pooledkiller::PooledKiller;
use crate::events::killtimer::kill_timer_observer;
use crate::events::lifecycle::{activate_observer, deactivate_observer};
use crate::resources::killtimers::KillTimers;
use crate::resources::pool::{EntityPool, SpawnRng, SpawnSchedule};
use crate::resources::simconfig::SimConfig;
use crate::resources::templates::{PoolTemplate, TemplateLibrary};
use crate::resources::worldtime::WorldTime;
use crate::systems::killtimers::update_kill_timers;
use crate::systems::physics::physics_system;
use crate::systems::pooledkiller::pooled_killer_system;
use crate::systems::spawner::pool_spawner_system;
use crate::systems::time::update_world_time;

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub frames: u64,
    pub built: usize,
    pub activations: u64,
    pub returns: u64,
    pub parked: usize,
    pub live: usize,
    pub dying: usize,
    pub pending_timers: usize,
}

/// Register the lifecycle and kill-timer observers.
pub fn register_observers(world: &mut World) {
    world.spawn(Observer::new(activate_observer));
    world.spawn(Observer::new(deactivate_observer));
    world.spawn(Observer::new(kill_timer_observer));
    // Ensure the observers are registered before any system triggers events.
    world.flush();
}

/// Build a world with every resource the simulation needs.
pub fn setup_world(config: &SimConfig, templates: Vec<PoolTemplate>) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(KillTimers::new());
    world.insert_resource(EntityPool::with_capacity(config.capacity));
    world.insert_resource(SpawnSchedule::every(config.spawn_interval, config.launch_speed));
    world.insert_resource(SpawnRng::seeded(config.seed));
    world.insert_resource(TemplateLibrary::new(templates));
    world.insert_resource(config.clone());
    register_observers(&mut world);
    world
}

/// Per-frame systems, in order.
///
/// Timers are delivered before the killers tick, so a sequence started by a
/// timer this frame already advances this frame, the same way a resumed
/// delay runs before the next update.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            pool_spawner_system,
            physics_system,
            update_kill_timers,
            pooled_killer_system,
        )
            .chain(),
    );
    update
}

/// Advance the world by one frame of `dt` unscaled seconds.
pub fn step(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// Run `frames` frames and summarize the pool afterwards.
pub fn run_frames(world: &mut World, schedule: &mut Schedule, frames: u64, dt: f32) -> RunSummary {
    for frame in 0..frames {
        step(world, schedule, dt);
        if frame > 0 && frame % 600 == 0 {
            let pool = world.resource::<EntityPool>();
            info!(
                "frame {}: built={} activations={} returns={} parked={}",
                frame,
                pool.built,
                pool.activations,
                pool.returns,
                pool.parked()
            );
        }
    }
    summarize(world)
}

/// Collect the current pool counters.
pub fn summarize(world: &mut World) -> RunSummary {
    let mut live = 0;
    let mut dying = 0;
    let mut query = world.query::<(&Active, &PooledKiller)>();
    for (active, killer) in query.iter(world) {
        if active.is_active() {
            live += 1;
            if killer.is_dying() {
                dying += 1;
            }
        }
    }
    let frames = world.resource::<WorldTime>().frame_count;
    let pending_timers = world.resource::<KillTimers>().len();
    let pool = world.resource::<EntityPool>();
    RunSummary {
        frames,
        built: pool.built,
        activations: pool.activations,
        returns: pool.returns,
        parked: pool.parked(),
        live,
        dying,
        pending_timers,
    }
}
