//! End-to-end lifecycle tests: activation, kill triggers, the kill sequence
//! and the return to the pool, driven through the real schedule.

use bevy_ecs::prelude::*;
use glam::Vec3;

use poolkiller::components::active::Active;
use poolkiller::components::collider::Collider;
use poolkiller::components::pooled::{ChildNode, Pooled};
use poolkiller::components::pooledkiller::{
    KillSequence, KillTrigger, KillerSettings, LifecyclePhase, PooledKiller,
};
use poolkiller::components::rigidbody::RigidBody;
use poolkiller::components::scale::Scale;
use poolkiller::components::worldposition::WorldPosition;
use poolkiller::events::lifecycle::{ActivateEvent, DeactivateEvent};
use poolkiller::game::{build_schedule, setup_world, step, summarize};
use poolkiller::resources::killtimers::KillTimers;
use poolkiller::resources::pool::EntityPool;
use poolkiller::resources::simconfig::SimConfig;
use poolkiller::resources::templates::PoolTemplate;

const EPSILON: f32 = 1e-5;
/// Exactly representable, so elapsed time lands on timer deadlines.
const DT: f32 = 0.25;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// World with the spawner disabled; tests place their own entities.
fn make_world() -> World {
    let mut config = SimConfig::new();
    config.spawn_interval = 0.0;
    setup_world(&config, Vec::new())
}

fn run(world: &mut World, schedule: &mut Schedule, frames: usize) {
    for _ in 0..frames {
        step(world, schedule, DT);
    }
}

fn activate(world: &mut World, entity: Entity) {
    world.trigger(ActivateEvent { entity });
    world.flush();
}

fn spawn_killer(world: &mut World, settings: KillerSettings, children: Vec<Entity>) -> Entity {
    world
        .spawn((
            Pooled { template: 0 },
            Active(false),
            WorldPosition::new(0.0, 1.0, 0.0),
            Scale::uniform(2.0),
            Collider::sphere(0.25),
            PooledKiller::new(settings).with_children(children),
        ))
        .id()
}

fn timeout_settings() -> KillerSettings {
    KillerSettings {
        trigger: KillTrigger::OnTimeout,
        timeout: 1.0,
        sequence: KillSequence::ShrinkAndDescend,
        sequence_duration: 0.5,
        descend_distance: 0.5,
        max_life: 0.0,
        ..KillerSettings::default()
    }
}

fn killer(world: &World, entity: Entity) -> &PooledKiller {
    world.get::<PooledKiller>(entity).unwrap()
}

#[test]
fn timeout_kill_plays_sequence_and_parks_entity() {
    let mut world = make_world();
    let mut schedule = build_schedule();
    let e = spawn_killer(&mut world, timeout_settings(), Vec::new());

    activate(&mut world, e);
    assert!(world.get::<Active>(e).unwrap().is_active());
    assert_eq!(world.resource::<KillTimers>().pending_for(e), 1);

    // 0.75: still waiting
    run(&mut world, &mut schedule, 3);
    assert_eq!(killer(&world, e).phase(), LifecyclePhase::Active);

    // 1.0: timeout fires and the sequence starts at full size
    run(&mut world, &mut schedule, 1);
    assert!(killer(&world, e).is_dying());
    assert!(approx_eq(world.get::<Scale>(e).unwrap().scale.x, 2.0));
    assert!(!world.get::<Collider>(e).unwrap().enabled);

    // 1.25: half way
    run(&mut world, &mut schedule, 1);
    assert!(approx_eq(world.get::<Scale>(e).unwrap().scale.x, 1.0));
    assert!(approx_eq(world.get::<WorldPosition>(e).unwrap().pos.y, 0.75));

    // 1.5: sequence done, entity returned
    run(&mut world, &mut schedule, 1);
    assert_eq!(killer(&world, e).phase(), LifecyclePhase::Killed);
    assert!(approx_eq(world.get::<Scale>(e).unwrap().scale.x, 0.0));
    assert!(approx_eq(world.get::<WorldPosition>(e).unwrap().pos.y, 0.5));
    assert!(!world.get::<Active>(e).unwrap().is_active());
    assert!(world.resource::<EntityPool>().is_parked(e));
    assert_eq!(world.resource::<KillTimers>().pending_for(e), 0);
}

#[test]
fn reactivation_restores_entity() {
    let mut world = make_world();
    let mut schedule = build_schedule();
    let e = spawn_killer(&mut world, timeout_settings(), Vec::new());

    activate(&mut world, e);
    run(&mut world, &mut schedule, 6);
    assert!(!world.get::<Active>(e).unwrap().is_active());

    activate(&mut world, e);
    let k = killer(&world, e);
    assert_eq!(k.phase(), LifecyclePhase::Active);
    assert!(approx_eq(k.sequence_elapsed(), 0.0));
    assert!(approx_eq(world.get::<Scale>(e).unwrap().scale.x, 2.0));
    assert!(world.get::<Collider>(e).unwrap().enabled);
    assert_eq!(world.resource::<KillTimers>().pending_for(e), 1);

    // the second lifecycle times out one second after reactivation
    run(&mut world, &mut schedule, 3);
    assert!(!killer(&world, e).is_dying());
    run(&mut world, &mut schedule, 1);
    assert!(killer(&world, e).is_dying());
}

#[test]
fn rest_kill_disables_children_and_physics() {
    let mut world = make_world();
    let mut schedule = build_schedule();
    let child = world
        .spawn((ChildNode { name: "trail".into() }, Active(true)))
        .id();
    let settings = KillerSettings {
        trigger: KillTrigger::OnRest,
        rest_delay: 0.5,
        sequence: KillSequence::Shrink,
        sequence_duration: 0.5,
        max_life: 0.0,
        ..KillerSettings::default()
    };
    let e = spawn_killer(&mut world, settings, vec![child]);
    // no forces: the body is still from the start and sleeps after 0.5s
    let mut body = RigidBody::new();
    body.sleep_delay = 0.5;
    world.entity_mut(e).insert(body);

    activate(&mut world, e);

    // 0.5: asleep, rest delay armed
    run(&mut world, &mut schedule, 2);
    assert!(world.get::<RigidBody>(e).unwrap().is_sleeping());
    assert!(killer(&world, e).awaiting_death());
    assert!(world.get::<Active>(child).unwrap().is_active());

    // 1.0: rest delay over
    run(&mut world, &mut schedule, 2);
    assert!(killer(&world, e).is_dying());
    assert!(!world.get::<Active>(child).unwrap().is_active());
    assert!(world.get::<RigidBody>(e).unwrap().kinematic);
    assert!(!world.get::<Collider>(e).unwrap().enabled);
    // shrink only: no descent
    assert!(approx_eq(world.get::<WorldPosition>(e).unwrap().pos.y, 1.0));

    // 1.5: killed
    run(&mut world, &mut schedule, 2);
    assert!(!world.get::<Active>(e).unwrap().is_active());
    assert!(world.resource::<EntityPool>().is_parked(e));

    activate(&mut world, e);
    assert!(world.get::<Active>(child).unwrap().is_active());
    assert!(!world.get::<RigidBody>(e).unwrap().kinematic);
    assert!(world.get::<Collider>(e).unwrap().enabled);
}

#[test]
fn max_life_kills_entity_without_body() {
    let mut world = make_world();
    let mut schedule = build_schedule();
    let settings = KillerSettings {
        trigger: KillTrigger::OnRest,
        sequence: KillSequence::None,
        sequence_duration: 0.5,
        max_life: 1.0,
        ..KillerSettings::default()
    };
    let e = spawn_killer(&mut world, settings, Vec::new());

    activate(&mut world, e);
    run(&mut world, &mut schedule, 4);
    assert!(killer(&world, e).is_dying());
    // the None sequence leaves the transform alone
    assert!(approx_eq(world.get::<Scale>(e).unwrap().scale.x, 2.0));

    run(&mut world, &mut schedule, 2);
    assert!(!world.get::<Active>(e).unwrap().is_active());
    assert!(world.resource::<EntityPool>().is_parked(e));
}

#[test]
fn early_deactivation_cancels_timers() {
    let mut world = make_world();
    let mut schedule = build_schedule();
    let settings = KillerSettings {
        max_life: 5.0,
        ..timeout_settings()
    };
    let e = spawn_killer(&mut world, settings, Vec::new());

    activate(&mut world, e);
    assert_eq!(world.resource::<KillTimers>().pending_for(e), 2);

    world.trigger(DeactivateEvent { entity: e });
    world.flush();
    assert_eq!(world.resource::<KillTimers>().pending_for(e), 0);
    assert!(killer(&world, e).pending_timers().is_empty());
    assert!(!world.get::<Active>(e).unwrap().is_active());

    // nothing fires later on
    run(&mut world, &mut schedule, 8);
    assert_eq!(killer(&world, e).phase(), LifecyclePhase::Active);
    assert_eq!(world.resource::<EntityPool>().returns, 1);
}

#[test]
fn spawner_builds_then_reuses_parked_entity() {
    let mut config = SimConfig::new();
    config.capacity = 1;
    config.spawn_interval = DT;
    let template = PoolTemplate {
        name: "flash".into(),
        has_body: false,
        killer: KillerSettings {
            trigger: KillTrigger::OnTimeout,
            timeout: 0.5,
            sequence_duration: 0.0,
            max_life: 0.0,
            ..KillerSettings::default()
        },
        ..PoolTemplate::default()
    };
    let mut world = setup_world(&config, vec![template]);
    let mut schedule = build_schedule();

    // 0.25: built and activated
    run(&mut world, &mut schedule, 1);
    assert_eq!(world.resource::<EntityPool>().built, 1);
    assert_eq!(summarize(&mut world).live, 1);

    // 0.75: timed out and killed in the same frame
    run(&mut world, &mut schedule, 2);
    let pool = world.resource::<EntityPool>();
    assert_eq!(pool.returns, 1);
    assert_eq!(pool.parked(), 1);

    // 1.0: the parked entity goes out again
    run(&mut world, &mut schedule, 1);
    let summary = summarize(&mut world);
    assert_eq!(summary.built, 1);
    assert_eq!(summary.activations, 2);
    assert_eq!(summary.parked, 0);
    assert_eq!(summary.live, 1);
}

#[test]
fn spawner_skips_parked_entity_that_was_despawned() {
    let mut config = SimConfig::new();
    config.capacity = 0;
    config.spawn_interval = DT;
    let mut world = setup_world(&config, vec![PoolTemplate::default()]);
    let mut schedule = build_schedule();

    let gone = world.spawn(Pooled { template: 0 }).id();
    world.resource_mut::<EntityPool>().give_back(gone);
    world.despawn(gone);

    run(&mut world, &mut schedule, 1);
    let pool = world.resource::<EntityPool>();
    assert_eq!(pool.activations, 0);
    assert_eq!(pool.parked(), 0);
}

#[test]
fn falling_body_comes_to_rest_on_ground() {
    let mut world = make_world();
    let mut schedule = Schedule::default();
    schedule.add_systems(poolkiller::systems::physics::physics_system);

    let mut body = RigidBody::with_physics(0.8, 0.0);
    body.add_force("gravity", Vec3::new(0.0, -9.81, 0.0));
    let e = world
        .spawn((
            Active(true),
            WorldPosition::new(0.0, 1.0, 0.0),
            Collider::sphere(0.25),
            body,
        ))
        .id();

    for _ in 0..180 {
        step(&mut world, &mut schedule, 1.0 / 60.0);
    }
    assert!(world.get::<RigidBody>(e).unwrap().is_sleeping());
    assert!(approx_eq(world.get::<WorldPosition>(e).unwrap().pos.y, 0.25));
}
