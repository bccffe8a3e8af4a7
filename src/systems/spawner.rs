//! Pool spawner.
//!
//! Hands out pooled entities at a fixed interval. A parked entity is reused
//! when one is available; otherwise a new one is built from the next
//! template, up to the pool's capacity. Either way the entity is placed,
//! launched, and activated through an
//! [`ActivateEvent`](crate::events::lifecycle::ActivateEvent).

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, warn};

use crate::components::active::Active;
use crate::components::collider::Collider;
use crate::components::pooled::{ChildNode, Pooled};
use crate::components::pooledkiller::PooledKiller;
use crate::components::rigidbody::RigidBody;
use crate::components::scale::Scale;
use crate::components::worldposition::WorldPosition;
use crate::events::lifecycle::ActivateEvent;
use crate::resources::pool::{EntityPool, SpawnRng, SpawnSchedule};
use crate::resources::templates::{PoolTemplate, TemplateLibrary};
use crate::resources::worldtime::WorldTime;

pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
/// Height new and recycled entities are launched from.
pub const SPAWN_HEIGHT: f32 = 2.0;
/// Half extent of the square spawn area on the ground plane.
const SPAWN_AREA: f32 = 5.0;

/// Queue the spawn of an inactive entity built from `template`.
///
/// Child nodes listed by the template are spawned first and handed to the
/// entity's [`PooledKiller`].
pub fn build_pooled_entity(
    commands: &mut Commands,
    template: &PoolTemplate,
    template_index: usize,
    position: Vec3,
    velocity: Vec3,
) -> Entity {
    let children: Vec<Entity> = template
        .children
        .iter()
        .map(|name| {
            commands
                .spawn((ChildNode { name: name.clone() }, Active(true)))
                .id()
        })
        .collect();

    let killer = PooledKiller::new(template.killer.clone()).with_children(children);
    let mut entity = commands.spawn((
        Pooled {
            template: template_index,
        },
        Active(false),
        WorldPosition { pos: position },
        Scale::uniform(template.scale),
        Collider::sphere(template.radius),
        killer,
    ));
    if template.has_body {
        let mut body = RigidBody::with_physics(template.friction, template.restitution);
        body.add_force("gravity", GRAVITY);
        body.velocity = velocity;
        entity.insert(body);
    }
    entity.id()
}

/// Spawn or recycle one pooled entity each time the schedule comes due.
pub fn pool_spawner_system(
    world_time: Res<WorldTime>,
    library: Res<TemplateLibrary>,
    mut schedule: ResMut<SpawnSchedule>,
    mut pool: ResMut<EntityPool>,
    mut rng: ResMut<SpawnRng>,
    mut placed: Query<(&mut WorldPosition, Option<&mut RigidBody>), With<Pooled>>,
    mut commands: Commands,
) {
    if schedule.interval <= 0.0 || library.is_empty() || world_time.elapsed < schedule.next_at {
        return;
    }
    schedule.next_at = world_time.elapsed + schedule.interval;

    let speed = schedule.launch_speed;
    let position = Vec3::new(
        rng.range(-SPAWN_AREA, SPAWN_AREA),
        SPAWN_HEIGHT,
        rng.range(-SPAWN_AREA, SPAWN_AREA),
    );
    let velocity = Vec3::new(
        rng.range(-speed, speed),
        rng.range(0.0, speed),
        rng.range(-speed, speed),
    );

    let entity = if let Some(entity) = pool.take() {
        let Ok((mut pos, body)) = placed.get_mut(entity) else {
            warn!("Dropping parked {:?}, which no longer exists", entity);
            return;
        };
        pos.pos = position;
        if let Some(mut body) = body {
            body.wake_with_velocity(velocity);
        }
        pool.record_reused();
        entity
    } else if pool.can_build() {
        let index = schedule.next_template % library.len();
        schedule.next_template += 1;
        let entity = build_pooled_entity(
            &mut commands,
            &library.templates[index],
            index,
            position,
            velocity,
        );
        pool.record_built();
        debug!(
            "Built {:?} from template '{}'",
            entity, library.templates[index].name
        );
        entity
    } else {
        debug!("Pool exhausted at {:.3}", world_time.elapsed);
        return;
    };

    commands.trigger(ActivateEvent { entity });
}
