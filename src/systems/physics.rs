//! Rigid body integration and sleep detection.
//!
//! Each frame, for every active, non-kinematic, awake [`RigidBody`]:
//!
//! 1. Velocity integrates the sum of enabled forces
//! 2. Position integrates velocity
//! 3. An enabled [`Collider`] resolves contact with the ground plane at
//!    [`GROUND_Y`]: the body is pushed out, bounces by its restitution and
//!    slides with friction
//! 4. The sleep timer advances; a body that stays slow long enough sleeps
//!
//! Sleeping bodies are not integrated. They are what the on-rest kill
//! trigger waits for.

use bevy_ecs::prelude::*;

use crate::components::active::Active;
use crate::components::collider::Collider;
use crate::components::rigidbody::RigidBody;
use crate::components::worldposition::WorldPosition;
use crate::resources::worldtime::WorldTime;

/// Height of the ground plane.
pub const GROUND_Y: f32 = 0.0;
/// Vertical bounce speeds below this are dropped to zero.
const BOUNCE_CUTOFF: f32 = 0.5;

/// Integrate rigid bodies and update their sleep state.
pub fn physics_system(
    world_time: Res<WorldTime>,
    mut query: Query<(&Active, &mut WorldPosition, &mut RigidBody, Option<&Collider>)>,
) {
    let dt = world_time.delta;
    if dt <= 0.0 {
        return;
    }
    for (active, mut position, mut rb, collider) in query.iter_mut() {
        if !active.is_active() || rb.kinematic || rb.sleeping {
            continue;
        }

        let acceleration = rb.total_acceleration();
        rb.velocity += acceleration * dt;
        position.pos += rb.velocity * dt;

        if let Some(collider) = collider.filter(|c| c.enabled) {
            let floor = GROUND_Y + collider.bottom_offset();
            if position.pos.y <= floor {
                position.pos.y = floor;
                if rb.velocity.y < 0.0 {
                    rb.velocity.y = -rb.velocity.y * rb.restitution;
                    if rb.velocity.y < BOUNCE_CUTOFF {
                        rb.velocity.y = 0.0;
                    }
                }
                let damping = (1.0 - rb.friction * dt).max(0.0);
                rb.velocity.x *= damping;
                rb.velocity.z *= damping;
            }
        }

        rb.update_sleep(dt);
    }
}
