//! Sphere collider used for ground contact.
//!
//! Disabling the collider lets an entity sink through the ground plane, which
//! is what the descend kill sequence relies on.

use bevy_ecs::prelude::Component;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Collider {
    pub radius: f32,
    pub enabled: bool,
}

impl Collider {
    /// Create an enabled collider with the given radius.
    pub fn sphere(radius: f32) -> Self {
        Self {
            radius,
            enabled: true,
        }
    }

    /// Distance from the pivot to the lowest point of the collider.
    pub fn bottom_offset(&self) -> f32 {
        self.radius.max(0.0)
    }
}
