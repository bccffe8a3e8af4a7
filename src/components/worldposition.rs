use bevy_ecs::prelude::Component;
use glam::Vec3;

/// World-space position of an entity's pivot.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct WorldPosition {
    pub pos: Vec3,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec3::new(x, y, z),
        }
    }
}
