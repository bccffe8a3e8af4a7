//! Scene-node activation flag.
//!
//! Pooled entities are never despawned; they are parked with `Active(false)`
//! and brought back with `Active(true)`. Systems that simulate or tick
//! entities skip inactive ones.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Active(pub bool);

impl Default for Active {
    fn default() -> Self {
        Active(true)
    }
}

impl Active {
    pub fn is_active(&self) -> bool {
        self.0
    }
}
