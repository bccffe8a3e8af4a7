//! poolkiller library.
//!
//! Lifecycle control for pooled game entities: a [`PooledKiller`] watches
//! for its entity coming to rest (or timing out), plays a short shrink and
//! descend sequence, and returns the entity to its pool. The controller is
//! engine independent; the rest of the crate hosts it inside a `bevy_ecs`
//! world.
//!
//! [`PooledKiller`]: components::pooledkiller::PooledKiller

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
