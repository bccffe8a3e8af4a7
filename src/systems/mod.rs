//! Engine systems.
//!
//! Submodules overview
//! - [`killtimers`] – deliver expired kill timers as events
//! - [`physics`] – integrate rigid bodies against the ground and detect rest
//! - [`pooledkiller`] – ECS host for pooled killers and their per-frame tick
//! - [`spawner`] – hand out pooled entities at a fixed interval
//! - [`time`] – update simulation time and delta

pub mod killtimers;
pub mod physics;
pub mod pooledkiller;
pub mod spawner;
pub mod time;
