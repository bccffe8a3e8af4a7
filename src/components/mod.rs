//! ECS components for entities.
//!
//! Submodules overview:
//! - [`active`] – scene-node activation flag used by pooling
//! - [`collider`] – sphere collider for ground contact
//! - [`killerhost`] – host traits consumed by the pooled killer
//! - [`pooled`] – pool membership and child node markers
//! - [`pooledkiller`] – lifecycle controller that returns entities to the pool
//! - [`ratecurve`] – rate curves for kill sequences
//! - [`rigidbody`] – dynamic body with named forces and sleep detection
//! - [`scale`] – 3D local scale
//! - [`worldposition`] – world-space position

pub mod active;
pub mod collider;
pub mod killerhost;
pub mod pooled;
pub mod pooledkiller;
pub mod ratecurve;
pub mod rigidbody;
pub mod scale;
pub mod worldposition;
