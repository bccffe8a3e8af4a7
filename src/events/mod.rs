//! Event types and observers used by the pool.
//!
//! Submodules:
//! - [`killtimer`] – kill timer expiry, delivered to the owning killer
//! - [`lifecycle`] – activation/deactivation hooks for pooled entities
//!
//! See each submodule for concrete event data, semantics, and example usage.
pub mod killtimer;
pub mod lifecycle;
