//! ECS resources made available to systems.
//!
//! Overview
//! - `killtimers` – cooperative one-shot timers armed by pooled killers
//! - `pool` – parked pooled entities, lifetime counters, spawn RNG
//! - `simconfig` – INI-backed settings for the headless simulation
//! - `templates` – JSON entity templates and their loader
//! - `worldtime` – simulation time and delta
pub mod killtimers;
pub mod pool;
pub mod simconfig;
pub mod templates;
pub mod worldtime;
