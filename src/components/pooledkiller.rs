//! Lifecycle controller for pooled entities.
//!
//! A [`PooledKiller`] decides when a reusable entity should be returned to its
//! pool and plays a short wind-down (shrink and/or descend) before doing so.
//!
//! # States
//!
//! ```text
//! Active ──rest (delay > 0)──▶ AwaitingDeath ──timer──▶ Dying ──duration──▶ Killed
//!    └───────rest (delay <= 0) / timeout / max life──────▲
//! ```
//!
//! `Active` is re-entered on every activation. The max-life timer runs
//! alongside every state and pushes the entity into `Dying` regardless of the
//! trigger mode.
//!
//! # Driving it
//!
//! The host calls three hooks plus one continuation, always passing itself as
//! the [`KillerHost`]:
//!
//! - [`PooledKiller::on_activate`] when the entity is (re)spawned from the pool
//! - [`PooledKiller::on_deactivate`] when the entity is returned or disabled
//! - [`PooledKiller::on_tick`] once per frame while active
//! - [`PooledKiller::on_timer_fired`] when a timer armed by the killer expires
//!
//! # Related
//!
//! - [`crate::systems::pooledkiller`] – the ECS host and per-frame system
//! - [`crate::events::lifecycle`] – activation/deactivation observers
//! - [`crate::events::killtimer`] – timer expiry observer

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::killerhost::{KillerHost, TimerHandle};
use crate::components::ratecurve::RateCurve;

/// What starts the kill.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KillTrigger {
    /// The physics body came to rest.
    #[default]
    OnRest,
    /// A fixed time after activation.
    OnTimeout,
}

/// Visual wind-down played between the kill trigger and deactivation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KillSequence {
    #[default]
    ShrinkAndDescend,
    Shrink,
    Descend,
    /// Nothing visible; the entity is held for the decay duration, then killed.
    ///
    /// The hold is intentional: the entity is not killed on the first dying
    /// tick, so every sequence kind takes the same time to return.
    None,
}

impl KillSequence {
    fn shrinks(self) -> bool {
        matches!(self, KillSequence::Shrink | KillSequence::ShrinkAndDescend)
    }

    fn descends(self) -> bool {
        matches!(self, KillSequence::Descend | KillSequence::ShrinkAndDescend)
    }
}

/// Per-template killer configuration. Immutable during a lifecycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KillerSettings {
    pub trigger: KillTrigger,
    /// Seconds between coming to rest and the start of the kill sequence.
    pub rest_delay: f32,
    /// Seconds after activation before the kill sequence, in timeout mode.
    pub timeout: f32,
    pub disable_collider_on_kill: bool,
    pub disable_body_on_kill: bool,
    pub sequence: KillSequence,
    /// Length of the kill sequence in seconds.
    pub sequence_duration: f32,
    pub sequence_rate: RateCurve,
    pub descend_distance: f32,
    /// Hard cap on a lifecycle in seconds. `<= 0` disables it.
    pub max_life: f32,
}

impl Default for KillerSettings {
    fn default() -> Self {
        Self {
            trigger: KillTrigger::OnRest,
            rest_delay: 2.0,
            timeout: 10.0,
            disable_collider_on_kill: true,
            disable_body_on_kill: true,
            sequence: KillSequence::ShrinkAndDescend,
            sequence_duration: 1.0,
            sequence_rate: RateCurve::default(),
            descend_distance: 0.5,
            max_life: 20.0,
        }
    }
}

/// Where the entity is in its current lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LifecyclePhase {
    #[default]
    Active,
    /// A rest-delay timer is pending.
    AwaitingDeath,
    /// The kill sequence is playing.
    Dying,
    /// Deactivation requested; nothing happens until the next activation.
    Killed,
}

/// Lifecycle controller component.
#[derive(Component, Clone, Debug)]
pub struct PooledKiller {
    pub settings: KillerSettings,
    /// Child nodes hidden when the kill sequence starts.
    pub disable_children_on_kill: Vec<Entity>,
    phase: LifecyclePhase,
    initial_position: Vec3,
    initial_scale: Option<Vec3>,
    sequence_start: f32,
    sequence_elapsed: f32,
    sequence_rate_sample: f32,
    timers: SmallVec<[TimerHandle; 4]>,
    validated: bool,
}

impl PooledKiller {
    pub fn new(settings: KillerSettings) -> Self {
        Self {
            settings,
            disable_children_on_kill: Vec::new(),
            phase: LifecyclePhase::Active,
            initial_position: Vec3::ZERO,
            initial_scale: None,
            sequence_start: 0.0,
            sequence_elapsed: 0.0,
            sequence_rate_sample: 0.0,
            timers: SmallVec::new(),
            validated: false,
        }
    }

    /// Set the child nodes to hide on kill (builder pattern).
    pub fn with_children(mut self, children: impl IntoIterator<Item = Entity>) -> Self {
        self.disable_children_on_kill = children.into_iter().collect();
        self
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn is_dying(&self) -> bool {
        self.phase == LifecyclePhase::Dying
    }

    pub fn awaiting_death(&self) -> bool {
        self.phase == LifecyclePhase::AwaitingDeath
    }

    /// Scale restored on every activation, captured on the first one.
    pub fn initial_scale(&self) -> Option<Vec3> {
        self.initial_scale
    }

    /// World position snapshotted when the current kill sequence started.
    pub fn initial_position(&self) -> Vec3 {
        self.initial_position
    }

    /// Seconds into the current kill sequence, as of the last tick.
    pub fn sequence_elapsed(&self) -> f32 {
        self.sequence_elapsed
    }

    /// Last value sampled from the rate curve.
    pub fn sequence_rate_sample(&self) -> f32 {
        self.sequence_rate_sample
    }

    /// Timers armed in this lifecycle and not yet fired or canceled.
    pub fn pending_timers(&self) -> &[TimerHandle] {
        &self.timers
    }

    /// Activation hook: reset, then arm the lifecycle timers.
    pub fn on_activate(&mut self, host: &mut impl KillerHost) {
        // Pooled entities are activated right after creation, so the first
        // activation sees the authored scale.
        let initial_scale = *self.initial_scale.get_or_insert_with(|| host.local_scale());

        self.cancel_timers(host);
        self.phase = LifecyclePhase::Active;
        self.sequence_start = 0.0;
        self.sequence_elapsed = 0.0;
        self.sequence_rate_sample = 0.0;

        if self.settings.disable_collider_on_kill {
            host.set_collision_enabled(true);
        }
        if self.settings.disable_body_on_kill {
            host.set_body_simulated(true);
        }
        host.set_local_scale(initial_scale);
        for &child in &self.disable_children_on_kill {
            host.set_node_active(child, true);
        }

        if !self.validated {
            self.validate(&*host);
            self.validated = true;
        }

        if self.settings.max_life > 0.0 {
            self.arm(host, self.settings.max_life);
        }
        if self.settings.trigger == KillTrigger::OnTimeout {
            self.arm(host, self.settings.timeout);
        }
    }

    /// Deactivation hook: cancel every pending timer. Safe to call twice.
    pub fn on_deactivate(&mut self, host: &mut impl KillerHost) {
        self.cancel_timers(host);
    }

    /// Per-frame update while the entity is active.
    pub fn on_tick(&mut self, host: &mut impl KillerHost) {
        match self.phase {
            LifecyclePhase::Active | LifecyclePhase::AwaitingDeath => self.check_rest(host),
            LifecyclePhase::Dying => self.advance_sequence(host),
            LifecyclePhase::Killed => {}
        }
    }

    /// Continuation for a timer armed by this killer.
    ///
    /// Handles from a previous lifecycle, or already canceled, are ignored.
    pub fn on_timer_fired(&mut self, handle: TimerHandle, host: &mut impl KillerHost) {
        let Some(idx) = self.timers.iter().position(|&h| h == handle) else {
            debug!("Ignoring stale kill timer {:?}", handle);
            return;
        };
        self.timers.swap_remove(idx);
        self.begin_death(host);
    }

    /// Report configuration problems. Runs on the first activation only.
    fn validate(&self, host: &impl KillerHost) {
        if self.settings.trigger == KillTrigger::OnRest && !host.has_body() {
            error!(
                "PooledKiller set to kill on rest but the entity has no rigid body; only max life can kill it"
            );
        }
        if self.settings.sequence_duration <= 0.0 && self.settings.sequence != KillSequence::None {
            warn!(
                "PooledKiller sequence {:?} has non-positive duration {}; it will be skipped",
                self.settings.sequence, self.settings.sequence_duration
            );
        }
    }

    fn check_rest(&mut self, host: &mut impl KillerHost) {
        if self.settings.trigger != KillTrigger::OnRest || !host.is_resting() {
            return;
        }
        if self.settings.rest_delay <= 0.0 {
            self.begin_death(host);
        } else if self.phase == LifecyclePhase::Active {
            self.phase = LifecyclePhase::AwaitingDeath;
            self.arm(host, self.settings.rest_delay);
        }
    }

    fn begin_death(&mut self, host: &mut impl KillerHost) {
        if matches!(self.phase, LifecyclePhase::Dying | LifecyclePhase::Killed) {
            return;
        }
        for &child in &self.disable_children_on_kill {
            host.set_node_active(child, false);
        }
        self.initial_position = host.world_position();
        self.sequence_start = host.now();
        self.sequence_elapsed = 0.0;
        self.phase = LifecyclePhase::Dying;
        if self.settings.disable_collider_on_kill {
            host.set_collision_enabled(false);
        }
        if self.settings.disable_body_on_kill {
            host.set_body_simulated(false);
        }
        debug!("Kill sequence {:?} started at {:.3}", self.settings.sequence, self.sequence_start);
    }

    fn advance_sequence(&mut self, host: &mut impl KillerHost) {
        let duration = self.settings.sequence_duration;
        self.sequence_elapsed = host.now() - self.sequence_start;
        if duration <= 0.0 {
            self.kill_now(host);
            return;
        }

        let t = (self.sequence_elapsed / duration).clamp(0.0, 1.0);
        self.sequence_rate_sample = self.settings.sequence_rate.sample(t);

        let sequence = self.settings.sequence;
        if sequence.shrinks() {
            let initial_scale = self.initial_scale.unwrap_or(Vec3::ONE);
            host.set_local_scale(initial_scale * self.sequence_rate_sample);
        }
        if sequence.descends() {
            let target = self.initial_position - Vec3::Y * self.settings.descend_distance;
            host.set_world_position(self.initial_position.lerp(target, t));
        }

        if self.sequence_elapsed >= duration {
            self.kill_now(host);
        }
    }

    fn kill_now(&mut self, host: &mut impl KillerHost) {
        self.phase = LifecyclePhase::Killed;
        host.deactivate_self();
    }

    fn arm(&mut self, host: &mut impl KillerHost, delay: f32) {
        let handle = host.wait_then_fire(delay);
        self.timers.push(handle);
    }

    fn cancel_timers(&mut self, host: &mut impl KillerHost) {
        for handle in self.timers.drain(..) {
            host.cancel(handle);
        }
    }
}
