//! Rate curves for kill sequences.
//!
//! A [`RateCurve`] maps normalized time (0.0 at the start of a decay, 1.0 at
//! its end) to a multiplier. The shrink sequence multiplies the entity's
//! initial scale by this value, so a curve going from 1.0 down to 0.0 makes
//! the entity vanish smoothly.
//!
//! Curves are authored in entity templates:
//!
//! ```json
//! { "kind": "keyframes", "keys": [ { "time": 0.0, "value": 1.0 },
//!                                  { "time": 0.7, "value": 0.8 },
//!                                  { "time": 1.0, "value": 0.0 } ] }
//! { "kind": "eased", "easing": "quad_in", "from": 1.0, "to": 0.0 }
//! ```

use serde::{Deserialize, Serialize};

/// Easing functions for smooth interpolation.
///
/// These transform a linear `t` value (0.0 to 1.0) to create different
/// acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    /// Starts slow, accelerates (cubic).
    CubicIn,
    /// Starts fast, decelerates (cubic).
    CubicOut,
    /// Slow start and end (cubic).
    CubicInOut,
}

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0].
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
    }
}

/// A single point of a keyframed curve.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Maps normalized decay time to a rate multiplier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateCurve {
    /// Same value for every `t`.
    Constant { value: f32 },
    /// `from` at `t = 0` to `to` at `t = 1`, shaped by `easing`.
    Eased { easing: Easing, from: f32, to: f32 },
    /// Piecewise linear through the keys. Outside the first/last key the
    /// end values are held. An empty curve evaluates to 0.0.
    Keyframes { keys: Vec<Keyframe> },
}

impl Default for RateCurve {
    /// Full size at the start, nothing at the end.
    fn default() -> Self {
        RateCurve::keyframes(vec![Keyframe::new(0.0, 1.0), Keyframe::new(1.0, 0.0)])
    }
}

impl RateCurve {
    /// `sample(t) == t` over [0, 1].
    pub fn identity() -> Self {
        RateCurve::Eased {
            easing: Easing::Linear,
            from: 0.0,
            to: 1.0,
        }
    }

    pub fn constant(value: f32) -> Self {
        RateCurve::Constant { value }
    }

    /// Build a keyframed curve. Keys are sorted by time.
    pub fn keyframes(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        RateCurve::Keyframes { keys }
    }

    /// Evaluate the curve at normalized time `t`.
    pub fn sample(&self, t: f32) -> f32 {
        match self {
            RateCurve::Constant { value } => *value,
            RateCurve::Eased { easing, from, to } => from + (to - from) * ease(*easing, t),
            RateCurve::Keyframes { keys } => sample_keys(keys, t),
        }
    }
}

fn sample_keys(keys: &[Keyframe], t: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return 0.0;
    };
    if t <= first.time {
        return first.value;
    }
    if t >= last.time {
        return last.value;
    }
    // keys are sorted; find the segment containing t
    let idx = keys.partition_point(|k| k.time <= t);
    let a = keys[idx - 1];
    let b = keys[idx];
    let span = b.time - a.time;
    if span <= f32::EPSILON {
        return b.value;
    }
    a.value + (b.value - a.value) * ((t - a.time) / span)
}
