//! Continuous rotation from a wrapped device heading.
//!
//! Headings arrive in (−π, π]. When the device turns past ±π the raw reading
//! jumps by roughly 2π; the unwrapper notices the jump and folds a ±2π offset
//! into every later reading so the output keeps counting turns.
//!
//! The detector only fires when the jump has the opposite sign of the previous
//! step, which filters out some sensor noise but can miss a wrap that follows
//! a reversal. No smoothing is applied.

use super::constants::TAU;
use std::f32::consts::PI;

/// Angle-unwrapper state. Mutated only by [`AngleUnwrapper::push`].
#[derive(Clone, Debug, Default)]
pub struct AngleUnwrapper {
    latest_raw: Option<f32>,
    previous_delta: f32,
    accumulated_offset: f32,
}

impl AngleUnwrapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw heading sample and return the continuous angle.
    pub fn push(&mut self, raw: f32) -> f32 {
        let Some(previous_raw) = self.latest_raw else {
            self.latest_raw = Some(raw);
            self.previous_delta = 0.0;
            self.accumulated_offset = 0.0;
            return raw;
        };
        let delta = raw - previous_raw;
        if delta > PI && self.previous_delta < 0.0 {
            self.accumulated_offset -= TAU;
            log::debug!("[angle] negative wrap, offset={:.3}", self.accumulated_offset);
        } else if delta < -PI && self.previous_delta > 0.0 {
            self.accumulated_offset += TAU;
            log::debug!("[angle] positive wrap, offset={:.3}", self.accumulated_offset);
        }
        self.previous_delta = delta;
        self.latest_raw = Some(raw);
        raw + self.accumulated_offset
    }

    /// Latest continuous angle, or `None` before the first sample.
    pub fn continuous(&self) -> Option<f32> {
        self.latest_raw.map(|raw| raw + self.accumulated_offset)
    }

    pub fn accumulated_offset(&self) -> f32 {
        self.accumulated_offset
    }
}

/// Fold any angle into (−π, π].
#[inline]
pub fn wrap_signed(angle: f32) -> f32 {
    let a = (angle + PI).rem_euclid(TAU) - PI;
    if a == -PI {
        PI
    } else {
        a
    }
}

/// Advance an accumulator and keep it in [0, 2π). A zero step is a no-op.
#[inline]
pub fn advance_angle(angle: f32, step: f32) -> f32 {
    if step == 0.0 {
        return angle;
    }
    let a = (angle + step).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU
    if a >= TAU {
        0.0
    } else {
        a
    }
}
