// src/analysis/differentiator.rs
//
// Stage 2 of the movement pipeline: finite-difference kinematics.
//
// For every index i >= 1 with dt = (t[i] - t[i-1]) / 1e6 > 0:
//   velocity[i]         = (p[i] - p[i-1]) / dt
//   speed[i]            = ‖velocity[i]‖
//   angular_velocity[i] = Δheading / dt
//   acceleration[i]     = (velocity[i] - velocity[i-1]) / dt     (i > 1 only)
//
// dt <= 0 (duplicate or out-of-order timestamps) leaves the index at its
// zero defaults. Acceleration at the next index then differences against
// that zero velocity, matching the sequential update it replaces.

use super::heading::{wrap_angle, HeadedTrack};
use super::numeric::{norm3, scale3, sub3};
use crate::config::{DifferentiationConfig, HeadingDeltaMode};
use crate::types::MovementSample;
use tracing::warn;

const MICROS_PER_SECOND: f64 = 1e6;

/// Samples with velocity, speed, acceleration and angular velocity filled
/// in; curvature still zero.
#[derive(Debug, Clone)]
pub struct DifferentiatedTrack {
    pub(crate) samples: Vec<MovementSample>,
}

impl DifferentiatedTrack {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[MovementSample] {
        &self.samples
    }
}

/// Seconds between two microsecond timestamps. The difference is taken in
/// f64 so any pair of i64 timestamps is representable.
#[inline]
pub fn seconds_between(earlier_us: i64, later_us: i64) -> f64 {
    (later_us as f64 - earlier_us as f64) / MICROS_PER_SECOND
}

pub fn differentiate(track: HeadedTrack, config: &DifferentiationConfig) -> DifferentiatedTrack {
    let mut samples = track.samples;
    let mut skipped = 0usize;

    for i in 1..samples.len() {
        let prev = samples[i - 1];
        let dt = seconds_between(prev.timestamp, samples[i].timestamp);

        if dt <= 0.0 {
            skipped += 1;
            continue;
        }

        let curr = &mut samples[i];
        let velocity = scale3(sub3(curr.position, prev.position), 1.0 / dt);
        curr.velocity = velocity;
        curr.speed = norm3(velocity);

        if i > 1 {
            curr.acceleration = scale3(sub3(velocity, prev.velocity), 1.0 / dt);
        }

        let delta_heading = match config.heading_delta {
            HeadingDeltaMode::Wrapped => wrap_angle(curr.heading - prev.heading),
            HeadingDeltaMode::Raw => curr.heading - prev.heading,
        };
        curr.angular_velocity = delta_heading / dt;
    }

    if skipped > 0 {
        warn!(
            "Skipped {} of {} samples with non-increasing timestamps",
            skipped,
            samples.len()
        );
    }

    DifferentiatedTrack { samples }
}
