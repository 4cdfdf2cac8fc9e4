// src/analysis/movement.rs
//
// The three pipeline stages composed in their only valid order. Each stage
// consumes the previous stage's track type, so curvature cannot run before
// differentiation and acceleration always sees the velocity at i-1.

use super::curvature::attach_curvature;
use super::differentiator::differentiate;
use super::heading::attach_headings;
use crate::config::DifferentiationConfig;
use crate::types::{MovementSample, Pose};
use tracing::debug;

/// Derive the full motion signal for an ordered pose sequence.
pub fn build_movement(poses: &[Pose], config: &DifferentiationConfig) -> Vec<MovementSample> {
    let headed = attach_headings(poses);
    let differentiated = differentiate(headed, config);
    let samples = attach_curvature(differentiated);

    debug!(
        "Built movement signal: {} samples ({:?} heading deltas)",
        samples.len(),
        config.heading_delta
    );

    samples
}
