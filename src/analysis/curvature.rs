// src/analysis/curvature.rs
//
// Stage 3 of the movement pipeline: three-point path curvature.
//
// For each interior sample, with the (x, y) projections of its neighbours:
//   v1 = p[i] - p[i-1],  v2 = p[i+1] - p[i]
//   κ  = |v1 × v2| / (|v1| · |v2| · |v1 + v2|)
//
// This is the discrete Menger curvature up to a factor of 2: zero for
// collinear points, growing with the sharpness of the turn. Near-coincident
// points (a stationary vehicle) are guarded to zero rather than divided by.

use super::differentiator::DifferentiatedTrack;
use super::numeric::norm2;
use crate::types::MovementSample;

/// Curvature at `curr` given its neighbours, using x/y only.
pub fn three_point_curvature(prev: [f64; 3], curr: [f64; 3], next: [f64; 3]) -> f64 {
    let chord = norm2(next[0] - prev[0], next[1] - prev[1]);
    if chord <= 0.0 {
        return 0.0;
    }

    let v1 = (curr[0] - prev[0], curr[1] - prev[1]);
    let v2 = (next[0] - curr[0], next[1] - curr[1]);

    let cross = (v1.0 * v2.1 - v1.1 * v2.0).abs();
    let denom = norm2(v1.0, v1.1) * norm2(v2.0, v2.1) * norm2(v1.0 + v2.0, v1.1 + v2.1);

    if denom > 0.0 {
        cross / denom
    } else {
        0.0
    }
}

/// Final pipeline stage. The first and last samples keep curvature 0.
pub fn attach_curvature(track: DifferentiatedTrack) -> Vec<MovementSample> {
    let mut samples = track.samples;
    let n = samples.len();
    if n < 3 {
        return samples;
    }

    for i in 1..n - 1 {
        samples[i].curvature = three_point_curvature(
            samples[i - 1].position,
            samples[i].position,
            samples[i + 1].position,
        );
    }

    samples
}
