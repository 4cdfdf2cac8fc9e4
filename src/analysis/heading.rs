// src/analysis/heading.rs
//
// Stage 1 of the movement pipeline: yaw extraction.

use crate::types::{MovementSample, Pose};
use std::f64::consts::{PI, TAU};

/// Yaw (rotation about the vertical axis) of a `[w, x, y, z]` quaternion.
///
/// The quaternion is assumed unit-norm; it is not re-normalized here.
/// Result lies in (-π, π].
pub fn heading_from_quaternion(q: [f64; 4]) -> f64 {
    let [w, x, y, z] = q;
    let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));
    // atan2 returns -π for (-0.0, negative); fold it onto +π
    if yaw <= -PI {
        yaw + TAU
    } else {
        yaw
    }
}

/// Map any finite angle into (-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    let mut a = angle.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }
    a
}

/// Samples carrying pose and heading only; derived kinematics still zero.
#[derive(Debug, Clone)]
pub struct HeadedTrack {
    pub(crate) samples: Vec<MovementSample>,
}

impl HeadedTrack {
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

/// Build the first pipeline stage from an ordered pose sequence.
pub fn attach_headings(poses: &[Pose]) -> HeadedTrack {
    let samples = poses
        .iter()
        .map(|p| MovementSample::from_pose(p, heading_from_quaternion(p.rotation)))
        .collect();
    HeadedTrack { samples }
}
