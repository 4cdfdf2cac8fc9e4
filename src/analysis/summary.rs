// src/analysis/summary.rs
//
// Scalar reductions over a finished movement sequence.
//
// Statistics over speed and curvature only count samples where the signal
// is strictly positive: the first sample and skipped dt <= 0 steps carry a
// zero that means "not computed", not "standing still".

use super::differentiator::seconds_between;
use super::numeric::{distance3, max, mean, min, norm3, std_dev};
use super::segmentation::{segment_samples, Segment};
use crate::config::SegmentationConfig;
use crate::types::MovementSample;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Sum of 3D position deltas over all consecutive samples, meters
    pub total_distance: f64,
    pub avg_speed: f64,
    pub max_speed: f64,
    pub min_speed: f64,
    pub avg_curvature: f64,
    pub max_curvature: f64,
    pub turning_segments: Vec<Segment>,
    pub straight_segments: Vec<Segment>,
    pub stopping_periods: Vec<Segment>,
    /// Seconds between first and last sample
    pub total_duration: f64,
}

/// Speed and acceleration statistics plus segment counts for one scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VelocitySummary {
    pub avg_speed: f64,
    pub max_speed: f64,
    pub min_speed: f64,
    pub speed_std: f64,
    pub avg_acceleration: f64,
    pub max_acceleration: f64,
    pub total_distance: f64,
    pub total_duration: f64,
    pub turning_segments: usize,
    pub straight_segments: usize,
    pub stopping_periods: usize,
}

// ============================================================================
// SIGNAL EXTRACTION
// ============================================================================

/// Speeds of samples that received a velocity.
pub fn moving_speeds(samples: &[MovementSample]) -> Vec<f64> {
    samples
        .iter()
        .map(|s| s.speed)
        .filter(|v| *v > 0.0)
        .collect()
}

/// ‖acceleration‖ of samples with any nonzero acceleration component.
pub fn acceleration_magnitudes(samples: &[MovementSample]) -> Vec<f64> {
    samples
        .iter()
        .filter(|s| s.has_acceleration())
        .map(|s| norm3(s.acceleration))
        .collect()
}

pub fn positive_curvatures(samples: &[MovementSample]) -> Vec<f64> {
    samples
        .iter()
        .map(|s| s.curvature)
        .filter(|k| *k > 0.0)
        .collect()
}

pub fn total_distance(samples: &[MovementSample]) -> f64 {
    samples
        .windows(2)
        .map(|w| distance3(w[1].position, w[0].position))
        .sum()
}

pub fn total_duration(samples: &[MovementSample]) -> f64 {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => seconds_between(first.timestamp, last.timestamp),
        _ => 0.0,
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

pub fn summarize(samples: &[MovementSample], config: &SegmentationConfig) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics::default();
    }

    let speeds = moving_speeds(samples);
    let curvatures = positive_curvatures(samples);
    let segmentation = segment_samples(samples, config);

    SummaryStatistics {
        total_distance: total_distance(samples),
        avg_speed: mean(&speeds),
        max_speed: max(&speeds),
        min_speed: min(&speeds),
        avg_curvature: mean(&curvatures),
        max_curvature: max(&curvatures),
        turning_segments: segmentation.turning,
        straight_segments: segmentation.straight,
        stopping_periods: segmentation.stopping,
        total_duration: total_duration(samples),
    }
}

pub fn velocity_summary(samples: &[MovementSample], summary: &SummaryStatistics) -> VelocitySummary {
    let speeds = moving_speeds(samples);
    let accelerations = acceleration_magnitudes(samples);

    VelocitySummary {
        avg_speed: mean(&speeds),
        max_speed: max(&speeds),
        min_speed: min(&speeds),
        speed_std: std_dev(&speeds),
        avg_acceleration: mean(&accelerations),
        max_acceleration: max(&accelerations),
        total_distance: summary.total_distance,
        total_duration: summary.total_duration,
        turning_segments: summary.turning_segments.len(),
        straight_segments: summary.straight_segments.len(),
        stopping_periods: summary.stopping_periods.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::movement::build_movement;
    use crate::config::DifferentiationConfig;
    use crate::types::Pose;

    fn movement(points: &[(i64, [f64; 3])]) -> Vec<MovementSample> {
        let poses: Vec<Pose> = points
            .iter()
            .map(|(t, p)| Pose::identity_at(*t, *p))
            .collect();
        build_movement(&poses, &DifferentiationConfig::default())
    }

    #[test]
    fn test_distance_is_literal_sum() {
        let samples = movement(&[
            (0, [0.0, 0.0, 0.0]),
            (1_000_000, [3.0, 4.0, 0.0]),
            (2_000_000, [3.0, 4.0, 0.0]),
        ]);
        let stats = summarize(&samples, &SegmentationConfig::default());
        assert_eq!(stats.total_distance, 5.0);
        assert_eq!(stats.total_duration, 2.0);
    }

    #[test]
    fn test_speed_stats_exclude_uncomputed_samples() {
        let samples = movement(&[
            (0, [0.0, 0.0, 0.0]),
            (1_000_000, [2.0, 0.0, 0.0]),
            (2_000_000, [6.0, 0.0, 0.0]),
        ]);
        let stats = summarize(&samples, &SegmentationConfig::default());
        // Index 0 has speed 0 and is not a data point
        assert_eq!(stats.min_speed, 2.0);
        assert_eq!(stats.max_speed, 4.0);
        assert_eq!(stats.avg_speed, 3.0);
    }

    #[test]
    fn test_zero_motion_scene() {
        let samples = movement(&[
            (0, [7.0, 7.0, 0.0]),
            (500_000, [7.0, 7.0, 0.0]),
            (1_000_000, [7.0, 7.0, 0.0]),
            (1_500_000, [7.0, 7.0, 0.0]),
        ]);
        assert!(samples.iter().all(|s| s.speed == 0.0 && s.curvature == 0.0));

        let stats = summarize(&samples, &SegmentationConfig::default());
        assert_eq!(stats.total_distance, 0.0);
        assert_eq!(stats.avg_speed, 0.0);
        assert!(!stats.avg_speed.is_nan());
        assert_eq!(stats.avg_curvature, 0.0);
        assert_eq!(stats.stopping_periods.len(), 1);
        assert_eq!(stats.stopping_periods[0].end, 3);
    }

    #[test]
    fn test_empty_sequence_is_zeroed() {
        let stats = summarize(&[], &SegmentationConfig::default());
        assert_eq!(stats, SummaryStatistics::default());
        let vs = velocity_summary(&[], &stats);
        assert_eq!(vs, VelocitySummary::default());
    }

    #[test]
    fn test_velocity_summary_counts_segments() {
        let samples = movement(&[
            (0, [0.0, 0.0, 0.0]),
            (1_000_000, [1.0, 0.0, 0.0]),
            (2_000_000, [2.0, 0.0, 0.0]),
            (3_000_000, [2.0, 1.0, 0.0]),
        ]);
        let stats = summarize(&samples, &SegmentationConfig::default());
        let vs = velocity_summary(&samples, &stats);
        assert_eq!(vs.avg_speed, 1.0);
        assert_eq!(vs.speed_std, 0.0);
        assert_eq!(vs.turning_segments, 1);
        assert_eq!(vs.straight_segments, 2);
        assert_eq!(vs.stopping_periods, 1);
        // Velocity turns from +x to +y at the last step
        assert!((vs.max_acceleration - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_timestamp_span() {
        let samples = movement(&[(i64::MIN, [0.0, 0.0, 0.0]), (i64::MAX, [3.0, 4.0, 0.0])]);
        let stats = summarize(&samples, &SegmentationConfig::default());
        assert_eq!(stats.total_distance, 5.0);
        assert!(
            stats.total_duration > 1.8e13 && stats.total_duration.is_finite(),
            "duration {}",
            stats.total_duration
        );
        let vs = velocity_summary(&samples, &stats);
        assert!(vs.avg_speed > 0.0);
    }
}
