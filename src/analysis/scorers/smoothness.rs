// src/analysis/scorers/smoothness.rs
//
// Smoothness from jerk and angular acceleration. Components are reported as
// smoothness (1 - normalized rate), so a scene with no computable rate is
// perfectly smooth.

use super::{angular_accelerations, band_exceeding, jerks, BehavioralScore, ScoreLabel};
use crate::analysis::numeric::{max, mean, normalize};
use crate::config::SmoothnessThresholds;
use crate::types::MovementSample;

pub fn score(samples: &[MovementSample], thresholds: &SmoothnessThresholds) -> BehavioralScore {
    let jerk = jerks(samples);
    let angular = angular_accelerations(samples);

    let avg_jerk = mean(&jerk);
    let avg_angular = mean(&angular);

    let jerk_smoothness = 1.0 - normalize(avg_jerk, thresholds.jerk);
    let angular_smoothness = 1.0 - normalize(avg_angular, thresholds.angular_acceleration);
    let overall = mean(&[jerk_smoothness, angular_smoothness]);

    let label = band_exceeding(
        overall,
        thresholds.cuts,
        [ScoreLabel::Rough, ScoreLabel::Moderate, ScoreLabel::Smooth],
    );

    BehavioralScore::new(overall, label)
        .component("jerk_smoothness", jerk_smoothness)
        .component("angular_smoothness", angular_smoothness)
        .metric("avg_jerk", avg_jerk)
        .metric("max_jerk", max(&jerk))
        .metric("avg_angular_acceleration", avg_angular)
        .metric("max_angular_acceleration", max(&angular))
}
