// src/analysis/scorers/predictability.rs
//
// Predictability: how little speed, acceleration and curvature vary.
// Each consistency is max(0, 1 - std / threshold) with population std.

use super::{band_exceeding, BehavioralScore, ScoreLabel};
use crate::analysis::numeric::{mean, std_dev};
use crate::analysis::summary::{acceleration_magnitudes, moving_speeds, positive_curvatures};
use crate::config::PredictabilityThresholds;
use crate::types::MovementSample;

fn consistency(std: f64, threshold: f64) -> f64 {
    (1.0 - std / threshold).max(0.0)
}

pub fn score(samples: &[MovementSample], thresholds: &PredictabilityThresholds) -> BehavioralScore {
    let speed_std = std_dev(&moving_speeds(samples));
    let acceleration_std = std_dev(&acceleration_magnitudes(samples));
    let curvature_std = std_dev(&positive_curvatures(samples));

    let speed = consistency(speed_std, thresholds.speed_std);
    let acceleration = consistency(acceleration_std, thresholds.acceleration_std);
    let curvature = consistency(curvature_std, thresholds.curvature_std);
    let overall = mean(&[speed, acceleration, curvature]);

    let label = band_exceeding(
        overall,
        thresholds.cuts,
        [
            ScoreLabel::Unpredictable,
            ScoreLabel::Moderate,
            ScoreLabel::Predictable,
        ],
    );

    BehavioralScore::new(overall, label)
        .component("speed_consistency", speed)
        .component("acceleration_consistency", acceleration)
        .component("curvature_consistency", curvature)
        .metric("speed_std", speed_std)
        .metric("acceleration_std", acceleration_std)
        .metric("curvature_std", curvature_std)
}
