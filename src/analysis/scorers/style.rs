// src/analysis/scorers/style.rs
//
// Driving style: how hard the vehicle is driven on average.

use super::{band_ascending, BehavioralScore, ScoreLabel};
use crate::analysis::numeric::{max, mean, normalize};
use crate::analysis::summary::{acceleration_magnitudes, moving_speeds, positive_curvatures};
use crate::config::StyleThresholds;
use crate::types::MovementSample;

pub fn score(samples: &[MovementSample], thresholds: &StyleThresholds) -> BehavioralScore {
    let speeds = moving_speeds(samples);
    let accelerations = acceleration_magnitudes(samples);
    let curvatures = positive_curvatures(samples);

    let avg_speed = mean(&speeds);
    let avg_acceleration = mean(&accelerations);
    let avg_curvature = mean(&curvatures);

    let speed = normalize(avg_speed, thresholds.speed);
    let acceleration = normalize(avg_acceleration, thresholds.acceleration);
    let curvature = normalize(avg_curvature, thresholds.curvature);
    let overall = mean(&[speed, acceleration, curvature]);

    let label = band_ascending(
        overall,
        thresholds.cuts,
        [
            ScoreLabel::Conservative,
            ScoreLabel::Moderate,
            ScoreLabel::Aggressive,
        ],
    );

    BehavioralScore::new(overall, label)
        .component("speed", speed)
        .component("acceleration", acceleration)
        .component("curvature", curvature)
        .metric("avg_speed", avg_speed)
        .metric("max_speed", max(&speeds))
        .metric("avg_acceleration", avg_acceleration)
        .metric("max_acceleration", max(&accelerations))
        .metric("avg_curvature", avg_curvature)
}
