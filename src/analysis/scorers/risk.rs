// src/analysis/scorers/risk.rs
//
// Risk from the peak values of speed, acceleration and jerk.

use super::{band_ascending, jerks, BehavioralScore, ScoreLabel};
use crate::analysis::numeric::{max, mean, normalize};
use crate::analysis::summary::{acceleration_magnitudes, moving_speeds};
use crate::config::RiskThresholds;
use crate::types::MovementSample;

pub fn score(samples: &[MovementSample], thresholds: &RiskThresholds) -> BehavioralScore {
    let max_speed = max(&moving_speeds(samples));
    let max_acceleration = max(&acceleration_magnitudes(samples));
    let max_jerk = max(&jerks(samples));

    let speed = normalize(max_speed, thresholds.speed);
    let acceleration = normalize(max_acceleration, thresholds.acceleration);
    let jerk = normalize(max_jerk, thresholds.jerk);
    let overall = mean(&[speed, acceleration, jerk]);

    let label = band_ascending(
        overall,
        thresholds.cuts,
        [ScoreLabel::Low, ScoreLabel::Medium, ScoreLabel::High],
    );

    BehavioralScore::new(overall, label)
        .component("speed_risk", speed)
        .component("acceleration_risk", acceleration)
        .component("jerk_risk", jerk)
        .metric("max_speed", max_speed)
        .metric("max_acceleration", max_acceleration)
        .metric("max_jerk", max_jerk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scorers::test_support::straight_run;

    #[test]
    fn test_gentle_drive_is_low_risk() {
        let samples = straight_run(&[0.0, 1.0, 2.0, 3.0]);
        let s = score(&samples, &RiskThresholds::default());
        assert_eq!(s.component_score("speed_risk"), Some(0.1));
        assert_eq!(s.component_score("jerk_risk"), Some(0.0));
        assert_eq!(s.label, ScoreLabel::Low);
    }

    #[test]
    fn test_peaks_drive_the_score() {
        // Velocities 0, 5, 10 → max accel 5, jerk |5 - 0| = 5
        let samples = straight_run(&[0.0, 5.0, 15.0]);
        let s = score(&samples, &RiskThresholds::default());
        assert_eq!(s.metric_value("max_speed"), Some(10.0));
        assert_eq!(s.metric_value("max_acceleration"), Some(5.0));
        assert_eq!(s.metric_value("max_jerk"), Some(5.0));
        assert_eq!(s.component_score("speed_risk"), Some(1.0));
        assert_eq!(s.component_score("acceleration_risk"), Some(1.0));
        assert_eq!(s.component_score("jerk_risk"), Some(0.5));
        assert!((s.overall_score - 2.5 / 3.0).abs() < 1e-12);
        assert_eq!(s.label, ScoreLabel::High);
    }
}
