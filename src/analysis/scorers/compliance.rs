// src/analysis/scorers/compliance.rs
//
// Traffic compliance as the fraction of samples within the speed and
// acceleration limits. A sample exactly at a limit complies; a scene with
// no measured values is fully compliant.

use super::{band_exceeding, BehavioralScore, ScoreLabel};
use crate::analysis::numeric::mean;
use crate::analysis::summary::{acceleration_magnitudes, moving_speeds};
use crate::config::ComplianceThresholds;
use crate::types::MovementSample;

/// (compliance rate, violation count) for `values` against `limit`.
fn compliance_rate(values: &[f64], limit: f64) -> (f64, usize) {
    if values.is_empty() {
        return (1.0, 0);
    }
    let violations = values.iter().filter(|v| **v > limit).count();
    (1.0 - violations as f64 / values.len() as f64, violations)
}

pub fn score(samples: &[MovementSample], thresholds: &ComplianceThresholds) -> BehavioralScore {
    let (speed_rate, speed_violations) =
        compliance_rate(&moving_speeds(samples), thresholds.speed_limit);
    let (accel_rate, accel_violations) =
        compliance_rate(&acceleration_magnitudes(samples), thresholds.acceleration_limit);
    let overall = mean(&[speed_rate, accel_rate]);

    let label = band_exceeding(
        overall,
        thresholds.cuts,
        [ScoreLabel::Poor, ScoreLabel::Moderate, ScoreLabel::Good],
    );

    BehavioralScore::new(overall, label)
        .component("speed_compliance_rate", speed_rate)
        .component("acceleration_compliance_rate", accel_rate)
        .metric("speed_violations", speed_violations as f64)
        .metric("acceleration_violations", accel_violations as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scorers::test_support::straight_run;

    #[test]
    fn test_limit_is_not_a_violation() {
        assert_eq!(compliance_rate(&[8.0, 8.0], 8.0), (1.0, 0));
        assert_eq!(compliance_rate(&[8.0, 8.5], 8.0), (0.5, 1));
        assert_eq!(compliance_rate(&[], 8.0), (1.0, 0));
    }

    #[test]
    fn test_speeding_half_the_time() {
        // Speeds 4, 4, 12, 12; accelerations 0, 8, 0 (only the 8 counts)
        let samples = straight_run(&[0.0, 4.0, 8.0, 20.0, 32.0]);
        let s = score(&samples, &ComplianceThresholds::default());
        assert_eq!(s.component_score("speed_compliance_rate"), Some(0.5));
        assert_eq!(s.metric_value("speed_violations"), Some(2.0));
        assert_eq!(s.component_score("acceleration_compliance_rate"), Some(0.0));
        assert_eq!(s.overall_score, 0.25);
        assert_eq!(s.label, ScoreLabel::Poor);
    }

    #[test]
    fn test_empty_scene_is_compliant() {
        let s = score(&[], &ComplianceThresholds::default());
        assert_eq!(s.overall_score, 1.0);
        assert_eq!(s.label, ScoreLabel::Good);
    }
}
