// src/analysis/scorers/mod.rs
//
// Behavioral scorers. Each one maps derived motion signals through fixed
// thresholds into [0, 1] component scores, averages them into an overall
// score, and labels the overall score with two cut points.
//
//   MovementSample[] ──┬→ style ─────────┐
//                      ├→ smoothness ────┤
//                      ├→ predictability ┤
//                      ├→ risk ──────────┼→ BehavioralReport
//                      └→ compliance ────┤
//   SceneSample[] ─────┬→ safety ────────┤
//                      └→ collision ─────┘
//
// Every scorer accepts empty input and returns its neutral default.

pub mod collision;
pub mod compliance;
pub mod predictability;
pub mod risk;
pub mod safety;
pub mod smoothness;
pub mod style;

use super::differentiator::seconds_between;
use super::numeric::{norm3, sub3};
use crate::config::{CutPoints, ScoringConfig};
use crate::types::{MovementSample, SceneSample};
use serde::Serialize;
use std::collections::BTreeMap;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    // driving style
    Conservative,
    Moderate,
    Aggressive,
    // smoothness
    Rough,
    Smooth,
    // predictability
    Unpredictable,
    Predictable,
    // risk / collision
    Low,
    Medium,
    High,
    // compliance
    Good,
    Poor,
    /// Scorer without categorical bands (safety margin)
    Unrated,
}

impl ScoreLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
            Self::Rough => "rough",
            Self::Smooth => "smooth",
            Self::Unpredictable => "unpredictable",
            Self::Predictable => "predictable",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Good => "good",
            Self::Poor => "poor",
            Self::Unrated => "unrated",
        }
    }
}

/// Output of one scorer. Components are the normalized [0, 1] inputs to the
/// overall score; metrics are the raw quantities they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehavioralScore {
    pub components: BTreeMap<String, f64>,
    pub metrics: BTreeMap<String, f64>,
    pub overall_score: f64,
    pub label: ScoreLabel,
}

impl BehavioralScore {
    pub(crate) fn new(overall_score: f64, label: ScoreLabel) -> Self {
        Self {
            components: BTreeMap::new(),
            metrics: BTreeMap::new(),
            overall_score: unit(overall_score),
            label,
        }
    }

    pub(crate) fn component(mut self, name: &str, value: f64) -> Self {
        self.components.insert(name.to_string(), unit(value));
        self
    }

    pub(crate) fn metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }

    pub fn component_score(&self, name: &str) -> Option<f64> {
        self.components.get(name).copied()
    }

    pub fn metric_value(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehavioralReport {
    pub driving_style: BehavioralScore,
    pub smoothness: BehavioralScore,
    pub predictability: BehavioralScore,
    pub risk_assessment: BehavioralScore,
    pub safety_margins: BehavioralScore,
    pub traffic_compliance: BehavioralScore,
    pub collision_risk: BehavioralScore,
}

impl BehavioralReport {
    /// Scores in a fixed order, paired with their report field names.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &BehavioralScore)> {
        [
            ("driving_style", &self.driving_style),
            ("smoothness", &self.smoothness),
            ("predictability", &self.predictability),
            ("risk_assessment", &self.risk_assessment),
            ("safety_margins", &self.safety_margins),
            ("traffic_compliance", &self.traffic_compliance),
            ("collision_risk", &self.collision_risk),
        ]
        .into_iter()
    }
}

/// Run every scorer over one scene.
pub fn score_behavior(
    samples: &[MovementSample],
    scene: &[SceneSample],
    config: &ScoringConfig,
) -> BehavioralReport {
    BehavioralReport {
        driving_style: style::score(samples, &config.style),
        smoothness: smoothness::score(samples, &config.smoothness),
        predictability: predictability::score(samples, &config.predictability),
        risk_assessment: risk::score(samples, &config.risk),
        safety_margins: safety::score(scene, &config.safety),
        traffic_compliance: compliance::score(samples, &config.compliance),
        collision_risk: collision::score(scene, &config.collision),
    }
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// Clamp into [0, 1]; NaN becomes 0.
fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Bands where a higher score is "more": below `low`, below `high`, rest.
pub(crate) fn band_ascending(score: f64, cuts: CutPoints, labels: [ScoreLabel; 3]) -> ScoreLabel {
    if score < cuts.low {
        labels[0]
    } else if score < cuts.high {
        labels[1]
    } else {
        labels[2]
    }
}

/// Bands that must be strictly exceeded: above `high`, above `low`, rest.
pub(crate) fn band_exceeding(score: f64, cuts: CutPoints, labels: [ScoreLabel; 3]) -> ScoreLabel {
    if score > cuts.high {
        labels[2]
    } else if score > cuts.low {
        labels[1]
    } else {
        labels[0]
    }
}

/// ‖a[i] - a[i-1]‖ / dt for i >= 2 with dt > 0, m/s³.
pub fn jerks(samples: &[MovementSample]) -> Vec<f64> {
    (2..samples.len())
        .filter_map(|i| {
            let dt = seconds_between(samples[i - 1].timestamp, samples[i].timestamp);
            (dt > 0.0)
                .then(|| norm3(sub3(samples[i].acceleration, samples[i - 1].acceleration)) / dt)
        })
        .collect()
}

/// |ω[i] - ω[i-1]| / dt for i >= 2, rad/s². A non-positive dt records 0
/// instead of being dropped.
pub fn angular_accelerations(samples: &[MovementSample]) -> Vec<f64> {
    (2..samples.len())
        .map(|i| {
            let dt = seconds_between(samples[i - 1].timestamp, samples[i].timestamp);
            if dt > 0.0 {
                (samples[i].angular_velocity - samples[i - 1].angular_velocity).abs() / dt
            } else {
                0.0
            }
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::{straight_run, violent_zigzag};
    use super::*;
    use crate::types::{ObjectAnnotation, Pose};

    #[test]
    fn test_jerk_and_angular_series_start_at_two() {
        let samples = straight_run(&[0.0, 1.0, 4.0, 9.0]);
        // Accelerations: [0, 0, 2, 2] → jerks at i=2: 2, i=3: 0
        assert_eq!(jerks(&samples), vec![2.0, 0.0]);
        assert_eq!(angular_accelerations(&samples), vec![0.0, 0.0]);
        assert!(jerks(&samples[..2]).is_empty());
    }

    #[test]
    fn test_angular_series_keeps_zero_for_duplicate_timestamp() {
        let poses = vec![
            Pose::identity_at(0, [0.0; 3]),
            Pose::identity_at(1_000_000, [1.0, 0.0, 0.0]),
            Pose::identity_at(1_000_000, [2.0, 0.0, 0.0]),
        ];
        let samples = crate::analysis::movement::build_movement(
            &poses,
            &crate::config::DifferentiationConfig::default(),
        );
        assert!(jerks(&samples).is_empty());
        assert_eq!(angular_accelerations(&samples), vec![0.0]);
    }

    #[test]
    fn test_all_scores_bounded_under_extreme_motion() {
        let samples = violent_zigzag();
        let scene: Vec<SceneSample> = samples
            .iter()
            .map(|s| {
                SceneSample::with_annotations(
                    Pose::new(s.timestamp, s.position, s.rotation),
                    (0..20)
                        .map(|k| ObjectAnnotation {
                            category: "vehicle.car".to_string(),
                            translation: [s.position[0] + 0.1 * k as f64, s.position[1], 0.0],
                            size: [1.8, 4.5, 1.5],
                        })
                        .collect(),
                )
            })
            .collect();

        let report = score_behavior(&samples, &scene, &ScoringConfig::default());
        for (name, score) in report.iter() {
            assert!(
                (0.0..=1.0).contains(&score.overall_score),
                "{name} overall {} outside [0, 1]",
                score.overall_score
            );
            for (component, value) in &score.components {
                assert!(
                    (0.0..=1.0).contains(value),
                    "{name}.{component} = {value} outside [0, 1]"
                );
            }
        }
        assert_eq!(report.risk_assessment.label, ScoreLabel::High);
        assert_eq!(report.driving_style.label, ScoreLabel::Aggressive);
        assert_eq!(report.safety_margins.overall_score, 0.0);
    }

    #[test]
    fn test_empty_input_yields_defaults() {
        let report = score_behavior(&[], &[], &ScoringConfig::default());
        assert_eq!(report.driving_style.overall_score, 0.0);
        assert_eq!(report.driving_style.label, ScoreLabel::Conservative);
        assert_eq!(report.smoothness.overall_score, 1.0);
        assert_eq!(report.predictability.overall_score, 1.0);
        assert_eq!(report.risk_assessment.overall_score, 0.0);
        assert_eq!(report.safety_margins.overall_score, 1.0);
        assert_eq!(report.traffic_compliance.overall_score, 1.0);
        assert_eq!(report.collision_risk.overall_score, 0.0);
    }

    #[test]
    fn test_band_helpers() {
        let cuts = CutPoints::new(0.3, 0.7);
        let asc = [ScoreLabel::Low, ScoreLabel::Medium, ScoreLabel::High];
        assert_eq!(band_ascending(0.29, cuts, asc), ScoreLabel::Low);
        assert_eq!(band_ascending(0.3, cuts, asc), ScoreLabel::Medium);
        assert_eq!(band_ascending(0.7, cuts, asc), ScoreLabel::High);

        let exc = [ScoreLabel::Rough, ScoreLabel::Moderate, ScoreLabel::Smooth];
        assert_eq!(band_exceeding(0.3, cuts, exc), ScoreLabel::Rough);
        assert_eq!(band_exceeding(0.7, cuts, exc), ScoreLabel::Moderate);
        assert_eq!(band_exceeding(0.71, cuts, exc), ScoreLabel::Smooth);
    }
}
