// src/analysis/scorers/collision.rs
//
// Collision risk per observed object, decaying linearly with distance:
//   risk = max(0, 1 - distance / reference_distance)
// The scene score is the mean over all objects in all samples.

use super::safety::object_distances;
use super::{band_ascending, BehavioralScore, ScoreLabel};
use crate::analysis::numeric::{max, mean};
use crate::config::CollisionThresholds;
use crate::types::SceneSample;

pub fn object_risk(distance: f64, reference_distance: f64) -> f64 {
    (1.0 - distance / reference_distance).max(0.0)
}

pub fn score(scene: &[SceneSample], thresholds: &CollisionThresholds) -> BehavioralScore {
    let risks: Vec<f64> = object_distances(scene)
        .into_iter()
        .map(|d| object_risk(d, thresholds.reference_distance))
        .collect();

    let avg_risk = mean(&risks);
    let high_risk_objects = risks
        .iter()
        .filter(|r| **r > thresholds.high_risk_object)
        .count();

    let label = band_ascending(
        avg_risk,
        thresholds.cuts,
        [ScoreLabel::Low, ScoreLabel::Medium, ScoreLabel::High],
    );

    BehavioralScore::new(avg_risk, label)
        .component("avg_collision_risk", avg_risk)
        .metric("max_collision_risk", max(&risks))
        .metric("high_risk_objects", high_risk_objects as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ObjectAnnotation, Pose};

    fn scene_with(distances: &[f64]) -> Vec<SceneSample> {
        vec![SceneSample::with_annotations(
            Pose::identity_at(0, [0.0; 3]),
            distances
                .iter()
                .map(|d| ObjectAnnotation {
                    category: "human.pedestrian.adult".to_string(),
                    translation: [*d, 0.0, 0.0],
                    size: [0.6, 0.6, 1.8],
                })
                .collect(),
        )]
    }

    #[test]
    fn test_object_risk_decay() {
        assert_eq!(object_risk(0.0, 10.0), 1.0);
        assert_eq!(object_risk(5.0, 10.0), 0.5);
        assert_eq!(object_risk(10.0, 10.0), 0.0);
        assert_eq!(object_risk(40.0, 10.0), 0.0);
    }

    #[test]
    fn test_scene_risk_aggregation() {
        // Risks 0.8, 0.5, 0.0, 0.0
        let s = score(&scene_with(&[2.0, 5.0, 12.0, 50.0]), &CollisionThresholds::default());
        let max_risk = s.metric_value("max_collision_risk").unwrap();
        assert!((max_risk - 0.8).abs() < 1e-12, "got {max_risk}");
        // 0.5 is not strictly above the high-risk cut
        assert_eq!(s.metric_value("high_risk_objects"), Some(1.0));
        assert!((s.overall_score - 1.3 / 4.0).abs() < 1e-12);
        assert_eq!(s.label, ScoreLabel::Medium);
    }

    #[test]
    fn test_nothing_observed_is_low() {
        let s = score(&scene_with(&[]), &CollisionThresholds::default());
        assert_eq!(s.overall_score, 0.0);
        assert_eq!(s.label, ScoreLabel::Low);
    }
}
