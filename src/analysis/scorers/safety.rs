// src/analysis/scorers/safety.rs
//
// Safety margins from ego-to-object distances over every annotated object
// in every sample. The score only depends on how many close interactions
// occur; it has no categorical bands and is labeled `Unrated`.

use super::{BehavioralScore, ScoreLabel};
use crate::analysis::numeric::{distance3, mean, min};
use crate::config::SafetyThresholds;
use crate::types::SceneSample;

/// Every ego-to-object distance in the scene, meters.
pub fn object_distances(scene: &[SceneSample]) -> Vec<f64> {
    scene
        .iter()
        .flat_map(|sample| {
            let ego = sample.pose.position;
            sample
                .annotations
                .iter()
                .map(move |obj| distance3(ego, obj.translation))
        })
        .collect()
}

pub fn score(scene: &[SceneSample], thresholds: &SafetyThresholds) -> BehavioralScore {
    let distances = object_distances(scene);

    let close = distances
        .iter()
        .filter(|d| **d < thresholds.close_distance)
        .count();
    let high_risk = distances
        .iter()
        .filter(|d| **d < thresholds.very_close_distance)
        .count();

    let overall = (1.0 - close as f64 / thresholds.max_interactions).max(0.0);

    BehavioralScore::new(overall, ScoreLabel::Unrated)
        .component("interaction_safety", overall)
        .metric("avg_safety_margin", mean(&distances))
        .metric("min_safety_margin", min(&distances))
        .metric("close_interactions", close as f64)
        .metric("high_risk_interactions", high_risk as f64)
        .metric("observed_objects", distances.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ObjectAnnotation, Pose};

    fn object_at(x: f64, y: f64) -> ObjectAnnotation {
        ObjectAnnotation {
            category: "vehicle.car".to_string(),
            translation: [x, y, 0.0],
            size: [1.9, 4.6, 1.7],
        }
    }

    #[test]
    fn test_no_objects_is_safe() {
        let scene = vec![SceneSample::new(Pose::identity_at(0, [0.0; 3]))];
        let s = score(&scene, &SafetyThresholds::default());
        assert_eq!(s.overall_score, 1.0);
        assert_eq!(s.metric_value("min_safety_margin"), Some(0.0));
        assert_eq!(s.metric_value("observed_objects"), Some(0.0));
        assert_eq!(s.label, ScoreLabel::Unrated);
    }

    #[test]
    fn test_close_and_high_risk_counts() {
        let scene = vec![
            SceneSample::with_annotations(
                Pose::identity_at(0, [0.0; 3]),
                vec![object_at(1.0, 0.0), object_at(3.0, 4.0), object_at(30.0, 40.0)],
            ),
            SceneSample::with_annotations(
                Pose::identity_at(500_000, [10.0, 0.0, 0.0]),
                vec![object_at(13.0, 0.0)],
            ),
        ];
        let s = score(&scene, &SafetyThresholds::default());
        // Distances 1, 5, 50, 3: 5.0 is not strictly closer than 5
        assert_eq!(s.metric_value("close_interactions"), Some(2.0));
        assert_eq!(s.metric_value("high_risk_interactions"), Some(1.0));
        assert_eq!(s.metric_value("min_safety_margin"), Some(1.0));
        assert_eq!(s.metric_value("avg_safety_margin"), Some(14.75));
        assert!((s.overall_score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let crowd: Vec<ObjectAnnotation> = (0..25).map(|i| object_at(0.1 * i as f64, 0.0)).collect();
        let scene = vec![SceneSample::with_annotations(
            Pose::identity_at(0, [0.0; 3]),
            crowd,
        )];
        let s = score(&scene, &SafetyThresholds::default());
        assert_eq!(s.overall_score, 0.0);
        assert_eq!(s.metric_value("close_interactions"), Some(25.0));
    }
}
