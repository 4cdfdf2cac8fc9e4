// src/analysis/diagnostics.rs
//
// Data-quality checks over the raw samples of a scene. Each sample is
// inspected on its own and every problem found becomes one `SystemIssue`;
// the issue count alone decides the overall health.
//
// A sample with no pose at all never reaches this point (the provider
// rejects it as a malformed scene), so the high-severity check looks for
// poses that decoded but carry no usable geometry.

use crate::config::DiagnosticsConfig;
use crate::types::{Pose, SceneSample};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Non-finite translation, or a rotation that is not a usable quaternion
    DegeneratePose,
    MissingSensorData,
    NoAnnotations,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::DegeneratePose => "degenerate_pose",
            IssueKind::MissingSensorData => "missing_sensor_data",
            IssueKind::NoAnnotations => "no_annotations",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::DegeneratePose => Severity::High,
            IssueKind::MissingSensorData | IssueKind::NoAnnotations => Severity::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    pub timestamp: i64,
    /// Set for `MissingSensorData` only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor: Option<String>,
}

impl SystemIssue {
    fn new(kind: IssueKind, timestamp: i64) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            timestamp,
            sensor: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemHealth {
    #[default]
    Good,
    Moderate,
    Poor,
}

impl SystemHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemHealth::Good => "good",
            SystemHealth::Moderate => "moderate",
            SystemHealth::Poor => "poor",
        }
    }

    fn from_issue_count(count: usize, moderate_limit: usize) -> Self {
        if count == 0 {
            SystemHealth::Good
        } else if count < moderate_limit {
            SystemHealth::Moderate
        } else {
            SystemHealth::Poor
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SystemPerformance {
    pub total_issues: usize,
    pub high_severity_issues: usize,
    pub medium_severity_issues: usize,
    pub issues: Vec<SystemIssue>,
    pub system_health: SystemHealth,
}

fn is_degenerate(pose: &Pose) -> bool {
    let translation_ok = pose.position.iter().all(|v| v.is_finite());
    let rotation_ok = pose.rotation.iter().all(|v| v.is_finite())
        && pose.rotation.iter().any(|v| *v != 0.0);
    !(translation_ok && rotation_ok)
}

/// Issues for one sample, in check order: pose, sensors, annotations.
pub fn sample_issues(sample: &SceneSample, config: &DiagnosticsConfig) -> Vec<SystemIssue> {
    let timestamp = sample.pose.timestamp;
    let mut issues = Vec::new();

    if is_degenerate(&sample.pose) {
        issues.push(SystemIssue::new(IssueKind::DegeneratePose, timestamp));
    }

    for sensor in &config.expected_sensors {
        if !sample.has_sensor(sensor) {
            issues.push(SystemIssue {
                sensor: Some(sensor.clone()),
                ..SystemIssue::new(IssueKind::MissingSensorData, timestamp)
            });
        }
    }

    if sample.annotations.is_empty() {
        issues.push(SystemIssue::new(IssueKind::NoAnnotations, timestamp));
    }

    issues
}

pub fn assess_system_performance(
    scene: &[SceneSample],
    config: &DiagnosticsConfig,
) -> SystemPerformance {
    let issues: Vec<SystemIssue> = scene
        .iter()
        .flat_map(|sample| sample_issues(sample, config))
        .collect();

    let high = issues
        .iter()
        .filter(|i| i.severity == Severity::High)
        .count();
    let medium = issues.len() - high;

    SystemPerformance {
        total_issues: issues.len(),
        high_severity_issues: high,
        medium_severity_issues: medium,
        system_health: SystemHealth::from_issue_count(issues.len(), config.moderate_issue_limit),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObjectAnnotation;

    fn pedestrian() -> ObjectAnnotation {
        ObjectAnnotation {
            category: "human.pedestrian.adult".to_string(),
            translation: [4.0, 1.0, 0.0],
            size: [0.7, 0.7, 1.8],
        }
    }

    fn healthy(timestamp: i64) -> SceneSample {
        SceneSample::with_annotations(Pose::identity_at(timestamp, [0.0; 3]), vec![pedestrian()])
            .with_sensors(["CAM_FRONT", "LIDAR_TOP", "RADAR_FRONT"])
    }

    #[test]
    fn test_clean_scene_is_good() {
        let scene = vec![healthy(0), healthy(500_000)];
        let perf = assess_system_performance(&scene, &DiagnosticsConfig::default());
        assert_eq!(perf.total_issues, 0);
        assert!(perf.issues.is_empty());
        assert_eq!(perf.system_health, SystemHealth::Good);
    }

    #[test]
    fn test_empty_scene_is_good() {
        let perf = assess_system_performance(&[], &DiagnosticsConfig::default());
        assert_eq!(perf, SystemPerformance::default());
    }

    #[test]
    fn test_missing_sensor_and_annotations() {
        let bare = SceneSample::new(Pose::identity_at(42, [1.0, 2.0, 0.0])).with_sensors(["CAM_FRONT"]);
        let perf = assess_system_performance(&[bare], &DiagnosticsConfig::default());

        assert_eq!(perf.total_issues, 2);
        assert_eq!(perf.medium_severity_issues, 2);
        assert_eq!(perf.high_severity_issues, 0);
        assert_eq!(perf.issues[0].kind, IssueKind::MissingSensorData);
        assert_eq!(perf.issues[0].sensor.as_deref(), Some("LIDAR_TOP"));
        assert_eq!(perf.issues[0].timestamp, 42);
        assert_eq!(perf.issues[1].kind, IssueKind::NoAnnotations);
        assert_eq!(perf.issues[1].sensor, None);
        assert_eq!(perf.system_health, SystemHealth::Moderate);
    }

    #[test]
    fn test_degenerate_pose_is_high_severity() {
        let zero_rotation = Pose::new(0, [0.0; 3], [0.0; 4]);
        let nan_translation = Pose::identity_at(1, [f64::NAN, 0.0, 0.0]);
        let scene = vec![
            SceneSample::with_annotations(zero_rotation, vec![pedestrian()])
                .with_sensors(["CAM_FRONT", "LIDAR_TOP"]),
            SceneSample::with_annotations(nan_translation, vec![pedestrian()])
                .with_sensors(["CAM_FRONT", "LIDAR_TOP"]),
        ];
        let perf = assess_system_performance(&scene, &DiagnosticsConfig::default());
        assert_eq!(perf.high_severity_issues, 2);
        assert_eq!(perf.medium_severity_issues, 0);
        assert!(perf.issues.iter().all(|i| i.kind == IssueKind::DegeneratePose));
    }

    #[test]
    fn test_health_turns_poor_at_limit() {
        // Three samples with no sensors and no annotations: 3 issues each
        let scene: Vec<SceneSample> = (0..3)
            .map(|i| SceneSample::new(Pose::identity_at(i, [0.0; 3])))
            .collect();
        let config = DiagnosticsConfig::default();
        let perf = assess_system_performance(&scene, &config);
        assert_eq!(perf.total_issues, 9);
        assert_eq!(perf.system_health, SystemHealth::Poor);

        let single = assess_system_performance(&scene[..1], &config);
        assert_eq!(single.total_issues, 3);
        assert_eq!(single.system_health, SystemHealth::Moderate);
    }

    #[test]
    fn test_custom_sensor_list() {
        let config = DiagnosticsConfig {
            expected_sensors: vec![],
            moderate_issue_limit: 5,
        };
        let sample = SceneSample::with_annotations(Pose::identity_at(0, [0.0; 3]), vec![pedestrian()]);
        assert!(sample_issues(&sample, &config).is_empty());
    }

    #[test]
    fn test_issue_serializes_with_type_key() {
        let issue = SystemIssue {
            sensor: Some("CAM_FRONT".to_string()),
            ..SystemIssue::new(IssueKind::MissingSensorData, 7)
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "missing_sensor_data");
        assert_eq!(json["severity"], "medium");
        assert_eq!(json["sensor"], "CAM_FRONT");

        let json = serde_json::to_value(SystemIssue::new(IssueKind::NoAnnotations, 7)).unwrap();
        assert!(json.get("sensor").is_none());
    }
}
