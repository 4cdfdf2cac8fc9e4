// src/config.rs
//
// Every threshold the engine uses lives here, with one canonical value each.
// The engine receives a validated `KinematicsConfig` at construction time;
// nothing downstream reads module-level constants.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// APPLICATION CONFIG (config.yaml)
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub kinematics: KinematicsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: "data/concatenated_data/concatenated_data.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.kinematics.validate()?;
        Ok(config)
    }
}

// ============================================================================
// ENGINE CONFIG
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicsConfig {
    pub differentiation: DifferentiationConfig,
    pub segmentation: SegmentationConfig,
    pub scoring: ScoringConfig,
    pub diagnostics: DiagnosticsConfig,
}

impl KinematicsConfig {
    /// Reject thresholds that would turn a normalization into a division by
    /// zero or invert a comparison.
    pub fn validate(&self) -> Result<()> {
        let seg = &self.segmentation;
        require_positive("segmentation.turning_curvature", seg.turning_curvature)?;
        require_positive("segmentation.stopping_speed", seg.stopping_speed)?;

        let s = &self.scoring;
        require_positive("scoring.style.speed", s.style.speed)?;
        require_positive("scoring.style.acceleration", s.style.acceleration)?;
        require_positive("scoring.style.curvature", s.style.curvature)?;
        require_positive("scoring.smoothness.jerk", s.smoothness.jerk)?;
        require_positive(
            "scoring.smoothness.angular_acceleration",
            s.smoothness.angular_acceleration,
        )?;
        require_positive("scoring.predictability.speed_std", s.predictability.speed_std)?;
        require_positive(
            "scoring.predictability.acceleration_std",
            s.predictability.acceleration_std,
        )?;
        require_positive(
            "scoring.predictability.curvature_std",
            s.predictability.curvature_std,
        )?;
        require_positive("scoring.risk.speed", s.risk.speed)?;
        require_positive("scoring.risk.acceleration", s.risk.acceleration)?;
        require_positive("scoring.risk.jerk", s.risk.jerk)?;
        require_positive("scoring.safety.close_distance", s.safety.close_distance)?;
        require_positive("scoring.safety.very_close_distance", s.safety.very_close_distance)?;
        require_positive("scoring.safety.max_interactions", s.safety.max_interactions)?;
        require_positive("scoring.compliance.speed_limit", s.compliance.speed_limit)?;
        require_positive(
            "scoring.compliance.acceleration_limit",
            s.compliance.acceleration_limit,
        )?;
        require_positive("scoring.collision.reference_distance", s.collision.reference_distance)?;

        if self.diagnostics.moderate_issue_limit == 0 {
            return Err(Error::Config(
                "diagnostics.moderate_issue_limit must be at least 1".to_string(),
            ));
        }

        if s.safety.very_close_distance > s.safety.close_distance {
            return Err(Error::Config(format!(
                "scoring.safety.very_close_distance ({}) exceeds close_distance ({})",
                s.safety.very_close_distance, s.safety.close_distance
            )));
        }

        for (name, cuts) in [
            ("scoring.style.cuts", s.style.cuts),
            ("scoring.smoothness.cuts", s.smoothness.cuts),
            ("scoring.predictability.cuts", s.predictability.cuts),
            ("scoring.risk.cuts", s.risk.cuts),
            ("scoring.compliance.cuts", s.compliance.cuts),
            ("scoring.collision.cuts", s.collision.cuts),
        ] {
            if !(cuts.low.is_finite() && cuts.high.is_finite() && cuts.low <= cuts.high) {
                return Err(Error::Config(format!(
                    "{name}: low ({}) must not exceed high ({})",
                    cuts.low, cuts.high
                )));
            }
        }

        Ok(())
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Config(format!("{name} must be positive, got {value}")))
    }
}

/// How the heading difference between consecutive samples is formed before
/// dividing by `dt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingDeltaMode {
    /// Normalize Δheading into (-π, π] so a crossing of ±π is a small turn.
    #[default]
    Wrapped,
    /// Literal difference; a ±π crossing shows up as a ~2π/dt spike.
    Raw,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifferentiationConfig {
    pub heading_delta: HeadingDeltaMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Curvature (1/m) above which a sample counts as turning
    pub turning_curvature: f64,
    /// Speed (m/s) below which a non-turning sample counts as stopping
    pub stopping_speed: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            turning_curvature: 0.01,
            stopping_speed: 0.5,
        }
    }
}

/// Two ascending cut points splitting a [0, 1] score into three labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutPoints {
    pub low: f64,
    pub high: f64,
}

impl CutPoints {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub style: StyleThresholds,
    pub smoothness: SmoothnessThresholds,
    pub predictability: PredictabilityThresholds,
    pub risk: RiskThresholds,
    pub safety: SafetyThresholds,
    pub compliance: ComplianceThresholds,
    pub collision: CollisionThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleThresholds {
    pub speed: f64,
    pub acceleration: f64,
    /// Normalization reference for average curvature. Distinct from
    /// `SegmentationConfig::turning_curvature`, which is a classification cut.
    pub curvature: f64,
    /// conservative < low <= moderate < high <= aggressive
    pub cuts: CutPoints,
}

impl Default for StyleThresholds {
    fn default() -> Self {
        Self {
            speed: 5.0,
            acceleration: 2.0,
            curvature: 0.015,
            cuts: CutPoints::new(0.3, 0.7),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothnessThresholds {
    pub jerk: f64,
    pub angular_acceleration: f64,
    /// rough <= low < moderate <= high < smooth
    pub cuts: CutPoints,
}

impl Default for SmoothnessThresholds {
    fn default() -> Self {
        Self {
            jerk: 5.0,
            angular_acceleration: 2.0,
            cuts: CutPoints::new(0.4, 0.7),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictabilityThresholds {
    pub speed_std: f64,
    pub acceleration_std: f64,
    pub curvature_std: f64,
    /// unpredictable <= low < moderate <= high < predictable
    pub cuts: CutPoints,
}

impl Default for PredictabilityThresholds {
    fn default() -> Self {
        Self {
            speed_std: 3.0,
            acceleration_std: 2.0,
            curvature_std: 0.01,
            cuts: CutPoints::new(0.4, 0.7),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub speed: f64,
    pub acceleration: f64,
    pub jerk: f64,
    /// low < low_cut <= medium < high_cut <= high
    pub cuts: CutPoints,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            speed: 10.0,
            acceleration: 5.0,
            jerk: 10.0,
            cuts: CutPoints::new(0.3, 0.7),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyThresholds {
    /// Ego-to-object distance (m) counted as a close interaction
    pub close_distance: f64,
    /// Distance (m) counted as a high-risk interaction
    pub very_close_distance: f64,
    /// Close interactions at which the safety score reaches zero
    pub max_interactions: f64,
}

impl Default for SafetyThresholds {
    fn default() -> Self {
        Self {
            close_distance: 5.0,
            very_close_distance: 2.0,
            max_interactions: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceThresholds {
    pub speed_limit: f64,
    pub acceleration_limit: f64,
    /// poor <= low < moderate <= high < good
    pub cuts: CutPoints,
}

impl Default for ComplianceThresholds {
    fn default() -> Self {
        Self {
            speed_limit: 8.0,
            acceleration_limit: 3.0,
            cuts: CutPoints::new(0.6, 0.8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionThresholds {
    /// Distance (m) at which per-object risk drops to zero
    pub reference_distance: f64,
    /// Per-object risk above which an object counts as high risk
    pub high_risk_object: f64,
    pub cuts: CutPoints,
}

impl Default for CollisionThresholds {
    fn default() -> Self {
        Self {
            reference_distance: 10.0,
            high_risk_object: 0.5,
            cuts: CutPoints::new(0.2, 0.5),
        }
    }
}

/// Data-quality checks run over the raw samples of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Sensor channels every sample is expected to carry
    pub expected_sensors: Vec<String>,
    /// Fewer issues than this rate a scene moderate; more rate it poor
    pub moderate_issue_limit: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            expected_sensors: vec!["CAM_FRONT".to_string(), "LIDAR_TOP".to_string()],
            moderate_issue_limit: 5,
        }
    }
}
