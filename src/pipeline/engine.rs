// src/pipeline/engine.rs
//
// Orchestrator that wires a scene provider to the movement pipeline and the
// behavioral scorers.
//
//   SceneId → provider.resolve → cache / provider.load_scene → SceneRecord
//           → build_movement → summarize / velocity_summary / score_behavior
//   SceneRecord → assess_system_performance
//
// Only raw `SceneRecord`s are memoized, keyed by canonical token. Everything
// derived from them is recomputed per call, so a config change on a new
// engine never sees stale results.

use super::metrics::{EngineMetrics, MetricsSummary};
use crate::analysis::diagnostics::{assess_system_performance, SystemPerformance};
use crate::analysis::movement::build_movement;
use crate::analysis::scorers::{score_behavior, BehavioralReport, ScoreLabel};
use crate::analysis::summary::{summarize, velocity_summary, SummaryStatistics, VelocitySummary};
use crate::config::KinematicsConfig;
use crate::error::Result;
use crate::provider::{KeyframeId, PoseSequenceProvider, SceneId};
use crate::types::{MovementSample, Pose, SceneInfo, SceneRecord};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MovementReport {
    pub scene_info: SceneInfo,
    pub movement_data: Vec<MovementSample>,
    pub summary_stats: SummaryStatistics,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneAnalysis {
    /// Canonical scene token
    pub scene: String,
    pub scene_info: SceneInfo,
    pub velocity_summary: VelocitySummary,
    pub behavior: BehavioralReport,
    pub system_performance: SystemPerformance,
}

/// Movement of the ego vehicle over the samples recorded before a key frame.
#[derive(Debug, Clone, Serialize)]
pub struct KeyframeMovement {
    /// Canonical scene token
    pub scene: String,
    /// Token of the key frame, which is also the token of its sample
    pub target_sample_token: String,
    /// Samples strictly before the key frame's sample
    pub sample_count: usize,
    pub avg_curvature: f64,
    #[serde(flatten)]
    pub summary: VelocitySummary,
}

/// One row of the cross-scene comparison in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub scene: String,
    pub style: ScoreLabel,
    pub style_score: f64,
    pub avg_speed: f64,
    pub max_speed: f64,
    pub risk_score: f64,
    pub risk_level: ScoreLabel,
    pub smoothness_score: f64,
    pub compliance_score: f64,
    pub compliance_level: ScoreLabel,
}

impl From<&SceneAnalysis> for SceneSummary {
    fn from(analysis: &SceneAnalysis) -> Self {
        let behavior = &analysis.behavior;
        Self {
            scene: analysis.scene.clone(),
            style: behavior.driving_style.label,
            style_score: behavior.driving_style.overall_score,
            avg_speed: analysis.velocity_summary.avg_speed,
            max_speed: analysis.velocity_summary.max_speed,
            risk_score: behavior.risk_assessment.overall_score,
            risk_level: behavior.risk_assessment.label,
            smoothness_score: behavior.smoothness.overall_score,
            compliance_score: behavior.traffic_compliance.overall_score,
            compliance_level: behavior.traffic_compliance.label,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneFailure {
    /// The identifier as requested (token or `#serial`)
    pub scene: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchAnalysis {
    pub analyses: Vec<SceneAnalysis>,
    pub failures: Vec<SceneFailure>,
    /// One row per successful analysis, in the same order
    pub summaries: Vec<SceneSummary>,
}

impl BatchAnalysis {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct KinematicsEngine<P> {
    provider: P,
    config: KinematicsConfig,
    cache: Mutex<HashMap<String, Arc<SceneRecord>>>,
    metrics: EngineMetrics,
}

impl<P: PoseSequenceProvider> KinematicsEngine<P> {
    pub fn new(provider: P, config: KinematicsConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "Kinematics engine ready: {} scenes, turning > {} 1/m, stopping < {} m/s",
            provider.scene_count(),
            config.segmentation.turning_curvature,
            config.segmentation.stopping_speed
        );
        Ok(Self {
            provider,
            config,
            cache: Mutex::new(HashMap::new()),
            metrics: EngineMetrics::new(),
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &KinematicsConfig {
        &self.config
    }

    /// Resolve and load a scene, going through the record cache.
    fn scene(&self, id: &SceneId) -> Result<Arc<SceneRecord>> {
        let token = self.provider.resolve(id)?;

        let cached = self.cache.lock().get(&token).cloned();
        if let Some(record) = cached {
            self.metrics.inc(&self.metrics.cache_hits);
            debug!("Scene {} served from cache", token);
            return Ok(record);
        }

        self.metrics.inc(&self.metrics.cache_misses);
        let record = Arc::new(self.provider.load_scene(&token)?);
        self.metrics.inc(&self.metrics.scenes_loaded);
        debug!(
            "Loaded scene {} ({} samples)",
            token,
            record.samples.len()
        );

        let mut cache = self.cache.lock();
        let entry = cache.entry(token).or_insert(record);
        Ok(Arc::clone(entry))
    }

    fn movement(&self, record: &SceneRecord) -> Vec<MovementSample> {
        self.movement_from(&record.poses())
    }

    fn movement_from(&self, poses: &[Pose]) -> Vec<MovementSample> {
        let samples = build_movement(poses, &self.config.differentiation);
        self.metrics
            .add(&self.metrics.samples_processed, samples.len() as u64);
        samples
    }

    pub fn compute_movement_data(&self, id: &SceneId) -> Result<MovementReport> {
        let record = self.scene(id)?;
        let movement_data = self.movement(&record);
        let summary_stats = summarize(&movement_data, &self.config.segmentation);

        Ok(MovementReport {
            scene_info: record.info.clone(),
            movement_data,
            summary_stats,
        })
    }

    pub fn compute_behavioral_scores(&self, id: &SceneId) -> Result<BehavioralReport> {
        let record = self.scene(id)?;
        let samples = self.movement(&record);
        Ok(score_behavior(
            &samples,
            &record.samples,
            &self.config.scoring,
        ))
    }

    pub fn velocity_summary(&self, id: &SceneId) -> Result<VelocitySummary> {
        let record = self.scene(id)?;
        let samples = self.movement(&record);
        let stats = summarize(&samples, &self.config.segmentation);
        Ok(velocity_summary(&samples, &stats))
    }

    /// Movement summary over the samples recorded before a key frame. The
    /// key frame's own sample is excluded, so the first key frame of a scene
    /// that starts on it yields an all-zero summary.
    pub fn movement_up_to_keyframe(
        &self,
        id: &SceneId,
        keyframe: &KeyframeId,
    ) -> Result<KeyframeMovement> {
        let record = self.scene(id)?;
        let target = record.resolve_keyframe(keyframe)?;

        let prefix = record.samples_before(&target);
        let poses: Vec<Pose> = prefix.iter().map(|s| s.pose).collect();
        let samples = self.movement_from(&poses);
        let stats = summarize(&samples, &self.config.segmentation);

        debug!(
            "Scene {} key frame {}: {} of {} samples precede it",
            record.token,
            target,
            prefix.len(),
            record.samples.len()
        );

        Ok(KeyframeMovement {
            scene: record.token.clone(),
            target_sample_token: target,
            sample_count: samples.len(),
            avg_curvature: stats.avg_curvature,
            summary: velocity_summary(&samples, &stats),
        })
    }

    /// Velocity summary, behavioral scores and data-quality checks from one
    /// pass over the scene.
    pub fn analyze_scene(&self, id: &SceneId) -> Result<SceneAnalysis> {
        let record = self.scene(id)?;
        let samples = self.movement(&record);
        let stats = summarize(&samples, &self.config.segmentation);

        let analysis = SceneAnalysis {
            scene: record.token.clone(),
            scene_info: record.info.clone(),
            velocity_summary: velocity_summary(&samples, &stats),
            behavior: score_behavior(&samples, &record.samples, &self.config.scoring),
            system_performance: assess_system_performance(
                &record.samples,
                &self.config.diagnostics,
            ),
        };

        self.metrics.inc(&self.metrics.scenes_analyzed);
        debug!(
            "Scene {}: style={} risk={} smoothness={:.3} health={}",
            analysis.scene,
            analysis.behavior.driving_style.label.as_str(),
            analysis.behavior.risk_assessment.label.as_str(),
            analysis.behavior.smoothness.overall_score,
            analysis.system_performance.system_health.as_str()
        );
        Ok(analysis)
    }

    /// Analyze each scene in turn. A failing scene is logged and recorded;
    /// the rest of the batch still runs.
    pub fn analyze_scenes(&self, ids: &[SceneId]) -> BatchAnalysis {
        let mut batch = BatchAnalysis::default();

        for id in ids {
            match self.analyze_scene(id) {
                Ok(analysis) => batch.analyses.push(analysis),
                Err(e) => {
                    error!("Error analyzing scene {}: {}", id, e);
                    self.metrics.inc(&self.metrics.scenes_failed);
                    batch.failures.push(SceneFailure {
                        scene: id.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        batch.summaries = batch.analyses.iter().map(SceneSummary::from).collect();

        info!(
            "Batch analysis finished: {} analyzed, {} failed",
            batch.analyses.len(),
            batch.failures.len()
        );
        batch
    }

    pub fn analyze_all(&self) -> BatchAnalysis {
        let ids: Vec<SceneId> = self
            .provider
            .scene_tokens()
            .into_iter()
            .map(SceneId::Token)
            .collect();
        info!("Analyzing all {} scenes", ids.len());
        self.analyze_scenes(&ids)
    }

    pub fn clear_cache(&self) {
        let mut cache = self.cache.lock();
        debug!("Clearing {} cached scenes", cache.len());
        cache.clear();
    }

    pub fn cached_scenes(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn metrics(&self) -> MetricsSummary {
        self.metrics.summary()
    }
}
