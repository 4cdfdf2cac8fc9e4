// src/lib.rs
//
// Ego-vehicle kinematic reconstruction and driving-behavior scoring over
// DriveLM / nuScenes scenes.
//
//   provider  → SceneRecord (ordered poses + annotated objects)
//   analysis  → MovementSample[] → SummaryStatistics, BehavioralReport
//               SceneSample[] → SystemPerformance
//   pipeline  → KinematicsEngine (cache, metrics, batch analysis)

pub mod analysis;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod provider;
pub mod types;

pub use analysis::{
    assess_system_performance, build_movement, score_behavior, summarize, BehavioralReport,
    BehavioralScore, MotionClass, ScoreLabel, Segment, SummaryStatistics, SystemHealth,
    SystemPerformance, VelocitySummary,
};
pub use config::{Config, DiagnosticsConfig, HeadingDeltaMode, KinematicsConfig};
pub use error::{Error, Result};
pub use pipeline::{
    BatchAnalysis, KeyframeMovement, KinematicsEngine, MetricsSummary, MovementReport,
    SceneAnalysis, SceneFailure, SceneSummary,
};
pub use provider::{InMemoryProvider, JsonSceneStore, KeyframeId, PoseSequenceProvider, SceneId};
pub use types::{MovementSample, ObjectAnnotation, Pose, SceneInfo, SceneRecord, SceneSample};
