// src/pipeline/mod.rs

pub mod engine;
pub mod metrics;

pub use engine::{
    BatchAnalysis, KeyframeMovement, KinematicsEngine, MovementReport, SceneAnalysis,
    SceneFailure, SceneSummary,
};
pub use metrics::{EngineMetrics, MetricsSummary};
