// src/error.rs

/// Result type alias for the kinematics engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by scene providers, configuration and the engine.
///
/// Geometry never produces an error: degenerate inputs are guarded inside
/// the pipeline and default to zero.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    #[error("scene serial number {serial} out of range (1..={available})")]
    SerialOutOfRange { serial: usize, available: usize },

    #[error("invalid scene identifier: {0:?}")]
    InvalidSceneId(String),

    #[error("key frame {keyframe} not found in scene {scene}")]
    KeyframeNotFound { scene: String, keyframe: String },

    #[error("key frame serial number {serial} out of range for scene {scene} (1..={available})")]
    KeyframeOutOfRange {
        scene: String,
        serial: usize,
        available: usize,
    },

    #[error("malformed scene {scene}: {source}")]
    MalformedScene {
        scene: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
