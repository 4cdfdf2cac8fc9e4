// src/provider.rs
//
// Scene sources for the kinematics engine.
//
// A provider exposes scene tokens in a stable order and loads one scene at a
// time as a `SceneRecord` with samples sorted by timestamp. Scenes are
// addressed either by token or by 1-based serial number in that order.

use crate::error::{Error, Result};
use crate::types::{ObjectAnnotation, Pose, SceneInfo, SceneRecord, SceneSample};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

// ============================================================================
// SCENE IDENTIFIERS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneId {
    /// 1-based position in the provider's scene order
    Serial(usize),
    Token(String),
}

impl SceneId {
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }
}

impl From<usize> for SceneId {
    fn from(serial: usize) -> Self {
        Self::Serial(serial)
    }
}

/// All-digit strings are serial numbers, anything else is a token.
impl FromStr for SceneId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidSceneId(s.to_string()));
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse::<usize>()
                .map(SceneId::Serial)
                .map_err(|_| Error::InvalidSceneId(s.to_string()));
        }
        Ok(SceneId::Token(s.to_string()))
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneId::Serial(n) => write!(f, "#{n}"),
            SceneId::Token(t) => f.write_str(t),
        }
    }
}

/// Key frame within a scene: 1-based position in the scene's key-frame
/// order, or the key-frame token itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyframeId {
    Serial(usize),
    Token(String),
}

impl KeyframeId {
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }
}

impl From<usize> for KeyframeId {
    fn from(serial: usize) -> Self {
        Self::Serial(serial)
    }
}

impl FromStr for KeyframeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<SceneId>()? {
            SceneId::Serial(n) => Ok(KeyframeId::Serial(n)),
            SceneId::Token(t) => Ok(KeyframeId::Token(t)),
        }
    }
}

impl fmt::Display for KeyframeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyframeId::Serial(n) => write!(f, "#{n}"),
            KeyframeId::Token(t) => f.write_str(t),
        }
    }
}

// ============================================================================
// PROVIDER TRAIT
// ============================================================================

pub trait PoseSequenceProvider {
    /// Scene tokens in serial-number order.
    fn scene_tokens(&self) -> Vec<String>;

    fn load_scene(&self, token: &str) -> Result<SceneRecord>;

    fn scene_count(&self) -> usize {
        self.scene_tokens().len()
    }

    /// Token of the scene at a 1-based serial number.
    fn scene_token_at(&self, serial: usize) -> Option<String> {
        serial
            .checked_sub(1)
            .and_then(|i| self.scene_tokens().into_iter().nth(i))
    }

    fn contains_scene(&self, token: &str) -> bool {
        self.scene_tokens().iter().any(|t| t == token)
    }

    /// Key-frame tokens of a scene in file order.
    fn keyframe_tokens(&self, token: &str) -> Result<Vec<String>> {
        Ok(self.load_scene(token)?.key_frames)
    }

    /// Map an identifier to a canonical scene token.
    fn resolve(&self, id: &SceneId) -> Result<String> {
        match id {
            SceneId::Serial(serial) => self.scene_token_at(*serial).ok_or_else(|| {
                Error::SerialOutOfRange {
                    serial: *serial,
                    available: self.scene_count(),
                }
            }),
            SceneId::Token(token) => {
                if self.contains_scene(token) {
                    Ok(token.clone())
                } else {
                    Err(Error::SceneNotFound(token.clone()))
                }
            }
        }
    }
}

// ============================================================================
// IN-MEMORY PROVIDER
// ============================================================================

/// Provider over records built in code. Insertion order is serial order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    scenes: Vec<SceneRecord>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scene, replacing any scene with the same token in place.
    pub fn insert(&mut self, record: SceneRecord) {
        match self.scenes.iter_mut().find(|s| s.token == record.token) {
            Some(existing) => *existing = record,
            None => self.scenes.push(record),
        }
    }

    pub fn with_scene(mut self, record: SceneRecord) -> Self {
        self.insert(record);
        self
    }
}

impl PoseSequenceProvider for InMemoryProvider {
    fn scene_tokens(&self) -> Vec<String> {
        self.scenes.iter().map(|s| s.token.clone()).collect()
    }

    fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    fn scene_token_at(&self, serial: usize) -> Option<String> {
        serial
            .checked_sub(1)
            .and_then(|i| self.scenes.get(i))
            .map(|s| s.token.clone())
    }

    fn contains_scene(&self, token: &str) -> bool {
        self.scenes.iter().any(|s| s.token == token)
    }

    fn load_scene(&self, token: &str) -> Result<SceneRecord> {
        self.scenes
            .iter()
            .find(|s| s.token == token)
            .cloned()
            .ok_or_else(|| Error::SceneNotFound(token.to_string()))
    }
}

// ============================================================================
// JSON SCENE STORE
// ============================================================================

// Wire shapes of the concatenated DriveLM/nuScenes blob. Only the fields the
// engine consumes are declared: key frames and sensor records contribute
// their keys, and their payloads (QA, file paths) are ignored.

#[derive(Debug, Deserialize)]
struct RawScene {
    #[serde(default)]
    scene_name: String,
    #[serde(default)]
    scene_description: String,
    #[serde(default)]
    nbr_samples: Option<usize>,
    #[serde(default)]
    key_frames: Map<String, Value>,
    #[serde(default)]
    samples: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawSample {
    ego_pose: RawEgoPose,
    #[serde(default)]
    annotations: Vec<ObjectAnnotation>,
    #[serde(default)]
    sensor_data: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawEgoPose {
    timestamp: i64,
    translation: [f64; 3],
    rotation: [f64; 4],
}

impl From<RawSample> for SceneSample {
    fn from(raw: RawSample) -> Self {
        let pose = Pose::new(
            raw.ego_pose.timestamp,
            raw.ego_pose.translation,
            raw.ego_pose.rotation,
        );
        SceneSample::with_annotations(pose, raw.annotations)
            .with_sensors(raw.sensor_data.keys().cloned())
    }
}

/// Read-only store over the concatenated JSON file, keyed by scene token in
/// file order. The file is parsed once at open; scenes are decoded lazily.
#[derive(Debug)]
pub struct JsonSceneStore {
    path: PathBuf,
    scenes: Map<String, Value>,
    /// Scene tokens in file order, for serial lookups
    tokens: Vec<String>,
}

impl JsonSceneStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path)?;
        let store = Self::from_json_str(&contents, path)?;
        info!(
            "Opened scene store {} ({} scenes)",
            store.path.display(),
            store.scenes.len()
        );
        Ok(store)
    }

    fn from_json_str(contents: &str, path: PathBuf) -> Result<Self> {
        let scenes: Map<String, Value> = serde_json::from_str(contents)?;
        let tokens = scenes.keys().cloned().collect();
        Ok(Self {
            path,
            scenes,
            tokens,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PoseSequenceProvider for JsonSceneStore {
    fn scene_tokens(&self) -> Vec<String> {
        self.tokens.clone()
    }

    fn scene_count(&self) -> usize {
        self.tokens.len()
    }

    fn scene_token_at(&self, serial: usize) -> Option<String> {
        serial
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .cloned()
    }

    fn contains_scene(&self, token: &str) -> bool {
        self.scenes.contains_key(token)
    }

    fn keyframe_tokens(&self, token: &str) -> Result<Vec<String>> {
        let value = self
            .scenes
            .get(token)
            .ok_or_else(|| Error::SceneNotFound(token.to_string()))?;
        Ok(value
            .get("key_frames")
            .and_then(Value::as_object)
            .map(|frames| frames.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn load_scene(&self, token: &str) -> Result<SceneRecord> {
        let value = self
            .scenes
            .get(token)
            .ok_or_else(|| Error::SceneNotFound(token.to_string()))?;

        let malformed = |source| Error::MalformedScene {
            scene: token.to_string(),
            source,
        };

        let raw: RawScene = RawScene::deserialize(value).map_err(malformed)?;

        let mut samples = Vec::with_capacity(raw.samples.len());
        for (sample_token, sample) in &raw.samples {
            let sample = RawSample::deserialize(sample).map_err(|source| Error::MalformedScene {
                scene: format!("{token} (sample {sample_token})"),
                source,
            })?;
            samples.push(SceneSample::from(sample).with_token(sample_token.as_str()));
        }

        let info = SceneInfo {
            name: raw.scene_name,
            description: raw.scene_description,
            sample_count: raw.nbr_samples.unwrap_or(samples.len()),
        };

        debug!(
            "Decoded scene {} with {} samples, {} key frames",
            token,
            samples.len(),
            raw.key_frames.len()
        );
        Ok(SceneRecord::new(token, info, samples).with_key_frames(raw.key_frames.keys().cloned()))
    }
}
