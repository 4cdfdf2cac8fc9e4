// src/types.rs

use crate::error::{Error, Result};
use crate::provider::KeyframeId;
use serde::{Deserialize, Serialize};

/// Raw ego pose for one sample: microsecond timestamp, position in meters,
/// and orientation as a `[w, x, y, z]` unit quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub timestamp: i64,
    pub position: [f64; 3],
    pub rotation: [f64; 4],
}

impl Pose {
    pub fn new(timestamp: i64, position: [f64; 3], rotation: [f64; 4]) -> Self {
        Self {
            timestamp,
            position,
            rotation,
        }
    }

    /// Pose with the identity orientation (heading 0).
    pub fn identity_at(timestamp: i64, position: [f64; 3]) -> Self {
        Self::new(timestamp, position, [1.0, 0.0, 0.0, 0.0])
    }
}

/// Annotated object observed at a sample (nuScenes `annotations` entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectAnnotation {
    pub category: String,
    pub translation: [f64; 3],
    #[serde(default)]
    pub size: [f64; 3],
}

/// One timestamped observation of a scene: the ego pose plus the objects
/// annotated around it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSample {
    /// Sample token; empty for samples built in code
    pub token: String,
    pub pose: Pose,
    pub annotations: Vec<ObjectAnnotation>,
    /// Names of the sensor channels recorded for this sample
    pub sensors: Vec<String>,
}

impl SceneSample {
    pub fn new(pose: Pose) -> Self {
        Self::with_annotations(pose, Vec::new())
    }

    pub fn with_annotations(pose: Pose, annotations: Vec<ObjectAnnotation>) -> Self {
        Self {
            token: String::new(),
            pose,
            annotations,
            sensors: Vec::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_sensors<I, S>(mut self, sensors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensors = sensors.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_sensor(&self, name: &str) -> bool {
        self.sensors.iter().any(|s| s == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneInfo {
    pub name: String,
    pub description: String,
    pub sample_count: usize,
}

/// A scene as handed over by a pose sequence provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneRecord {
    pub token: String,
    pub info: SceneInfo,
    pub samples: Vec<SceneSample>,
    /// Key-frame tokens in file order. Each names the sample it was taken at.
    pub key_frames: Vec<String>,
}

impl SceneRecord {
    /// Build a record, ordering samples by timestamp. The sort is stable, so
    /// samples sharing a timestamp keep their input order.
    pub fn new(token: impl Into<String>, info: SceneInfo, mut samples: Vec<SceneSample>) -> Self {
        samples.sort_by_key(|s| s.pose.timestamp);
        Self {
            token: token.into(),
            info,
            samples,
            key_frames: Vec::new(),
        }
    }

    pub fn with_key_frames<I, S>(mut self, key_frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_frames = key_frames.into_iter().map(Into::into).collect();
        self
    }

    /// Map a key-frame identifier to its token.
    pub fn resolve_keyframe(&self, id: &KeyframeId) -> Result<String> {
        match id {
            KeyframeId::Serial(serial) => {
                let available = self.key_frames.len();
                if *serial == 0 || *serial > available {
                    return Err(Error::KeyframeOutOfRange {
                        scene: self.token.clone(),
                        serial: *serial,
                        available,
                    });
                }
                Ok(self.key_frames[*serial - 1].clone())
            }
            KeyframeId::Token(token) => {
                if self.key_frames.iter().any(|k| k == token) {
                    Ok(token.clone())
                } else {
                    Err(Error::KeyframeNotFound {
                        scene: self.token.clone(),
                        keyframe: token.clone(),
                    })
                }
            }
        }
    }

    /// Samples strictly before the sample carrying `sample_token`. When no
    /// sample carries it the whole scene is returned.
    pub fn samples_before(&self, sample_token: &str) -> &[SceneSample] {
        let end = self
            .samples
            .iter()
            .position(|s| s.token == sample_token)
            .unwrap_or(self.samples.len());
        &self.samples[..end]
    }

    pub fn poses(&self) -> Vec<Pose> {
        self.samples.iter().map(|s| s.pose).collect()
    }
}

/// A pose enriched with the motion signal derived from its neighbours.
///
/// Derived fields start at zero and stay there wherever the pipeline has
/// nothing to compute them from (first sample, skipped `dt <= 0` steps,
/// curvature at the sequence ends).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MovementSample {
    pub timestamp: i64,
    pub position: [f64; 3],
    pub rotation: [f64; 4],
    /// Yaw in radians, (-π, π]
    pub heading: f64,
    /// m/s
    pub velocity: [f64; 3],
    /// ‖velocity‖, m/s
    pub speed: f64,
    /// m/s²
    pub acceleration: [f64; 3],
    /// Signed heading rate, rad/s
    pub angular_velocity: f64,
    /// Three-point path curvature, 1/m
    pub curvature: f64,
}

impl MovementSample {
    pub fn from_pose(pose: &Pose, heading: f64) -> Self {
        Self {
            timestamp: pose.timestamp,
            position: pose.position,
            rotation: pose.rotation,
            heading,
            velocity: [0.0; 3],
            speed: 0.0,
            acceleration: [0.0; 3],
            angular_velocity: 0.0,
            curvature: 0.0,
        }
    }

    pub fn has_acceleration(&self) -> bool {
        self.acceleration.iter().any(|a| *a != 0.0)
    }
}
