// src/analysis/segmentation.rs
//
// Partitions a movement sequence into maximal runs of turning, straight
// and stopping samples. Classification per sample, in priority order:
//   curvature > turning_curvature  → Turning
//   speed     < stopping_speed     → Stopping
//   otherwise                      → Straight
//
// Every index belongs to exactly one segment; the run still open when the
// scan ends is closed at the last sample.

use crate::config::SegmentationConfig;
use crate::types::MovementSample;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionClass {
    Turning,
    Straight,
    Stopping,
}

impl MotionClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Turning => "turning",
            Self::Straight => "straight",
            Self::Stopping => "stopping",
        }
    }
}

/// Contiguous run of samples sharing one class. `end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub label: MotionClass,
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn sample_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Segmentation {
    pub turning: Vec<Segment>,
    pub straight: Vec<Segment>,
    pub stopping: Vec<Segment>,
}

impl Segmentation {
    fn push(&mut self, segment: Segment) {
        match segment.label {
            MotionClass::Turning => self.turning.push(segment),
            MotionClass::Straight => self.straight.push(segment),
            MotionClass::Stopping => self.stopping.push(segment),
        }
    }

    /// All segments in index order.
    pub fn ordered(&self) -> Vec<Segment> {
        let mut all: Vec<Segment> = self
            .turning
            .iter()
            .chain(&self.straight)
            .chain(&self.stopping)
            .copied()
            .collect();
        all.sort_by_key(|s| s.start);
        all
    }

    pub fn total(&self) -> usize {
        self.turning.len() + self.straight.len() + self.stopping.len()
    }
}

pub fn classify_sample(sample: &MovementSample, config: &SegmentationConfig) -> MotionClass {
    if sample.curvature > config.turning_curvature {
        MotionClass::Turning
    } else if sample.speed < config.stopping_speed {
        MotionClass::Stopping
    } else {
        MotionClass::Straight
    }
}

pub fn segment_samples(samples: &[MovementSample], config: &SegmentationConfig) -> Segmentation {
    let mut segmentation = Segmentation::default();
    let mut open: Option<(MotionClass, usize)> = None;

    for (i, sample) in samples.iter().enumerate() {
        let class = classify_sample(sample, config);
        match open {
            Some((current, _)) if current == class => {}
            Some((current, start)) => {
                segmentation.push(Segment {
                    label: current,
                    start,
                    end: i - 1,
                });
                open = Some((class, i));
            }
            None => open = Some((class, i)),
        }
    }

    if let Some((label, start)) = open {
        segmentation.push(Segment {
            label,
            start,
            end: samples.len() - 1,
        });
    }

    segmentation
}
