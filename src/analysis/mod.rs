// src/analysis/mod.rs
//
// Ego-kinematics pipeline modules.
//
// Signal flow:
//   Pose[] → heading::attach_headings → differentiator::differentiate
//          → curvature::attach_curvature → MovementSample[]
//   MovementSample[] → segmentation ─┐
//                    → summary ──────┴→ SummaryStatistics / VelocitySummary
//   MovementSample[] + SceneSample[] → scorers → BehavioralReport
//   SceneSample[] → diagnostics → SystemPerformance
//
// movement::build_movement composes the three pipeline stages.

pub mod curvature;
pub mod diagnostics;
pub mod differentiator;
pub mod heading;
pub mod movement;
pub mod numeric;
pub mod scorers;
pub mod segmentation;
pub mod summary;

// Re-exports for ergonomic access from lib.rs and main.rs
pub use diagnostics::{assess_system_performance, SystemHealth, SystemPerformance};
pub use heading::{heading_from_quaternion, wrap_angle};
pub use movement::build_movement;
pub use scorers::{score_behavior, BehavioralReport, BehavioralScore, ScoreLabel};
pub use segmentation::{segment_samples, MotionClass, Segment, Segmentation};
pub use summary::{summarize, velocity_summary, SummaryStatistics, VelocitySummary};
