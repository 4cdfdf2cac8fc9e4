// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drivelm_kinematics::{
    Config, JsonSceneStore, KeyframeId, KinematicsEngine, PoseSequenceProvider, SceneId,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ego-vehicle kinematics and driving-behavior scores for DriveLM scenes
#[derive(Parser, Debug)]
#[command(name = "drivelm-kinematics")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Concatenated scene JSON (overrides data.path from the config)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Write JSON output to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derived motion signal and summary statistics for one scene
    Movement {
        /// Scene token or 1-based serial number
        scene: String,
    },

    /// Behavioral scores for one scene
    Scores {
        /// Scene token or 1-based serial number
        scene: String,
    },

    /// Movement summary over the samples recorded before a key frame
    Keyframe {
        /// Scene token or 1-based serial number
        scene: String,
        /// Key-frame token or 1-based serial number within the scene
        keyframe: String,
    },

    /// Full analysis for the given scenes (all scenes when none are given)
    Analyze { scenes: Vec<String> },

    /// List scene tokens with their serial numbers
    Scenes,
}

#[derive(Serialize)]
struct SceneListing {
    serial: usize,
    token: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let default_level = if cli.verbose {
        "drivelm_kinematics=debug".to_string()
    } else {
        format!("drivelm_kinematics={}", config.logging.level)
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data.path));
    let store = JsonSceneStore::open(&data_path)
        .with_context(|| format!("Failed to open scene data {}", data_path.display()))?;
    info!("✓ Scene store loaded");

    let engine = KinematicsEngine::new(store, config.kinematics.clone())
        .context("Invalid kinematics configuration")?;

    let json = match &cli.command {
        Commands::Movement { scene } => {
            let id = parse_scene(scene)?;
            let report = engine
                .compute_movement_data(&id)
                .with_context(|| format!("Failed to compute movement data for {id}"))?;
            serde_json::to_string_pretty(&report)?
        }
        Commands::Scores { scene } => {
            let id = parse_scene(scene)?;
            let report = engine
                .compute_behavioral_scores(&id)
                .with_context(|| format!("Failed to score scene {id}"))?;
            serde_json::to_string_pretty(&report)?
        }
        Commands::Keyframe { scene, keyframe } => {
            let id = parse_scene(scene)?;
            let kf = keyframe
                .parse::<KeyframeId>()
                .with_context(|| format!("Invalid key frame identifier {keyframe:?}"))?;
            let report = engine
                .movement_up_to_keyframe(&id, &kf)
                .with_context(|| format!("Failed to summarize {id} up to key frame {kf}"))?;
            serde_json::to_string_pretty(&report)?
        }
        Commands::Analyze { scenes } => {
            let batch = if scenes.is_empty() {
                engine.analyze_all()
            } else {
                let ids = scenes
                    .iter()
                    .map(|s| parse_scene(s))
                    .collect::<Result<Vec<_>>>()?;
                engine.analyze_scenes(&ids)
            };
            serde_json::to_string_pretty(&batch)?
        }
        Commands::Scenes => {
            let listing: Vec<SceneListing> = engine
                .provider()
                .scene_tokens()
                .into_iter()
                .enumerate()
                .map(|(i, token)| SceneListing {
                    serial: i + 1,
                    token,
                })
                .collect();
            serde_json::to_string_pretty(&listing)?
        }
    };

    write_output(cli.output.as_deref(), &json)?;

    let metrics = engine.metrics();
    info!(
        "Done: {} scenes loaded, {} analyzed, {} failed, {} samples in {:.2}s",
        metrics.scenes_loaded,
        metrics.scenes_analyzed,
        metrics.scenes_failed,
        metrics.samples_processed,
        metrics.elapsed_secs
    );

    Ok(())
}

fn parse_scene(raw: &str) -> Result<SceneId> {
    raw.parse::<SceneId>()
        .with_context(|| format!("Invalid scene identifier {raw:?}"))
}

fn write_output(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("✓ Results written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
