//! Game configuration
//!
//! Built once at startup and handed to every component by reference.
//! Optionally read from a JSON file; missing keys keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::difficulty::{DifficultyPhase, validate_phases};
use crate::sim::obstacle::ObstacleTag;
use crate::sim::pattern::PatternName;

/// Player kinematics and geometry (per-frame units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Fixed horizontal position; the world scrolls instead
    pub start_x: f32,
    pub width: f32,
    pub height: f32,
    /// Added to vertical velocity every frame (px/frame²)
    pub gravity: f32,
    /// Vertical velocity set by a ground jump (negative = up)
    pub jump_force: f32,
    /// Double jump impulse relative to `jump_force`
    pub double_jump_factor: f32,
    /// Rotation cue applied on each jump (degrees)
    pub jump_tilt_deg: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_x: 100.0,
            width: 40.0,
            height: 40.0,
            gravity: 0.8,
            jump_force: -15.0,
            double_jump_factor: 0.8,
            jump_tilt_deg: -30.0,
        }
    }
}

/// Obstacle geometry recipes and scroll speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub width: f32,
    /// Reference height; tall = 1.5x, low and spike = 0.5x
    pub base_height: f32,
    pub min_height: f32,
    pub max_height: f32,
    /// Scroll speed before the phase multiplier (px/frame)
    pub base_speed: f32,
    /// Extra horizontal gap between the two members of a double
    pub double_gap: f32,
    /// Height above the ground line where a moving obstacle starts
    pub moving_lift: f32,
    pub oscillation_step: f32,
    pub oscillation_amplitude: f32,
    pub triangle_width: f32,
    pub triangle_height: f32,
    pub spike_width: f32,
    pub tunnel_top_height: f32,
    pub tunnel_bottom_height: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            base_height: 50.0,
            min_height: 30.0,
            max_height: 70.0,
            base_speed: 5.0,
            double_gap: 100.0,
            moving_lift: 150.0,
            oscillation_step: 2.0,
            oscillation_amplitude: 50.0,
            triangle_width: 50.0,
            triangle_height: 60.0,
            spike_width: 75.0,
            tunnel_top_height: 150.0,
            tunnel_bottom_height: 80.0,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub fps: u32,
    /// y coordinate of the ground line (feet rest here)
    pub ground_y: f32,
    pub player: PlayerConfig,
    pub obstacles: ObstacleConfig,
    /// How long the phase name banner stays up after a phase change
    pub phase_banner_secs: f32,
    pub score_file: PathBuf,
    pub phases: Vec<DifficultyPhase>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            fps: 60,
            ground_y: 500.0,
            player: PlayerConfig::default(),
            obstacles: ObstacleConfig::default(),
            phase_banner_secs: 1.5,
            score_file: PathBuf::from("data/scores.json"),
            phases: default_phases(),
        }
    }
}

impl GameConfig {
    /// Read a JSON config file, falling back to defaults if it is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Startup validation: phase table plus the geometry the factory relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::InvalidFrameRate);
        }
        let o = &self.obstacles;
        if !(o.min_height <= o.max_height) {
            return Err(ConfigError::InvalidHeightRange {
                min: o.min_height,
                max: o.max_height,
            });
        }
        validate_phases(&self.phases)
    }

    /// Seconds per simulation frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// Where new patterns enter the field
    pub fn spawn_x(&self) -> f32 {
        self.screen_width
    }
}

fn phase(
    name: &str,
    duration: f32,
    speed_multiplier: f32,
    spawn_interval_ms: f32,
    obstacle_types: &[ObstacleTag],
    patterns: &[PatternName],
) -> DifficultyPhase {
    DifficultyPhase {
        name: name.to_string(),
        duration,
        speed_multiplier,
        spawn_interval_ms,
        obstacle_types: obstacle_types.to_vec(),
        patterns: patterns.to_vec(),
    }
}

/// The shipped six-phase progression. The last phase is the endgame plateau.
pub fn default_phases() -> Vec<DifficultyPhase> {
    use ObstacleTag as T;
    use PatternName as P;

    vec![
        phase("Tutorial", 20.0, 1.0, 2000.0, &[T::Basic, T::Tall], &[P::Single]),
        phase(
            "Warmup",
            20.0,
            1.2,
            1800.0,
            &[T::Basic, T::Tall, T::Low, T::Double],
            &[P::Single, P::Double],
        ),
        phase(
            "Challenge",
            20.0,
            1.5,
            1600.0,
            &[T::Basic, T::Tall, T::Low, T::Double, T::Triangle, T::Moving],
            &[P::Single, P::Double, P::StairsUp],
        ),
        phase(
            "Hard",
            20.0,
            1.8,
            1400.0,
            &[T::Basic, T::Tall, T::Double, T::Triangle, T::Moving, T::Fake, T::Spike],
            &[P::Double, P::StairsUp],
        ),
        phase(
            "Extreme",
            20.0,
            2.0,
            1200.0,
            &[T::Double, T::Triangle, T::Moving, T::Spike, T::TunnelTop],
            &[P::StairsUp],
        ),
        phase(
            "Endgame",
            999.0,
            2.5,
            1000.0,
            &[T::Triangle, T::Moving, T::Spike, T::TunnelTop, T::TunnelBottom],
            &[P::StairsUp],
        ),
    ]
}
