//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped clock, no wall time
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod pattern;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_collision};
pub use difficulty::{DifficultyEngine, DifficultyPhase, validate_phases};
pub use obstacle::{Obstacle, ObstacleFactory, ObstacleKind, ObstacleTag, Oscillation};
pub use pattern::{PATTERN_SPACING, PatternGenerator, PatternName, SpawnedPattern};
pub use player::{JumpKind, Player};
pub use state::{GameEvent, RunPhase, RunState};
pub use tick::{TickInput, TickOutcome, spawn_due, spawn_pattern, tick};
