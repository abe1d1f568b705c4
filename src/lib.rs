//! Geo Dash - a side-scrolling rhythm runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (difficulty, obstacles, patterns, player, collisions)
//! - `game`: Screen flow wrapped around the current run
//! - `highscores`: Persistent top-10 score ledger
//! - `effects`: Cosmetic particles driven by frame events
//! - `config`: Data-driven game balance

pub mod autopilot;
pub mod config;
pub mod effects;
pub mod error;
pub mod game;
pub mod highscores;
pub mod screen;
pub mod sim;
pub mod snapshot;

pub use config::GameConfig;
pub use error::{ConfigError, LedgerError};
pub use game::{Frame, Game};
pub use highscores::{ScoreLedger, ScoreRecord};
pub use screen::{Screen, ScreenAction};
pub use snapshot::RenderSnapshot;
