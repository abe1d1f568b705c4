//! Error types
//!
//! Configuration problems are reported at startup. Ledger problems are
//! recovered where the ledger is used and never reach the frame loop.

use thiserror::Error;

use crate::sim::pattern::PatternName;

/// Problems found while building or validating the game configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("phase table must contain at least one phase")]
    EmptyPhaseTable,
    #[error("phase {name:?} has non-positive duration {duration}")]
    InvalidDuration { name: String, duration: f32 },
    #[error("phase {name:?} has non-positive spawn interval {interval_ms}ms")]
    InvalidSpawnInterval { name: String, interval_ms: f32 },
    #[error("phase {name:?} allows no patterns")]
    NoPatterns { name: String },
    #[error("phase {phase:?} references pattern {pattern} which has no layout")]
    UnimplementedPattern { phase: String, pattern: PatternName },
    #[error("pattern {0} has no layout")]
    NoLayout(PatternName),
    #[error("obstacle height range {min}..={max} is empty")]
    InvalidHeightRange { min: f32, max: f32 },
    #[error("frame rate must be positive")]
    InvalidFrameRate,
    #[error("unknown pattern name {0:?}")]
    UnknownPattern(String),
}

/// Score file failures
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("score file i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("score file format: {0}")]
    Format(#[from] serde_json::Error),
}
