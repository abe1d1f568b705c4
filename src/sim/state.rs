//! Run state and frame events
//!
//! Everything one run owns. Created at run start, mutated only by
//! [`super::tick::tick`], and rebuilt on restart.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::DifficultyEngine;
use super::obstacle::{Obstacle, ObstacleTag};
use super::player::Player;
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Whether the run is still being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Running,
    Ended,
}

/// Edge-triggered notifications for effects and audio.
///
/// Each is pushed exactly once, on the frame the transition happens.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Airborne to grounded; `pos` is the middle of the player's feet
    Landed { pos: Vec2 },
    /// An obstacle scrolled off the left edge and was removed
    ObstaclePassed {
        tag: ObstacleTag,
        center: Vec2,
        solid: bool,
    },
    PhaseChanged { name: String },
    /// The run ended against this obstacle
    Collided { pos: Vec2, tag: ObstacleTag },
}

#[derive(Debug, Clone)]
pub struct RunState {
    pub seed: u64,
    pub rng: Pcg32,
    pub difficulty: DifficultyEngine,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    /// Best of the ledger's top score and this run's score
    pub high_score: u64,
    /// Run clock in milliseconds
    pub clock_ms: f64,
    /// Threshold the spawn check compares against (None until the first spawn)
    pub last_spawn_ms: Option<f64>,
    /// Seconds left on the phase name banner
    pub banner_timer: f32,
    pub last_phase_name: String,
    pub phase: RunPhase,
    pub frame: u64,
    events: Vec<GameEvent>,
}

impl RunState {
    /// Fails if `config` does not pass [`GameConfig::validate`]
    pub fn new(config: &GameConfig, seed: u64, high_score: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let difficulty =
            DifficultyEngine::new(config.phases.clone(), config.obstacles.base_speed)?;
        let last_phase_name = difficulty.phase_name().to_string();

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            difficulty,
            player: Player::new(config),
            obstacles: Vec::new(),
            score: 0,
            high_score,
            clock_ms: 0.0,
            last_spawn_ms: None,
            banner_timer: 0.0,
            last_phase_name,
            phase: RunPhase::Running,
            frame: 0,
            events: Vec::new(),
        })
    }

    /// Back to the start of a run, keeping the phase table
    pub fn reset(&mut self, seed: u64, high_score: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.difficulty.reset();
        self.player.reset();
        self.obstacles.clear();
        self.score = 0;
        self.high_score = high_score;
        self.clock_ms = 0.0;
        self.last_spawn_ms = None;
        self.banner_timer = 0.0;
        self.last_phase_name = self.difficulty.phase_name().to_string();
        self.phase = RunPhase::Running;
        self.frame = 0;
        self.events.clear();
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn banner_active(&self) -> bool {
        self.banner_timer > 0.0
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run() {
        let state = RunState::new(&GameConfig::default(), 42, 17).expect("valid config");
        assert!(state.is_running());
        assert_eq!(state.difficulty.phase_name(), "Tutorial");
        assert_eq!(state.last_phase_name, "Tutorial");
        assert_eq!(state.high_score, 17);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.last_spawn_ms, None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.phases.clear();
        assert_eq!(
            RunState::new(&config, 1, 0).err(),
            Some(ConfigError::EmptyPhaseTable)
        );
    }

    #[test]
    fn test_inverted_height_range_rejected() {
        let mut config = GameConfig::default();
        config.obstacles.min_height = 80.0;
        assert!(matches!(
            RunState::new(&config, 1, 0),
            Err(ConfigError::InvalidHeightRange { .. })
        ));
    }

    #[test]
    fn test_zero_fps_rejected() {
        let config = GameConfig {
            fps: 0,
            ..GameConfig::default()
        };
        assert_eq!(RunState::new(&config, 1, 0).err(), Some(ConfigError::InvalidFrameRate));
    }

    #[test]
    fn test_drain_events() {
        let mut state = RunState::new(&GameConfig::default(), 1, 0).expect("valid config");
        state.push_event(GameEvent::PhaseChanged {
            name: "Warmup".to_string(),
        });
        assert_eq!(state.drain_events().len(), 1);
        assert!(state.events().is_empty());
    }
}
