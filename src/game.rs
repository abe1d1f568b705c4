//! Top-level game: screens, the current run, the ledger and effects
//!
//! The presentation layer owns the frame clock and calls [`Game::update`]
//! once per frame, then draws from [`Game::snapshot`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::effects::ParticleSystem;
use crate::error::ConfigError;
use crate::highscores::ScoreLedger;
use crate::screen::{Screen, ScreenAction};
use crate::sim::{GameEvent, RunState, TickInput, TickOutcome, tick};
use crate::snapshot::{RenderSnapshot, build_render_snapshot};

/// Result of one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub outcome: TickOutcome,
    /// Events raised this frame, already fed to the particle system
    pub events: Vec<GameEvent>,
}

pub struct Game {
    config: GameConfig,
    screen: Screen,
    run: RunState,
    ledger: ScoreLedger,
    particles: ParticleSystem,
    /// Source of per-run seeds
    seeds: Pcg32,
}

impl Game {
    /// Validates `config` and starts on the menu
    pub fn new(config: GameConfig, ledger: ScoreLedger, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut seeds = Pcg32::seed_from_u64(seed);
        let high_score = ledger.top_score().unwrap_or(0);
        let run = RunState::new(&config, seeds.random(), high_score)?;
        let particles = ParticleSystem::new(seeds.random(), config.player.gravity);

        Ok(Self {
            config,
            screen: Screen::Menu,
            run,
            ledger,
            particles,
            seeds,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Apply a screen action. Returns the new screen, or None if the action
    /// is not valid on the current screen.
    pub fn apply(&mut self, action: ScreenAction) -> Option<Screen> {
        let Some(next) = self.screen.next(action) else {
            log::warn!("Ignoring {:?} on {}", action, self.screen.as_str());
            return None;
        };
        log::info!("Screen {} -> {}", self.screen.as_str(), next.as_str());

        if next.starts_run() {
            self.start_run();
        }
        self.screen = next;
        Some(next)
    }

    fn start_run(&mut self) {
        let seed = self.seeds.random();
        let high_score = self.ledger.top_score().unwrap_or(0);
        self.run.reset(seed, high_score);
        self.particles.reset();
        log::info!("Run started (seed {seed}, best {high_score})");
    }

    /// Advance one frame. Only the Playing screen simulates; effects keep
    /// animating everywhere so the crash burst plays out on Game Over.
    pub fn update(&mut self, input: &TickInput, dt: f32) -> Frame {
        let outcome = if self.screen == Screen::Playing {
            tick(&mut self.run, &self.config, input, dt)
        } else {
            TickOutcome::Stopped
        };

        let events = self.run.drain_events();
        for event in &events {
            self.particles.consume(event);
        }
        self.particles.update(dt);

        if let TickOutcome::Ended { score, high_score } = outcome {
            if let Some(rank) = self.ledger.record(score, &self.config.score_file) {
                log::info!("Score {score} ranked #{rank}");
            }
            self.apply(ScreenAction::RunEnded { score, high_score });
        }

        Frame { outcome, events }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        build_render_snapshot(self.screen, &self.run, &self.particles)
    }
}
