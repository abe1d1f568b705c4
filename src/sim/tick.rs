//! Per-frame run controller
//!
//! Frame order: input, difficulty, phase banner, spawn, player physics,
//! obstacle advance/cull, collision.

use rand::seq::IndexedRandom;

use super::collision::first_collision;
use super::pattern::PatternGenerator;
use super::state::{GameEvent, RunPhase, RunState};
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Edge-triggered input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub jump_pressed: bool,
    pub crouch_pressed: bool,
    pub crouch_released: bool,
}

/// What happened to the run this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The run ended this frame
    Ended { score: u64, high_score: u64 },
    /// The run had already ended; nothing was simulated
    Stopped,
}

/// Advance the run by one frame of `dt` seconds
pub fn tick(state: &mut RunState, config: &GameConfig, input: &TickInput, dt: f32) -> TickOutcome {
    if state.phase == RunPhase::Ended {
        return TickOutcome::Stopped;
    }
    debug_assert!(dt >= 0.0, "negative dt {dt}");
    state.frame += 1;

    if input.crouch_released {
        state.player.uncrouch();
    }
    if input.jump_pressed {
        state.player.jump();
    }
    if input.crouch_pressed {
        state.player.crouch();
    }

    state.difficulty.update(dt);
    state.clock_ms += f64::from(dt) * 1000.0;

    if state.difficulty.phase_name() != state.last_phase_name {
        let name = state.difficulty.phase_name().to_string();
        state.banner_timer = config.phase_banner_secs;
        state.last_phase_name = name.clone();
        state.push_event(GameEvent::PhaseChanged { name });
    }
    if state.banner_timer > 0.0 {
        state.banner_timer -= dt;
    }

    let now = state.clock_ms;
    if spawn_due(state, now) {
        if let Err(e) = spawn_pattern(state, config, now) {
            log::error!("Spawn skipped: {}", e);
            state.last_spawn_ms = Some(now);
        }
    }

    if state.player.apply_gravity() {
        let pos = glam::Vec2::new(state.player.center().x, state.player.feet_y());
        state.push_event(GameEvent::Landed { pos });
    }

    let mut passed = Vec::new();
    state.obstacles.retain_mut(|o| {
        o.advance();
        if o.is_expired() {
            passed.push(GameEvent::ObstaclePassed {
                tag: o.kind.tag(),
                center: o.rect().center(),
                solid: o.is_solid(),
            });
            false
        } else {
            true
        }
    });
    for event in passed {
        if let GameEvent::ObstaclePassed { solid: true, .. } = event {
            state.score += 1;
        }
        state.push_event(event);
    }
    state.high_score = state.high_score.max(state.score);

    if let Some(i) = first_collision(&state.player.rect(), &state.obstacles) {
        let tag = state.obstacles[i].kind.tag();
        state.push_event(GameEvent::Collided {
            pos: state.player.center(),
            tag,
        });
        state.phase = RunPhase::Ended;
        log::info!(
            "Run ended in {} against {} (score {}, best {})",
            state.difficulty.phase_name(),
            tag.as_str(),
            state.score,
            state.high_score
        );
        return TickOutcome::Ended {
            score: state.score,
            high_score: state.high_score,
        };
    }

    TickOutcome::Continue
}

/// True once the clock is more than one spawn interval past the threshold
pub fn spawn_due(state: &RunState, now_ms: f64) -> bool {
    match state.last_spawn_ms {
        None => true,
        Some(last) => now_ms - last > f64::from(state.difficulty.spawn_interval_ms()),
    }
}

/// Pick an allowed pattern, enqueue its obstacles and push the spawn
/// threshold forward by the pattern footprint. Returns the footprint.
pub fn spawn_pattern(
    state: &mut RunState,
    config: &GameConfig,
    now_ms: f64,
) -> Result<f32, ConfigError> {
    let name = *state
        .difficulty
        .allowed_patterns()
        .choose(&mut state.rng)
        .ok_or_else(|| ConfigError::NoPatterns {
            name: state.difficulty.phase_name().to_string(),
        })?;

    let speed = state.difficulty.current_speed();
    let spawned =
        PatternGenerator::new(config).generate(name, config.spawn_x(), speed, &mut state.rng)?;
    log::debug!(
        "Spawned {} ({} obstacles) at {:.0}ms",
        name,
        spawned.obstacles.len(),
        now_ms
    );

    state.obstacles.extend(spawned.obstacles);
    state.last_spawn_ms = Some(now_ms + f64::from(spawned.footprint));
    Ok(spawned.footprint)
}
