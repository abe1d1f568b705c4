//! Read-only view of a run for the presentation layer
//!
//! Copied out once per frame so drawing code never touches live state.

use serde::Serialize;

use crate::effects::{ParticleSystem, ParticleTint};
use crate::screen::Screen;
use crate::sim::{ObstacleTag, Rect, RunState};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub crouching: bool,
    pub rotation_deg: f32,
    pub squash: f32,
    pub trail: Vec<Rect>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub tag: ObstacleTag,
    pub rect: Rect,
    pub decorative: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alpha: f32,
    pub tint: ParticleTint,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub screen: Screen,
    pub phase_name: String,
    pub phase_elapsed: f32,
    pub scroll_speed: f32,
    /// Phase name to show large while the banner timer runs
    pub banner: Option<String>,
    pub score: u64,
    pub high_score: u64,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub particles: Vec<ParticleView>,
}

pub fn build_render_snapshot(
    screen: Screen,
    run: &RunState,
    fx: &ParticleSystem,
) -> RenderSnapshot {
    let player = &run.player;
    let phase_name = run.difficulty.phase_name().to_string();

    RenderSnapshot {
        screen,
        banner: run.banner_active().then(|| phase_name.clone()),
        phase_name,
        phase_elapsed: run.difficulty.elapsed(),
        scroll_speed: run.difficulty.current_speed(),
        score: run.score,
        high_score: run.high_score,
        player: PlayerView {
            rect: player.rect(),
            crouching: player.is_crouching,
            rotation_deg: player.rotation_deg,
            squash: player.squash,
            trail: player.trail.iter().copied().collect(),
        },
        obstacles: run
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                tag: o.kind.tag(),
                rect: o.rect(),
                decorative: !o.is_solid(),
            })
            .collect(),
        particles: fx
            .particles()
            .iter()
            .map(|p| ParticleView {
                x: p.pos.x,
                y: p.pos.y,
                size: p.size,
                alpha: p.alpha(),
                tint: p.tint,
            })
            .collect(),
    }
}
