//! Scripted input for headless runs
//!
//! Looks at the nearest solid obstacle ahead and jumps over ground hazards
//! or ducks under low-hanging ones. Good enough for demos and soak tests,
//! not a solver.

use crate::config::GameConfig;
use crate::sim::{RunState, TickInput};

/// Frames of lead time before a ground obstacle reaches the player
const JUMP_LEAD_FRAMES: f32 = 13.0;
const DUCK_LEAD_FRAMES: f32 = 4.0;

pub fn autopilot_input(run: &RunState, config: &GameConfig) -> TickInput {
    let player = &run.player;
    let p = player.rect();
    let standing_top = config.ground_y - config.player.height;
    let crouched_top = config.ground_y - config.player.height / 2.0;

    let threat = run
        .obstacles
        .iter()
        .filter(|o| o.is_solid() && o.rect().right() > p.left())
        .filter(|o| o.rect().bottom() > standing_top)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    let mut input = TickInput::default();
    let Some(o) = threat else {
        input.crouch_released = player.is_crouching;
        return input;
    };

    let r = o.rect();
    let gap = r.left() - p.right();
    let duckable = r.bottom() <= crouched_top;

    if duckable && gap <= o.speed * DUCK_LEAD_FRAMES {
        input.crouch_pressed = !player.is_crouching;
        return input;
    }

    input.crouch_released = player.is_crouching;
    if !duckable && player.on_ground && gap > 0.0 && gap <= o.speed * JUMP_LEAD_FRAMES {
        input.jump_pressed = true;
    }
    input
}
