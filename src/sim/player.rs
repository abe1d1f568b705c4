//! Player kinematics
//!
//! Vertical motion only: the player stays at a fixed x while the world
//! scrolls. One semi-implicit Euler step per frame, clamped at the ground.

use std::collections::VecDeque;

use glam::Vec2;

use super::collision::Rect;
use crate::config::{GameConfig, PlayerConfig};

/// Number of past bounding boxes kept for the motion trail
pub const TRAIL_LENGTH: usize = 5;

/// Per-frame easing applied to the rotation and squash hints
const VISUAL_EASE: f32 = 0.2;
/// Squash factor applied on the landing frame
const LANDING_SQUASH: f32 = 0.8;

/// What a jump request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Double,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub velocity_y: f32,
    pub width: f32,
    pub height: f32,
    pub on_ground: bool,
    pub is_jumping: bool,
    pub double_jump_available: bool,
    pub is_crouching: bool,
    /// Visual tilt in degrees, eases back to 0
    pub rotation_deg: f32,
    /// Vertical squash for drawing, eases back to 1
    pub squash: f32,
    /// Recent bounding boxes, oldest first
    pub trail: VecDeque<Rect>,
    tuning: PlayerConfig,
    ground_y: f32,
}

impl Player {
    /// Standing on the ground at the configured start position
    pub fn new(config: &GameConfig) -> Self {
        let tuning = config.player;
        Self {
            pos: Vec2::new(tuning.start_x, config.ground_y - tuning.height),
            velocity_y: 0.0,
            width: tuning.width,
            height: tuning.height,
            on_ground: true,
            is_jumping: false,
            double_jump_available: true,
            is_crouching: false,
            rotation_deg: 0.0,
            squash: 1.0,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
            tuning,
            ground_y: config.ground_y,
        }
    }

    pub fn reset(&mut self) {
        self.pos = Vec2::new(self.tuning.start_x, self.ground_y - self.tuning.height);
        self.velocity_y = 0.0;
        self.width = self.tuning.width;
        self.height = self.tuning.height;
        self.on_ground = true;
        self.is_jumping = false;
        self.double_jump_available = true;
        self.is_crouching = false;
        self.rotation_deg = 0.0;
        self.squash = 1.0;
        self.trail.clear();
    }

    /// Ground jump, else double jump if still available, else nothing
    pub fn jump(&mut self) -> Option<JumpKind> {
        if self.on_ground {
            self.velocity_y = self.tuning.jump_force;
            self.is_jumping = true;
            self.on_ground = false;
            self.rotation_deg = self.tuning.jump_tilt_deg;
            Some(JumpKind::Ground)
        } else if self.double_jump_available {
            self.velocity_y = self.tuning.jump_force * self.tuning.double_jump_factor;
            self.double_jump_available = false;
            self.rotation_deg = self.tuning.jump_tilt_deg;
            Some(JumpKind::Double)
        } else {
            None
        }
    }

    /// Integrate one frame. Returns true only on the frame the player lands.
    pub fn apply_gravity(&mut self) -> bool {
        self.trail.push_back(Rect::new(
            self.pos.x,
            self.pos.y,
            self.width,
            self.height * self.squash,
        ));
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }

        self.velocity_y += self.tuning.gravity;
        self.pos.y += self.velocity_y;

        self.rotation_deg += (0.0 - self.rotation_deg) * VISUAL_EASE;
        self.squash += (1.0 - self.squash) * VISUAL_EASE;

        let rest_y = self.ground_y - self.height;
        if self.pos.y < rest_y {
            return false;
        }

        let landed = !self.on_ground;
        if landed {
            self.squash = LANDING_SQUASH;
        }
        self.pos.y = rest_y;
        self.velocity_y = 0.0;
        self.on_ground = true;
        self.is_jumping = false;
        self.double_jump_available = true;
        landed
    }

    /// Halve the box keeping the feet planted. Ignored in the air.
    pub fn crouch(&mut self) {
        if self.is_crouching || !self.on_ground {
            return;
        }
        let half = self.tuning.height / 2.0;
        self.is_crouching = true;
        self.height = half;
        self.pos.y += half;
    }

    /// Restore full height, feet stay where they are
    pub fn uncrouch(&mut self) {
        if !self.is_crouching {
            return;
        }
        let half = self.tuning.height / 2.0;
        self.is_crouching = false;
        self.height = self.tuning.height;
        self.pos.y -= half;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn feet_y(&self) -> f32 {
        self.pos.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with(gravity: f32) -> Player {
        let mut config = GameConfig::default();
        config.player.gravity = gravity;
        Player::new(&config)
    }

    #[test]
    fn test_starts_on_ground() {
        let p = player_with(0.8);
        assert!(p.on_ground);
        assert_eq!(p.feet_y(), 500.0);
        assert_eq!(p.velocity_y, 0.0);
    }

    #[test]
    fn test_jump_then_one_gravity_step() {
        let mut p = player_with(0.8);
        assert_eq!(p.jump(), Some(JumpKind::Ground));
        assert_eq!(p.velocity_y, -15.0);
        assert!(!p.on_ground);
        assert_eq!(p.rotation_deg, -30.0);

        assert!(!p.apply_gravity());
        assert_eq!(p.velocity_y, -15.0 + 0.8);
    }

    #[test]
    fn test_third_jump_is_noop() {
        let mut p = player_with(0.0);
        assert_eq!(p.jump(), Some(JumpKind::Ground));
        assert_eq!(p.jump(), Some(JumpKind::Double));
        assert_eq!(p.velocity_y, -15.0 * 0.8);

        let before = p.velocity_y;
        assert_eq!(p.jump(), None);
        assert_eq!(p.velocity_y, before);
    }

    #[test]
    fn test_landing_fires_once_and_restores_jumps() {
        let mut p = player_with(0.8);
        p.jump();
        p.jump();
        assert!(!p.double_jump_available);

        let mut landings = 0;
        for _ in 0..200 {
            if p.apply_gravity() {
                landings += 1;
            }
            assert!(p.feet_y() <= 500.0);
        }
        assert_eq!(landings, 1);
        assert!(p.on_ground);
        assert!(!p.is_jumping);
        assert!(p.double_jump_available);
        assert_eq!(p.velocity_y, 0.0);
    }

    #[test]
    fn test_landing_squash() {
        let mut p = player_with(0.8);
        p.jump();
        while !p.apply_gravity() {}
        assert_eq!(p.squash, LANDING_SQUASH);
    }

    #[test]
    fn test_crouch_round_trip_keeps_feet() {
        let mut p = player_with(0.8);
        let feet = p.feet_y();

        p.crouch();
        assert!(p.is_crouching);
        assert_eq!(p.height, 20.0);
        assert_eq!(p.feet_y(), feet);
        assert_eq!(p.rect().top(), 480.0);

        p.uncrouch();
        assert!(!p.is_crouching);
        assert_eq!(p.height, 40.0);
        assert_eq!(p.feet_y(), feet);
    }

    #[test]
    fn test_crouch_in_air_ignored() {
        let mut p = player_with(0.8);
        p.jump();
        p.apply_gravity();
        p.crouch();
        assert!(!p.is_crouching);
        assert_eq!(p.height, 40.0);
    }

    #[test]
    fn test_crouched_player_stays_on_ground() {
        let mut p = player_with(0.8);
        p.crouch();
        for _ in 0..10 {
            assert!(!p.apply_gravity());
        }
        assert_eq!(p.feet_y(), 500.0);
        assert_eq!(p.height, 20.0);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut p = player_with(0.8);
        p.jump();
        for _ in 0..20 {
            p.apply_gravity();
        }
        assert_eq!(p.trail.len(), TRAIL_LENGTH);
    }

    #[test]
    fn test_reset() {
        let mut p = player_with(0.8);
        p.crouch();
        p.jump();
        p.apply_gravity();
        p.reset();
        assert!(p.on_ground && !p.is_crouching && p.double_jump_available);
        assert_eq!(p.rect(), Rect::new(100.0, 460.0, 40.0, 40.0));
        assert!(p.trail.is_empty());
    }
}
