//! Obstacles and the obstacle factory
//!
//! An obstacle keeps the scroll speed it was spawned with for its whole
//! life; later phase speed-ups only affect newly spawned obstacles.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::GameConfig;

/// Obstacle vocabulary used by phase tables and factory requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleTag {
    Basic,
    Tall,
    Low,
    /// Two basics at a fixed gap
    Double,
    Triangle,
    Moving,
    Fake,
    Spike,
    /// Top and bottom halves together
    Tunnel,
    TunnelTop,
    TunnelBottom,
}

impl ObstacleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleTag::Basic => "basic",
            ObstacleTag::Tall => "tall",
            ObstacleTag::Low => "low",
            ObstacleTag::Double => "double",
            ObstacleTag::Triangle => "triangle",
            ObstacleTag::Moving => "moving",
            ObstacleTag::Fake => "fake",
            ObstacleTag::Spike => "spike",
            ObstacleTag::Tunnel => "tunnel",
            ObstacleTag::TunnelTop => "tunnel_top",
            ObstacleTag::TunnelBottom => "tunnel_bottom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(ObstacleTag::Basic),
            "tall" => Some(ObstacleTag::Tall),
            "low" => Some(ObstacleTag::Low),
            "double" => Some(ObstacleTag::Double),
            "triangle" => Some(ObstacleTag::Triangle),
            "moving" => Some(ObstacleTag::Moving),
            "fake" => Some(ObstacleTag::Fake),
            "spike" => Some(ObstacleTag::Spike),
            "tunnel" => Some(ObstacleTag::Tunnel),
            "tunnel_top" => Some(ObstacleTag::TunnelTop),
            "tunnel_bottom" => Some(ObstacleTag::TunnelBottom),
            _ => None,
        }
    }
}

/// Vertical oscillation of a moving obstacle.
///
/// `upper` is the smaller y (higher on screen). The direction flips once the
/// position reaches either bound, so it may overshoot by up to one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    pub step: f32,
    pub direction: f32,
    pub upper: f32,
    pub lower: f32,
}

/// What a live obstacle is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Basic,
    Tall,
    Low,
    DoubleMember,
    Triangle,
    Moving(Oscillation),
    /// Drawn but never collides
    Fake,
    Spike,
    TunnelTop,
    TunnelBottom,
}

impl ObstacleKind {
    /// Tag reported to the presentation layer
    pub fn tag(&self) -> ObstacleTag {
        match self {
            ObstacleKind::Basic => ObstacleTag::Basic,
            ObstacleKind::Tall => ObstacleTag::Tall,
            ObstacleKind::Low => ObstacleTag::Low,
            ObstacleKind::DoubleMember => ObstacleTag::Double,
            ObstacleKind::Triangle => ObstacleTag::Triangle,
            ObstacleKind::Moving(_) => ObstacleTag::Moving,
            ObstacleKind::Fake => ObstacleTag::Fake,
            ObstacleKind::Spike => ObstacleTag::Spike,
            ObstacleKind::TunnelTop => ObstacleTag::TunnelTop,
            ObstacleKind::TunnelBottom => ObstacleTag::TunnelBottom,
        }
    }
}

/// A single hazard scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed snapshot taken at spawn (px/frame)
    pub speed: f32,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            kind,
            pos,
            size,
            speed,
        }
    }

    /// Moving obstacle oscillating `amplitude` px around its spawn height,
    /// heading down first.
    pub fn moving(pos: Vec2, size: Vec2, speed: f32, step: f32, amplitude: f32) -> Self {
        let oscillation = Oscillation {
            step,
            direction: 1.0,
            upper: pos.y - amplitude,
            lower: pos.y + amplitude,
        };
        Self::new(ObstacleKind::Moving(oscillation), pos, size, speed)
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Whether this obstacle can end a run
    pub fn is_solid(&self) -> bool {
        !matches!(self.kind, ObstacleKind::Fake)
    }

    /// Advance one frame
    pub fn advance(&mut self) {
        self.pos.x -= self.speed;

        if let ObstacleKind::Moving(ref mut osc) = self.kind {
            self.pos.y += osc.step * osc.direction;
            if self.pos.y <= osc.upper || self.pos.y >= osc.lower {
                osc.direction = -osc.direction;
            }
        }
    }

    /// True once the right edge has left the field on the left side
    pub fn is_expired(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Builds obstacles from tags using the configured geometry recipes
#[derive(Debug, Clone, Copy)]
pub struct ObstacleFactory<'a> {
    config: &'a GameConfig,
}

impl<'a> ObstacleFactory<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// String entry point; unknown tags produce nothing
    pub fn create_by_name<R: Rng + ?Sized>(
        &self,
        name: &str,
        spawn_x: f32,
        speed: f32,
        rng: &mut R,
    ) -> Vec<Obstacle> {
        match ObstacleTag::parse(name) {
            Some(tag) => self.create(tag, spawn_x, speed, rng),
            None => {
                log::debug!("Unknown obstacle tag {:?}, nothing spawned", name);
                Vec::new()
            }
        }
    }

    pub fn create<R: Rng + ?Sized>(
        &self,
        tag: ObstacleTag,
        spawn_x: f32,
        speed: f32,
        rng: &mut R,
    ) -> Vec<Obstacle> {
        let o = &self.config.obstacles;
        let ground = self.config.ground_y;
        let on_ground = |kind: ObstacleKind, x: f32, width: f32, height: f32| {
            Obstacle::new(
                kind,
                Vec2::new(x, ground - height),
                Vec2::new(width, height),
                speed,
            )
        };

        match tag {
            ObstacleTag::Basic => {
                let h = self.random_height(rng);
                vec![on_ground(ObstacleKind::Basic, spawn_x, o.width, h)]
            }
            ObstacleTag::Tall => {
                vec![on_ground(ObstacleKind::Tall, spawn_x, o.width, o.base_height * 1.5)]
            }
            ObstacleTag::Low => {
                vec![on_ground(ObstacleKind::Low, spawn_x, o.width, o.base_height * 0.5)]
            }
            ObstacleTag::Double => {
                let h = self.random_height(rng);
                let second_x = spawn_x + o.width + o.double_gap;
                vec![
                    on_ground(ObstacleKind::DoubleMember, spawn_x, o.width, h),
                    on_ground(ObstacleKind::DoubleMember, second_x, o.width, h),
                ]
            }
            ObstacleTag::Triangle => vec![on_ground(
                ObstacleKind::Triangle,
                spawn_x,
                o.triangle_width,
                o.triangle_height,
            )],
            ObstacleTag::Moving => {
                let h = self.random_height(rng);
                vec![Obstacle::moving(
                    Vec2::new(spawn_x, ground - o.moving_lift),
                    Vec2::new(o.width, h),
                    speed,
                    o.oscillation_step,
                    o.oscillation_amplitude,
                )]
            }
            ObstacleTag::Fake => {
                let h = self.random_height(rng);
                vec![on_ground(ObstacleKind::Fake, spawn_x, o.width, h)]
            }
            ObstacleTag::Spike => vec![on_ground(
                ObstacleKind::Spike,
                spawn_x,
                o.spike_width,
                o.base_height * 0.5,
            )],
            ObstacleTag::Tunnel => vec![
                self.tunnel_top(spawn_x, speed),
                self.tunnel_bottom(spawn_x, speed),
            ],
            ObstacleTag::TunnelTop => vec![self.tunnel_top(spawn_x, speed)],
            ObstacleTag::TunnelBottom => vec![self.tunnel_bottom(spawn_x, speed)],
        }
    }

    /// Whole-pixel height in `[min_height, max_height]`. A range with no
    /// whole pixel in it yields `min_height`.
    fn random_height<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let o = &self.config.obstacles;
        let lo = o.min_height.ceil() as i32;
        let hi = o.max_height.floor() as i32;
        if lo > hi {
            return o.min_height;
        }
        rng.random_range(lo..=hi) as f32
    }

    /// Hangs from the top of the world
    fn tunnel_top(&self, x: f32, speed: f32) -> Obstacle {
        let o = &self.config.obstacles;
        Obstacle::new(
            ObstacleKind::TunnelTop,
            Vec2::new(x, 0.0),
            Vec2::new(o.width, o.tunnel_top_height),
            speed,
        )
    }

    fn tunnel_bottom(&self, x: f32, speed: f32) -> Obstacle {
        let o = &self.config.obstacles;
        Obstacle::new(
            ObstacleKind::TunnelBottom,
            Vec2::new(x, self.config.ground_y - o.tunnel_bottom_height),
            Vec2::new(o.width, o.tunnel_bottom_height),
            speed,
        )
    }
}
