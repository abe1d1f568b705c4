//! Axis-aligned bounding boxes and overlap tests
//!
//! Screen coordinates: x grows to the right, y grows downward, so a box's
//! `top()` is its smallest y and `bottom()` is where it rests on the ground.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;

/// Axis-aligned rectangle (top-left origin + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Index of the first solid obstacle overlapping `player`, in list order.
///
/// Decorative obstacles are skipped no matter where they are.
pub fn first_collision(player: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|o| o.is_solid() && player.overlaps(&o.rect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleKind;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(100.0, 460.0, 40.0, 40.0);
        assert_eq!(r.right(), 140.0);
        assert_eq!(r.bottom(), 500.0);
        assert_eq!(r.center(), Vec2::new(120.0, 480.0));
    }

    #[test]
    fn test_first_collision_skips_fake() {
        let player = Rect::new(100.0, 460.0, 40.0, 40.0);
        let size = Vec2::new(30.0, 50.0);
        let fake = Obstacle::new(ObstacleKind::Fake, Vec2::new(110.0, 450.0), size, 5.0);
        let solid = Obstacle::new(ObstacleKind::Basic, Vec2::new(120.0, 450.0), size, 5.0);

        assert_eq!(first_collision(&player, &[fake.clone()]), None);
        assert_eq!(first_collision(&player, &[fake, solid]), Some(1));
    }
}
