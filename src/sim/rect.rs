//! Axis-aligned rectangle geometry for sprites and controls
//!
//! Screen space: origin at the top-left, y grows downward.
//! - pos: top-left corner
//! - size: width and height
//! - right = x + width, bottom = y + height (exclusive edges)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
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
        self.pos + self.size / 2.0
    }

    /// Move by a delta
    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Overlap test. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Point test, inclusive of the top/left edges and exclusive of bottom/right
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 468.0), Vec2::new(34.0, 24.0));
        assert_eq!(r.left(), 83.0);
        assert_eq!(r.top(), 456.0);
        assert_eq!(r.center(), Vec2::new(100.0, 468.0));
    }

    #[test]
    fn test_intersects_overlap_and_miss() {
        let obstacle = Rect::new(120.0, 420.0, 44.0, 80.0);

        let actor = Rect::new(100.0, 400.0, 34.0, 34.0);
        assert!(actor.intersects(&obstacle));
        assert!(obstacle.intersects(&actor));

        let actor = Rect::new(100.0, 200.0, 34.0, 34.0);
        assert!(!actor.intersects(&obstacle));
        assert!(!obstacle.intersects(&actor));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(382.0, 368.0, 120.0, 42.0);
        assert!(r.contains_point(Vec2::new(382.0, 368.0)));
        assert!(r.contains_point(Vec2::new(440.0, 390.0)));
        assert!(!r.contains_point(Vec2::new(502.0, 390.0)));
        assert!(!r.contains_point(Vec2::new(440.0, 410.0)));
        assert!(!r.contains_point(Vec2::new(381.0, 390.0)));
    }
}
