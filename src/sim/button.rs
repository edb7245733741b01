//! Restart control hit-testing

use glam::Vec2;

use super::rect::Rect;

/// The single on-screen control shown after a run ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestartButton {
    pub rect: Rect,
}

impl RestartButton {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Pointer is down while over the control
    pub fn is_activated(&self, pointer: Vec2, pressed: bool) -> bool {
        pressed && self.rect.contains_point(pointer)
    }
}
