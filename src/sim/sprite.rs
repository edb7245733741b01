//! Shared sprite capability
//!
//! Actors and obstacles are both "a rectangle that updates once per tick and
//! can be drawn". The trait stays flat: no shared base state.

use serde::Serialize;

use super::rect::Rect;
use super::state::GamePhase;
use crate::config::SimConfig;

/// What the host should draw for a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Actor,
    /// Obstacle hanging from the top, drawn flipped vertically
    UpperObstacle,
    LowerObstacle,
}

/// Draw request for one sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteView {
    pub kind: SpriteKind,
    pub rect: Rect,
    /// Display rotation in degrees (counter-clockwise)
    pub rotation: f32,
    /// Animation frame index
    pub frame: usize,
}

/// Per-tick context handed to sprite updates
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext<'a> {
    pub config: &'a SimConfig,
    pub phase: GamePhase,
    /// Pointer press state for this tick
    pub pressed: bool,
}

pub trait Sprite {
    /// Bounding box used for intersection tests
    fn bounds(&self) -> Rect;

    /// Advance one fixed tick
    fn update(&mut self, ctx: &UpdateContext<'_>);

    /// Draw request for the current state
    fn view(&self, phase: GamePhase, config: &SimConfig) -> SpriteView;
}
