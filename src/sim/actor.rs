//! The player-controlled actor
//!
//! The actor never moves horizontally; the world scrolls past it. Physics is
//! fixed-step: gravity and jump impulses are amounts per tick.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::sprite::{Sprite, SpriteKind, SpriteView, UpdateContext};
use super::state::GamePhase;
use crate::config::SimConfig;

/// The falling/jumping character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub rect: Rect,
    /// Vertical velocity in pixels per tick (positive = down)
    pub velocity: f32,
    /// Jump input is currently held (one jump per press)
    pub holding: bool,
    /// Landed on the ground line; gravity no longer applies
    pub grounded: bool,
    /// A jump started during the last update
    pub jumped: bool,
    /// Displayed animation frame
    pub frame: usize,
    /// Ticks since the last frame change
    pub frame_counter: u32,
}

impl Actor {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            rect: config.actor_spawn_rect(),
            velocity: 0.0,
            holding: false,
            grounded: false,
            jumped: false,
            frame: 0,
            frame_counter: 0,
        }
    }

    /// Put the actor back at the spawn point. Animation state is kept.
    pub fn reset(&mut self, config: &SimConfig) {
        self.rect = config.actor_spawn_rect();
        self.velocity = 0.0;
        self.holding = false;
        self.grounded = false;
        self.jumped = false;
    }

    /// Whether gravity applies in the given phase
    pub fn is_airborne(&self, phase: GamePhase) -> bool {
        match phase {
            GamePhase::Waiting => false,
            GamePhase::Flying => !self.grounded,
            GamePhase::GameOver => !self.grounded,
        }
    }

    /// Accelerate downward up to terminal velocity, then move.
    ///
    /// Movement is in whole pixels (velocity truncated toward zero) and stops
    /// once the bottom edge has reached the ground line.
    pub fn apply_gravity(&mut self, config: &SimConfig) {
        self.velocity = (self.velocity + config.gravity).min(config.max_fall_speed);
        if self.rect.bottom() < config.ground_y {
            self.rect.pos.y += self.velocity.trunc();
        }
    }

    /// Jump on the press edge only. Returns true if a jump happened.
    pub fn try_jump(&mut self, pressed: bool, config: &SimConfig) -> bool {
        if !pressed {
            self.holding = false;
            return false;
        }
        if self.holding {
            return false;
        }
        self.holding = true;
        self.velocity = config.jump_velocity;
        true
    }

    /// Step the flap animation
    pub fn advance_animation(&mut self, config: &SimConfig) {
        self.frame_counter += 1;
        if self.frame_counter > config.flap_interval {
            self.frame_counter = 0;
            self.frame = (self.frame + 1) % config.animation_frames;
        }
    }

    /// Stop falling on the ground line
    pub fn land(&mut self) {
        self.grounded = true;
    }

    /// Display rotation in degrees, derived from velocity. Not fed back into physics.
    pub fn rotation(&self, phase: GamePhase, config: &SimConfig) -> f32 {
        match phase {
            GamePhase::GameOver => config.stalled_rotation,
            GamePhase::Waiting | GamePhase::Flying => (self.velocity * -config.rotation_factor)
                .clamp(config.rotation_min, config.rotation_max),
        }
    }
}

impl Sprite for Actor {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, ctx: &UpdateContext<'_>) {
        self.jumped = false;
        if self.is_airborne(ctx.phase) {
            self.apply_gravity(ctx.config);
        }

        match ctx.phase {
            GamePhase::Flying => {
                self.jumped = self.try_jump(ctx.pressed, ctx.config);
                self.advance_animation(ctx.config);
            }
            GamePhase::Waiting => self.advance_animation(ctx.config),
            // Frozen in the stalled pose
            GamePhase::GameOver => {}
        }
    }

    fn view(&self, phase: GamePhase, config: &SimConfig) -> SpriteView {
        SpriteView {
            kind: SpriteKind::Actor,
            rect: self.rect,
            rotation: self.rotation(phase, config),
            frame: self.frame,
        }
    }
}
