//! Game tuning and play-area geometry
//!
//! Every constant the simulation and the renderer must agree on lives here.
//! Loaded from JSON; missing fields fall back to `consts` defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rect;

/// Configuration rejected at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Play area ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Top of the ground strip; touching it ends the run
    pub ground_y: f32,
    pub ground_wrap: f32,

    // === Actor ===
    pub actor_width: f32,
    pub actor_height: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_velocity: f32,
    pub flap_interval: u32,
    pub animation_frames: usize,
    pub rotation_factor: f32,
    pub rotation_min: f32,
    pub rotation_max: f32,
    pub stalled_rotation: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub gap: f32,
    pub gap_offset_range: i32,
    pub spawn_interval_ms: u64,
    pub scroll_speed: f32,

    // === Restart control ===
    pub restart_x: f32,
    pub restart_y: f32,
    pub restart_width: f32,
    pub restart_height: f32,

    // === Timing ===
    pub target_fps: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_y: GROUND_Y,
            ground_wrap: GROUND_WRAP,

            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            spawn_x: ACTOR_SPAWN_X,
            spawn_y: ACTOR_SPAWN_Y,
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            jump_velocity: JUMP_VELOCITY,
            flap_interval: FLAP_INTERVAL,
            animation_frames: ANIMATION_FRAMES,
            rotation_factor: ROTATION_FACTOR,
            rotation_min: ROTATION_MIN,
            rotation_max: ROTATION_MAX,
            stalled_rotation: STALLED_ROTATION,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            gap: GAP,
            gap_offset_range: GAP_OFFSET_RANGE,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            scroll_speed: SCROLL_SPEED,

            restart_x: RESTART_X,
            restart_y: RESTART_Y,
            restart_width: RESTART_WIDTH,
            restart_height: RESTART_HEIGHT,

            target_fps: TARGET_FPS,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        // NaN slips past every ordered comparison below
        let floats = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ground_y", self.ground_y),
            ("ground_wrap", self.ground_wrap),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("spawn_x", self.spawn_x),
            ("spawn_y", self.spawn_y),
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("jump_velocity", self.jump_velocity),
            ("rotation_factor", self.rotation_factor),
            ("rotation_min", self.rotation_min),
            ("rotation_max", self.rotation_max),
            ("stalled_rotation", self.stalled_rotation),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("gap", self.gap),
            ("scroll_speed", self.scroll_speed),
            ("restart_x", self.restart_x),
            ("restart_y", self.restart_y),
            ("restart_width", self.restart_width),
            ("restart_height", self.restart_height),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, format!("must be finite, got {value}")));
            }
        }

        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("rotation_factor", self.rotation_factor),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("gap", self.gap),
            ("scroll_speed", self.scroll_speed),
            ("ground_wrap", self.ground_wrap),
            ("restart_width", self.restart_width),
            ("restart_height", self.restart_height),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
            }
        }

        if self.jump_velocity >= 0.0 {
            return Err(ConfigError::invalid(
                "jump_velocity",
                format!("must be negative (upward), got {}", self.jump_velocity),
            ));
        }
        if self.ground_y <= 0.0 || self.ground_y > self.screen_height {
            return Err(ConfigError::invalid(
                "ground_y",
                format!("must be within (0, {}], got {}", self.screen_height, self.ground_y),
            ));
        }
        if self.gap >= self.ground_y {
            return Err(ConfigError::invalid(
                "gap",
                format!("must be smaller than ground_y ({}), got {}", self.ground_y, self.gap),
            ));
        }
        if self.gap_offset_range < 0 {
            return Err(ConfigError::invalid(
                "gap_offset_range",
                format!("must be >= 0, got {}", self.gap_offset_range),
            ));
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::invalid("spawn_interval_ms", "must be > 0"));
        }
        if self.flap_interval == 0 {
            return Err(ConfigError::invalid("flap_interval", "must be > 0"));
        }
        if self.animation_frames == 0 {
            return Err(ConfigError::invalid("animation_frames", "must be > 0"));
        }
        if self.target_fps == 0 {
            return Err(ConfigError::invalid("target_fps", "must be > 0"));
        }
        if self.rotation_min > self.rotation_max {
            return Err(ConfigError::invalid(
                "rotation_min",
                format!(
                    "must not exceed rotation_max ({}), got {}",
                    self.rotation_max, self.rotation_min
                ),
            ));
        }

        // The actor must start fully inside the sky
        let spawn = self.actor_spawn_rect();
        if spawn.top() < 0.0 || spawn.bottom() >= self.ground_y {
            return Err(ConfigError::invalid(
                "spawn_y",
                format!(
                    "actor must spawn between the ceiling and the ground, got {}",
                    self.spawn_y
                ),
            ));
        }
        if spawn.left() < 0.0 || spawn.right() > self.screen_width {
            return Err(ConfigError::invalid(
                "spawn_x",
                format!("actor must spawn inside the screen, got {}", self.spawn_x),
            ));
        }

        Ok(())
    }

    /// Actor bounds at the spawn point
    pub fn actor_spawn_rect(&self) -> Rect {
        Rect::from_center(
            Vec2::new(self.spawn_x, self.spawn_y),
            Vec2::new(self.actor_width, self.actor_height),
        )
    }

    /// Restart control bounds
    pub fn restart_rect(&self) -> Rect {
        Rect::new(
            self.restart_x,
            self.restart_y,
            self.restart_width,
            self.restart_height,
        )
    }

    /// Length of one simulation tick in milliseconds
    pub fn tick_ms(&self) -> f64 {
        1000.0 / self.target_fps as f64
    }
}
