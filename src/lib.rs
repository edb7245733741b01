//! Flappy Wings - A side-scrolling gated-obstacle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, scoring, game state)
//! - `config`: Validated, data-driven game tuning
//! - `clock`: Fixed timestep frame scheduling for hosts
//! - `view`: Per-tick snapshot handed to the renderer

pub mod clock;
pub mod config;
pub mod sim;
pub mod view;

pub use clock::FrameScheduler;
pub use config::{ConfigError, SimConfig};
pub use view::FrameView;

/// Default tuning constants (pixels, ticks, milliseconds)
pub mod consts {
    /// Target simulation rate. Physics steps are per tick, not per second.
    pub const TARGET_FPS: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Visible play area
    pub const SCREEN_WIDTH: f32 = 864.0;
    pub const SCREEN_HEIGHT: f32 = 936.0;
    /// Top of the ground strip
    pub const GROUND_Y: f32 = 768.0;
    /// Ground strip wraps back to 0 once it has scrolled this far
    pub const GROUND_WRAP: f32 = 35.0;

    /// Actor sprite size and spawn centre
    pub const ACTOR_WIDTH: f32 = 34.0;
    pub const ACTOR_HEIGHT: f32 = 24.0;
    pub const ACTOR_SPAWN_X: f32 = 100.0;
    pub const ACTOR_SPAWN_Y: f32 = SCREEN_HEIGHT / 2.0;

    /// Actor physics (per tick, positive = down)
    pub const GRAVITY: f32 = 0.5;
    pub const MAX_FALL_SPEED: f32 = 8.0;
    pub const JUMP_VELOCITY: f32 = -10.0;

    /// Flap animation: frame advances once the counter exceeds this
    pub const FLAP_INTERVAL: u32 = 5;
    pub const ANIMATION_FRAMES: usize = 3;

    /// Display rotation (degrees) = velocity * -ROTATION_FACTOR, clamped
    pub const ROTATION_FACTOR: f32 = 2.0;
    pub const ROTATION_MIN: f32 = -90.0;
    pub const ROTATION_MAX: f32 = 90.0;
    /// Nose-down pose once the run is over
    pub const STALLED_ROTATION: f32 = -90.0;

    /// Obstacle sprite size
    pub const OBSTACLE_WIDTH: f32 = 78.0;
    pub const OBSTACLE_HEIGHT: f32 = 568.0;
    /// Vertical opening between the two obstacles of a pair
    pub const GAP: f32 = 150.0;
    /// Gap centre is offset from the midline by a uniform integer in ±range
    pub const GAP_OFFSET_RANGE: i32 = 100;
    pub const SPAWN_INTERVAL_MS: u64 = 1500;
    /// Horizontal scroll per tick
    pub const SCROLL_SPEED: f32 = 4.0;

    /// Restart control
    pub const RESTART_WIDTH: f32 = 120.0;
    pub const RESTART_HEIGHT: f32 = 42.0;
    pub const RESTART_X: f32 = SCREEN_WIDTH / 2.0 - 50.0;
    pub const RESTART_Y: f32 = SCREEN_HEIGHT / 2.0 - 100.0;
}
