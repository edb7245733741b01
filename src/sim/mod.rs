//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (per-tick physics amounts)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod button;
pub mod collision;
pub mod obstacle;
pub mod rect;
pub mod sprite;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use button::RestartButton;
pub use collision::{ScoreState, check_collision, check_ground_contact};
pub use obstacle::{Obstacle, ObstacleField, ObstacleRole, PairSpan};
pub use rect::Rect;
pub use sprite::{Sprite, SpriteKind, SpriteView, UpdateContext};
pub use state::{GameEvent, GameOverCause, GamePhase, GameState};
pub use tick::{PointerSnapshot, TickInput, tick};
