//! Per-tick snapshot for the host renderer
//!
//! The simulation never draws. After each tick the host captures a
//! `FrameView` and renders sprites, the score text, the ground strip and
//! the restart control from it.

use serde::Serialize;

use crate::sim::{GameEvent, GamePhase, GameState, Rect, Sprite, SpriteView};

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub actor: SpriteView,
    /// Oldest first
    pub obstacles: Vec<SpriteView>,
    /// Ground strip offset, drawn at (ground_offset, ground_y)
    pub ground_offset: f32,
    pub ground_y: f32,
    /// Restart control bounds, only while the run is over
    pub restart: Option<Rect>,
    pub events: Vec<GameEvent>,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let phase = state.phase;
        let config = &state.config;
        Self {
            tick: state.time_ticks,
            phase,
            score: state.score.score,
            actor: state.actor.view(phase, config),
            obstacles: state
                .field
                .obstacles()
                .iter()
                .map(|o| o.view(phase, config))
                .collect(),
            ground_offset: state.ground_offset,
            ground_y: config.ground_y,
            restart: (phase == GamePhase::GameOver).then(|| config.restart_rect()),
            events: state.events.clone(),
        }
    }

    pub fn point_scored(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::PointScored { .. }))
    }

    pub fn game_over(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    }
}
