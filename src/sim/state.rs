//! Game state and core simulation types
//!
//! All simulation state is owned by `GameState`; subsystems receive it (or
//! the parts they need) by reference each tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::button::RestartButton;
use super::collision::ScoreState;
use super::obstacle::ObstacleField;
use crate::config::{ConfigError, SimConfig};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Actor hovers at the spawn point until the first press
    #[default]
    Waiting,
    /// Active gameplay
    Flying,
    /// Run ended; waiting for the restart control
    GameOver,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    Obstacle,
    Ceiling,
    Ground,
}

/// Things that happened during the last tick (for host feedback hooks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Waiting -> Flying
    Activated,
    Jumped,
    PairSpawned { pair_id: u32 },
    PointScored { score: u32 },
    GameOver { cause: GameOverCause },
    /// GameOver -> Waiting
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: ScoreState,
    pub actor: Actor,
    pub field: ObstacleField,
    /// Horizontal offset of the scrolling ground strip (<= 0)
    pub ground_offset: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
    /// Pointer press seen on the previous tick, for activation edge detection
    pub pointer_latch: bool,
}

impl GameState {
    /// Create a new game with a validated config
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Create a new game with default tuning
    pub fn with_seed(seed: u64) -> Self {
        Self::build(SimConfig::default(), seed)
    }

    fn build(config: SimConfig, seed: u64) -> Self {
        Self {
            actor: Actor::new(&config),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Waiting,
            score: ScoreState::default(),
            field: ObstacleField::new(),
            ground_offset: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            pointer_latch: false,
        }
    }

    pub fn restart_button(&self) -> RestartButton {
        RestartButton::new(self.config.restart_rect())
    }

    /// Waiting -> Flying
    pub fn activate(&mut self) {
        if self.phase != GamePhase::Waiting {
            return;
        }
        self.phase = GamePhase::Flying;
        self.events.push(GameEvent::Activated);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Enter GameOver. Returns false if the run had already ended.
    pub fn end_run(&mut self, cause: GameOverCause) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { cause });
        log::info!("Game over ({:?}) with score {}", cause, self.score.score);
        true
    }

    /// GameOver -> Waiting with a fresh run. Animation counters are kept.
    pub fn restart(&mut self) {
        self.actor.reset(&self.config);
        self.field.reset();
        self.score.reset();
        self.ground_offset = 0.0;
        self.pointer_latch = false;
        self.phase = GamePhase::Waiting;
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted");
    }

    /// Spawn timer, obstacle scroll and ground scroll for one Flying tick
    pub fn advance_world(&mut self, now_ms: u64) {
        if let Some(pair_id) = self.field.maybe_spawn(now_ms, &mut self.rng, &self.config) {
            self.events.push(GameEvent::PairSpawned { pair_id });
        }
        self.field.advance(&self.config);

        self.ground_offset -= self.config.scroll_speed;
        if self.ground_offset.abs() > self.config.ground_wrap {
            self.ground_offset = 0.0;
        }
    }

    /// Did a point get scored this tick
    pub fn point_scored(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::PointScored { .. }))
    }

    /// Did the run end this tick
    pub fn game_over_fired(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_config() {
        let bad = SimConfig {
            gap: -1.0,
            ..Default::default()
        };
        assert!(GameState::new(bad, 1).is_err());
        assert!(GameState::new(SimConfig::default(), 1).is_ok());
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::with_seed(7);
        assert_eq!(state.phase, GamePhase::Waiting);
        assert_eq!(state.score.score, 0);
        assert!(state.field.is_empty());
        assert_eq!(state.actor.rect, state.config.actor_spawn_rect());
    }

    #[test]
    fn test_end_run_fires_once() {
        let mut state = GameState::with_seed(7);
        state.activate();
        assert!(state.end_run(GameOverCause::Obstacle));
        assert!(!state.end_run(GameOverCause::Ground));
        let game_overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert!(state.game_over_fired());
    }

    #[test]
    fn test_activate_only_from_waiting() {
        let mut state = GameState::with_seed(7);
        state.phase = GamePhase::GameOver;
        state.activate();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_ground_scroll_wraps() {
        let mut state = GameState::with_seed(7);
        state.phase = GamePhase::Flying;
        let mut offsets = Vec::new();
        for i in 0..10 {
            state.advance_world(i * 16);
            offsets.push(state.ground_offset);
        }
        // -4, -8, ..., -32, then -36 wraps to 0
        assert_eq!(offsets[7], -32.0);
        assert_eq!(offsets[8], 0.0);
        assert_eq!(offsets[9], -4.0);
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let mut a = GameState::with_seed(42);
        let mut b = GameState::with_seed(42);
        for i in 0..400 {
            a.advance_world(i * 16);
            b.advance_world(i * 16);
        }
        assert_eq!(a.field.obstacles(), b.field.obstacles());
        assert!(!a.field.is_empty());
    }
}
