//! Fixed timestep simulation tick
//!
//! Core game loop step. Physics amounts are per tick, so the host must call
//! `tick` at the configured rate regardless of its render rate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{check_collision, check_ground_contact};
use super::sprite::{Sprite, UpdateContext};
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};

/// Pointer state sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSnapshot {
    pub pos: Vec2,
    pub pressed: bool,
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Monotonic host clock in milliseconds, drives the spawn timer
    pub now_ms: u64,
    pub pointer: PointerSnapshot,
    /// Idle/demo mode - the simulation plays itself
    pub autopilot: bool,
}

/// Keep the actor's bottom this far above the gap's lower edge
const AUTOPILOT_MARGIN: f32 = 20.0;

/// Advance the game state by one fixed tick.
///
/// Pipeline order (the tie-breaks are observable):
/// 1. activation edge (Waiting -> Flying)
/// 2. actor update: gravity, jump input, animation
/// 3. pass-through scoring against the nearest pair
/// 4. obstacle and ceiling collision
/// 5. ground contact (lands the actor)
/// 6. spawn timer, obstacle scroll and ground scroll, only while still Flying
/// 7. restart control, only in GameOver
/// 8. latch the pointer press for the next tick's edge detection
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    let pointer = if input.autopilot {
        autopilot_pointer(state)
    } else {
        input.pointer
    };
    let press_edge = pointer.pressed && !state.pointer_latch;

    if state.phase == GamePhase::Waiting && press_edge {
        state.activate();
    }

    let ctx = UpdateContext {
        config: &state.config,
        phase: state.phase,
        pressed: pointer.pressed,
    };
    state.actor.update(&ctx);
    if state.actor.jumped {
        state.events.push(GameEvent::Jumped);
    }

    if state.phase != GamePhase::Waiting
        && state
            .score
            .update(&state.actor.bounds(), state.field.nearest_pair())
    {
        let score = state.score.score;
        state.events.push(GameEvent::PointScored { score });
        log::debug!("Scored: {}", score);
    }

    if let Some(cause) = check_collision(&state.actor.bounds(), state.field.obstacles()) {
        state.end_run(cause);
    }

    if check_ground_contact(&state.actor.bounds(), state.config.ground_y) {
        state.end_run(GameOverCause::Ground);
        state.actor.land();
    }

    if state.phase == GamePhase::Flying {
        state.advance_world(input.now_ms);
    }

    if state.phase == GamePhase::GameOver
        && state
            .restart_button()
            .is_activated(pointer.pos, pointer.pressed)
    {
        // Restart clears the latch, so a press still held next tick starts the run
        state.restart();
        return;
    }

    state.pointer_latch = pointer.pressed;
}

/// Synthesize the pointer for demo play.
///
/// Presses are alternated with releases so every press is a fresh edge.
fn autopilot_pointer(state: &GameState) -> PointerSnapshot {
    let actor = &state.actor;
    match state.phase {
        GamePhase::Waiting => PointerSnapshot {
            pos: actor.rect.center(),
            pressed: !state.pointer_latch,
        },
        GamePhase::Flying => {
            // Aim for the first pair the actor has not fully cleared yet
            let lower_edge = state
                .field
                .obstacles()
                .iter()
                .find(|o| o.rect.right() >= actor.rect.left())
                .and_then(|o| state.field.gap_of(o.pair_id))
                .map(|(_, lower_top)| lower_top)
                .unwrap_or((state.config.screen_height + state.config.gap) / 2.0);

            let sinking =
                actor.velocity >= 0.0 && actor.rect.bottom() > lower_edge - AUTOPILOT_MARGIN;
            PointerSnapshot {
                pos: actor.rect.center(),
                pressed: sinking && !actor.holding,
            }
        }
        GamePhase::GameOver => PointerSnapshot {
            pos: state.restart_button().rect.center(),
            pressed: actor.grounded && !state.pointer_latch,
        },
    }
}
