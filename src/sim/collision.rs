//! Collision detection and pass-through scoring
//!
//! Everything here is exact axis-aligned rectangle math. Terminal contacts
//! are reported as a cause; the state machine decides what to do with them.

use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, PairSpan};
use super::rect::Rect;
use super::state::GameOverCause;

/// Actor hit an obstacle, or flew out over the top of the screen.
///
/// Obstacle contact is reported ahead of the ceiling when both happen.
pub fn check_collision(actor: &Rect, obstacles: &[Obstacle]) -> Option<GameOverCause> {
    if obstacles.iter().any(|o| actor.intersects(&o.rect)) {
        return Some(GameOverCause::Obstacle);
    }
    if actor.top() < 0.0 {
        return Some(GameOverCause::Ceiling);
    }
    None
}

/// Actor's bottom edge reached the ground line
pub fn check_ground_contact(actor: &Rect, ground_y: f32) -> bool {
    actor.bottom() >= ground_y
}

/// Score counter with the "inside the nearest gap" latch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    /// Actor was seen fully inside the nearest pair's horizontal span
    pub passed: bool,
}

impl ScoreState {
    /// Two-phase pass detection against the nearest pair.
    ///
    /// Entering: actor strictly within the pair's left/right edges latches
    /// `passed`. Exiting: with the latch set, the actor's left edge beyond the
    /// pair's right edge scores one point and clears the latch.
    /// Returns true on the tick a point is scored.
    pub fn update(&mut self, actor: &Rect, nearest: Option<PairSpan>) -> bool {
        let Some(pair) = nearest else {
            return false;
        };

        if !self.passed && actor.left() > pair.left && actor.right() < pair.right {
            self.passed = true;
        }
        if self.passed && actor.left() > pair.right {
            self.score += 1;
            self.passed = false;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn span(left: f32, right: f32) -> Option<PairSpan> {
        Some(PairSpan {
            pair_id: 0,
            left,
            right,
        })
    }

    #[test]
    fn test_collision_with_obstacle() {
        let config = SimConfig {
            obstacle_width: 44.0,
            obstacle_height: 80.0,
            gap: 100.0,
            ..Default::default()
        };
        // Lower obstacle top at 420: gap centre 370 with a 100 gap
        let [lower, upper] = Obstacle::pair(0, 120.0, 370.0, 0, &config);
        assert_eq!(lower.rect, Rect::new(120.0, 420.0, 44.0, 80.0));

        let hit = Rect::new(100.0, 400.0, 34.0, 34.0);
        let clear = Rect::new(100.0, 200.0, 34.0, 34.0);
        let lower_only = vec![lower.clone()];
        assert_eq!(check_collision(&hit, &lower_only), Some(GameOverCause::Obstacle));
        assert_eq!(check_collision(&clear, &lower_only), None);

        // Upper obstacle spans y 240..320; the gap is 320..420
        let both = vec![lower, upper];
        assert_eq!(check_collision(&clear, &both), None);
        let in_gap = Rect::new(100.0, 340.0, 34.0, 34.0);
        assert_eq!(check_collision(&in_gap, &both), None);
        let grazing_upper = Rect::new(100.0, 300.0, 34.0, 34.0);
        assert_eq!(check_collision(&grazing_upper, &both), Some(GameOverCause::Obstacle));
    }

    #[test]
    fn test_ceiling_out() {
        let actor = Rect::new(100.0, -1.0, 34.0, 24.0);
        assert_eq!(check_collision(&actor, &[]), Some(GameOverCause::Ceiling));

        let actor = Rect::new(100.0, 0.0, 34.0, 24.0);
        assert_eq!(check_collision(&actor, &[]), None);
    }

    #[test]
    fn test_obstacle_reported_before_ceiling() {
        let config = SimConfig::default();
        let [lower, upper] = Obstacle::pair(0, 90.0, 468.0, 0, &config);
        let actor = Rect::new(100.0, -2.0, 34.0, 24.0);
        assert_eq!(
            check_collision(&actor, &[lower, upper]),
            Some(GameOverCause::Obstacle)
        );
    }

    #[test]
    fn test_ground_contact() {
        assert!(!check_ground_contact(&Rect::new(83.0, 743.0, 34.0, 24.0), 768.0));
        assert!(check_ground_contact(&Rect::new(83.0, 744.0, 34.0, 24.0), 768.0));
        assert!(check_ground_contact(&Rect::new(83.0, 750.0, 34.0, 24.0), 768.0));
    }

    #[test]
    fn test_score_once_on_exit() {
        let mut score = ScoreState::default();
        let mut scored_at = Vec::new();

        // Actor width 34 sweeping right across a pair spanning [400, 450]
        for left in (380..500).map(|x| x as f32) {
            let actor = Rect::new(left, 456.0, 34.0, 24.0);
            if score.update(&actor, span(400.0, 450.0)) {
                scored_at.push(left);
            }
        }

        assert_eq!(score.score, 1);
        assert_eq!(scored_at, vec![451.0]);
        assert!(!score.passed);
    }

    #[test]
    fn test_no_score_without_entering() {
        let mut score = ScoreState::default();
        // Actor wider than the pair can never be fully inside
        for left in (300..600).step_by(4).map(|x| x as f32) {
            let actor = Rect::new(left, 456.0, 80.0, 24.0);
            score.update(&actor, span(400.0, 450.0));
        }
        assert_eq!(score.score, 0);
    }

    #[test]
    fn test_grazing_entry_edge_does_not_score() {
        let mut score = ScoreState::default();
        // Left edge at the pair's left edge is not strictly inside
        let actor = Rect::new(400.0, 456.0, 34.0, 24.0);
        assert!(!score.update(&actor, span(400.0, 450.0)));
        assert!(!score.passed);
        // Jumping straight past the exit without the latch
        let actor = Rect::new(460.0, 456.0, 34.0, 24.0);
        assert!(!score.update(&actor, span(400.0, 450.0)));
        assert_eq!(score.score, 0);
    }

    #[test]
    fn test_no_pair_no_change() {
        let mut score = ScoreState {
            score: 3,
            passed: true,
        };
        assert!(!score.update(&Rect::new(0.0, 0.0, 1.0, 1.0), None));
        assert_eq!(score.score, 3);
        assert!(score.passed);

        score.reset();
        assert_eq!(score, ScoreState::default());
    }
}
