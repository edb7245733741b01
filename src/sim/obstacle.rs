//! Gated obstacles and the scrolling field that spawns and prunes them
//!
//! Obstacles always come in pairs sharing one gap centre: an upper obstacle
//! hanging down to the gap and a lower obstacle rising up to it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::sprite::{Sprite, SpriteKind, SpriteView, UpdateContext};
use super::state::GamePhase;
use crate::config::SimConfig;

/// Which side of the gap an obstacle guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleRole {
    Upper,
    Lower,
}

/// One half of a gated pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pair_id: u32,
    pub role: ObstacleRole,
    pub rect: Rect,
    /// Clock time (ms) when the pair was spawned
    pub spawned_at_ms: u64,
}

impl Obstacle {
    /// Build both halves of a pair around `gap_center`
    pub fn pair(
        pair_id: u32,
        x: f32,
        gap_center: f32,
        spawned_at_ms: u64,
        config: &SimConfig,
    ) -> [Obstacle; 2] {
        let size = Vec2::new(config.obstacle_width, config.obstacle_height);
        let upper_bottom = gap_center - config.gap / 2.0;
        let lower_top = upper_bottom + config.gap;

        [
            Obstacle {
                pair_id,
                role: ObstacleRole::Lower,
                rect: Rect {
                    pos: Vec2::new(x, lower_top),
                    size,
                },
                spawned_at_ms,
            },
            Obstacle {
                pair_id,
                role: ObstacleRole::Upper,
                rect: Rect {
                    pos: Vec2::new(x, upper_bottom - size.y),
                    size,
                },
                spawned_at_ms,
            },
        ]
    }

    /// Scroll left by `speed`
    pub fn shift(&mut self, speed: f32) {
        self.rect.translate(Vec2::new(-speed, 0.0));
    }

    /// Fully past the left edge of the play area
    pub fn is_offscreen(&self) -> bool {
        self.rect.right() < 0.0
    }
}

impl Sprite for Obstacle {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, ctx: &UpdateContext<'_>) {
        self.shift(ctx.config.scroll_speed);
    }

    fn view(&self, _phase: GamePhase, _config: &SimConfig) -> SpriteView {
        let kind = match self.role {
            ObstacleRole::Upper => SpriteKind::UpperObstacle,
            ObstacleRole::Lower => SpriteKind::LowerObstacle,
        };
        SpriteView {
            kind,
            rect: self.rect,
            rotation: 0.0,
            frame: 0,
        }
    }
}

/// Horizontal extent of a pair, used for pass-through scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairSpan {
    pub pair_id: u32,
    pub left: f32,
    pub right: f32,
}

/// Active obstacles in spawn order plus the spawn timer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// None until the first spawn, so the first pair appears immediately
    last_spawn_ms: Option<u64>,
    next_pair_id: u32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active obstacles, oldest first
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn last_spawn_ms(&self) -> Option<u64> {
        self.last_spawn_ms
    }

    /// Spawn a pair at the right edge if the spawn interval has elapsed.
    /// Returns the new pair id.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        rng: &mut R,
        config: &SimConfig,
    ) -> Option<u32> {
        if let Some(last) = self.last_spawn_ms
            && now_ms.saturating_sub(last) <= config.spawn_interval_ms
        {
            return None;
        }

        let range = config.gap_offset_range;
        let offset = rng.random_range(-range..=range);
        let gap_center = config.screen_height / 2.0 + offset as f32;
        let id = self.spawn_pair(gap_center, now_ms, config);
        log::debug!("Spawned pair {} with gap centre {}", id, gap_center);
        Some(id)
    }

    /// Spawn a pair at the right edge with an explicit gap centre
    pub fn spawn_pair(&mut self, gap_center: f32, now_ms: u64, config: &SimConfig) -> u32 {
        let id = self.insert_pair_at(config.screen_width, gap_center, now_ms, config);
        self.last_spawn_ms = Some(now_ms);
        id
    }

    /// Insert a pair at an arbitrary x position without touching the spawn timer
    pub fn insert_pair_at(
        &mut self,
        x: f32,
        gap_center: f32,
        now_ms: u64,
        config: &SimConfig,
    ) -> u32 {
        let id = self.next_pair_id;
        self.next_pair_id += 1;
        self.obstacles
            .extend(Obstacle::pair(id, x, gap_center, now_ms, config));
        id
    }

    /// Scroll every obstacle left and drop the ones that left the screen.
    /// Returns how many were removed.
    pub fn advance(&mut self, config: &SimConfig) -> usize {
        let ctx = UpdateContext {
            config,
            phase: GamePhase::Flying,
            pressed: false,
        };
        for obstacle in &mut self.obstacles {
            obstacle.update(&ctx);
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_offscreen());
        let pruned = before - self.obstacles.len();
        if pruned > 0 {
            log::trace!("Pruned {} obstacles", pruned);
        }
        pruned
    }

    /// The oldest pair still on screen
    pub fn nearest_pair(&self) -> Option<PairSpan> {
        self.obstacles.first().map(|o| PairSpan {
            pair_id: o.pair_id,
            left: o.rect.left(),
            right: o.rect.right(),
        })
    }

    /// The gap (upper obstacle's bottom, lower obstacle's top) of a pair
    pub fn gap_of(&self, pair_id: u32) -> Option<(f32, f32)> {
        let mut upper_bottom = None;
        let mut lower_top = None;
        for o in self.obstacles.iter().filter(|o| o.pair_id == pair_id) {
            match o.role {
                ObstacleRole::Upper => upper_bottom = Some(o.rect.bottom()),
                ObstacleRole::Lower => lower_top = Some(o.rect.top()),
            }
        }
        Some((upper_bottom?, lower_top?))
    }

    /// Drop every active obstacle. The spawn timer keeps running.
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Drop every obstacle, restart the spawn timer and pair numbering
    pub fn reset(&mut self) {
        self.clear();
        self.last_spawn_ms = None;
        self.next_pair_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_spawn_is_immediate() {
        let config = SimConfig::default();
        let mut field = ObstacleField::new();
        let mut rng = Pcg32::seed_from_u64(1);

        assert_eq!(field.maybe_spawn(0, &mut rng, &config), Some(0));
        assert_eq!(field.len(), 2);
        assert_eq!(field.last_spawn_ms(), Some(0));
        for o in field.obstacles() {
            assert_eq!(o.rect.left(), config.screen_width);
        }
    }

    #[test]
    fn test_spawn_interval_is_strict() {
        let config = SimConfig::default();
        let mut field = ObstacleField::new();
        let mut rng = Pcg32::seed_from_u64(1);

        field.maybe_spawn(1000, &mut rng, &config);
        assert_eq!(field.maybe_spawn(2000, &mut rng, &config), None);
        assert_eq!(field.maybe_spawn(2500, &mut rng, &config), None);
        assert_eq!(field.maybe_spawn(2501, &mut rng, &config), Some(1));
        assert_eq!(field.len(), 4);
        assert_eq!(field.last_spawn_ms(), Some(2501));
    }

    #[test]
    fn test_pair_roles_and_order() {
        let config = SimConfig::default();
        let mut field = ObstacleField::new();
        field.spawn_pair(468.0, 0, &config);

        let obstacles = field.obstacles();
        assert_eq!(obstacles[0].role, ObstacleRole::Lower);
        assert_eq!(obstacles[1].role, ObstacleRole::Upper);
        assert_eq!(obstacles[1].rect.bottom(), 393.0);
        assert_eq!(obstacles[0].rect.top(), 543.0);
        assert_eq!(field.gap_of(0), Some((393.0, 543.0)));
    }

    #[test]
    fn test_odd_gap_is_exact() {
        let config = SimConfig {
            gap: 151.0,
            ..Default::default()
        };
        let [lower, upper] = Obstacle::pair(0, 864.0, 468.0, 0, &config);
        assert_eq!(lower.rect.top() - upper.rect.bottom(), 151.0);
    }

    #[test]
    fn test_advance_shifts_by_scroll_speed() {
        let config = SimConfig::default();
        let mut field = ObstacleField::new();
        field.spawn_pair(468.0, 0, &config);
        field.advance(&config);
        for o in field.obstacles() {
            assert_eq!(o.rect.left(), config.screen_width - config.scroll_speed);
        }
    }

    #[test]
    fn test_prune_on_the_advance_that_crosses_zero() {
        let config = SimConfig::default();
        let mut field = ObstacleField::new();
        // right edge at 6: one advance leaves it at 2, the next at -2
        field.insert_pair_at(6.0 - config.obstacle_width, 468.0, 0, &config);

        assert_eq!(field.advance(&config), 0);
        assert_eq!(field.len(), 2);
        assert_eq!(field.obstacles()[0].rect.right(), 2.0);

        assert_eq!(field.advance(&config), 2);
        assert!(field.is_empty());
    }

    #[test]
    fn test_right_edge_at_zero_survives() {
        let config = SimConfig::default();
        let mut field = ObstacleField::new();
        field.insert_pair_at(4.0 - config.obstacle_width, 468.0, 0, &config);
        assert_eq!(field.advance(&config), 0);
        assert_eq!(field.obstacles()[0].rect.right(), 0.0);
        assert_eq!(field.advance(&config), 2);
    }

    #[test]
    fn test_nearest_pair_is_oldest() {
        let config = SimConfig::default();
        let mut field = ObstacleField::new();
        field.insert_pair_at(400.0, 468.0, 0, &config);
        field.insert_pair_at(700.0, 468.0, 0, &config);
        let span = field.nearest_pair().unwrap();
        assert_eq!(span.pair_id, 0);
        assert_eq!(span.left, 400.0);
        assert_eq!(span.right, 400.0 + config.obstacle_width);
    }

    #[test]
    fn test_clear_keeps_timer_reset_restarts_it() {
        let config = SimConfig::default();
        let mut field = ObstacleField::new();
        let mut rng = Pcg32::seed_from_u64(3);
        field.maybe_spawn(500, &mut rng, &config);

        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.last_spawn_ms(), Some(500));
        assert!(field.maybe_spawn(600, &mut rng, &config).is_none());

        field.reset();
        assert_eq!(field.last_spawn_ms(), None);
        assert!(field.maybe_spawn(600, &mut rng, &config).is_some());
    }

    #[test]
    fn test_reset_matches_fresh_field() {
        let config = SimConfig::default();
        let mut field = ObstacleField::new();
        let mut rng = Pcg32::seed_from_u64(3);
        field.maybe_spawn(0, &mut rng, &config);
        field.maybe_spawn(2000, &mut rng, &config);
        assert_eq!(field.next_pair_id, 2);

        field.reset();
        assert_eq!(field, ObstacleField::new());
        assert_eq!(field.maybe_spawn(0, &mut rng, &config), Some(0));
    }

    proptest! {
        #[test]
        fn prop_pair_gap_is_constant(seed in any::<u64>(), spawns in 1usize..40) {
            let config = SimConfig::default();
            let mut field = ObstacleField::new();
            let mut rng = Pcg32::seed_from_u64(seed);

            for i in 0..spawns {
                let now = i as u64 * (config.spawn_interval_ms + 1);
                let id = field.maybe_spawn(now, &mut rng, &config);
                prop_assert!(id.is_some());
            }

            for id in 0..spawns as u32 {
                let (upper_bottom, lower_top) = field.gap_of(id).unwrap();
                prop_assert_eq!(lower_top - upper_bottom, config.gap);
                let center = (upper_bottom + lower_top) / 2.0;
                let offset = center - config.screen_height / 2.0;
                prop_assert!(offset.abs() <= config.gap_offset_range as f32);
                prop_assert_eq!(offset, offset.trunc());
            }
        }
    }
}
