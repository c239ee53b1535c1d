//! Placement of new enemies and hearts.

use glam::Vec2;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Enemy, Heart};

/// Playfield edge an enemy walks in from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Right,
    Left,
}

impl Edge {
    fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..4) {
            0 => Edge::Top,
            1 => Edge::Bottom,
            2 => Edge::Right,
            _ => Edge::Left,
        }
    }

    /// Point on this edge at fraction `t` (0..1) along it
    pub fn point(self, t: f32, cfg: &GameConfig) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(t * cfg.width, cfg.height),
            Edge::Bottom => Vec2::new(t * cfg.width, 0.0),
            Edge::Right => Vec2::new(cfg.width, t * cfg.height),
            Edge::Left => Vec2::new(0.0, t * cfg.height),
        }
    }
}

/// Spawns an enemy on a random edge, already heading for the player at the
/// speed for the current survival time.
pub fn spawn_enemy<R: Rng>(
    cfg: &GameConfig,
    rng: &mut R,
    player_pos: Vec2,
    elapsed: f32,
) -> Enemy {
    let edge = Edge::random(rng);
    let pos = edge.point(rng.random::<f32>(), cfg);
    let vel = Enemy::homing_velocity(pos, player_pos, cfg.enemy_speed(elapsed));
    Enemy::new(pos, vel)
}

/// Drops a heart anywhere on the playfield. Callers enforce the one-heart
/// limit and the spawn chance.
pub fn spawn_heart<R: Rng>(cfg: &GameConfig, rng: &mut R) -> Heart {
    Heart::new(Vec2::new(
        rng.random::<f32>() * cfg.width,
        rng.random::<f32>() * cfg.height,
    ))
}
