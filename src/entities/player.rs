use glam::Vec2;

use super::animation::Animation;
use crate::config::GameConfig;

/// Directions held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heading {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub health: u8,
    pub animation: Animation,
}

impl Player {
    pub fn new(pos: Vec2, health: u8) -> Self {
        Self {
            pos,
            health,
            animation: Animation::default(),
        }
    }

    /// Moves at `player_speed` along every held axis, then clamps so the
    /// sprite never leaves the playfield.
    pub fn apply_movement(&mut self, heading: Heading, dt: f32, cfg: &GameConfig) {
        let step = cfg.player_speed * dt;
        if heading.left {
            self.pos.x -= step;
        }
        if heading.right {
            self.pos.x += step;
        }
        if heading.up {
            self.pos.y += step;
        }
        if heading.down {
            self.pos.y -= step;
        }

        let (min, max) = cfg.player_bounds();
        self.pos = self.pos.clamp(min, max);
    }

    pub fn take_damage(&mut self) {
        self.health = self.health.saturating_sub(1);
    }

    pub fn heal(&mut self, max_health: u8) {
        self.health = (self.health + 1).min(max_health);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn touches(&self, other: Vec2, radius: f32) -> bool {
        self.pos.distance(other) < radius
    }
}
