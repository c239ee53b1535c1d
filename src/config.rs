//! Compiled-in tuning for the whole game.
//!
//! One [`GameConfig`] is built at startup and handed around by reference, so
//! every speed, cap and probability has a single home.

use glam::Vec2;
use std::path::PathBuf;

/// Immutable game tuning. World units, +Y up, origin bottom-left.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub sprite_width: f32,
    pub sprite_height: f32,
    pub heart_size: f32,
    pub bullet_radius: f32,
    pub bullet_speed: f32,
    pub enemy_base_speed: f32,
    pub enemy_max_speed: f32,
    /// Seconds of survival until enemies reach `enemy_max_speed`
    pub enemy_ramp_secs: f32,
    pub min_enemies: usize,
    pub max_enemies: usize,
    /// Seconds of survival per extra enemy allowed on the field
    pub enemy_wave_secs: f32,
    pub player_speed: f32,
    pub player_max_health: u8,
    /// Per-frame chance of dropping a heart while the player is hurt
    pub heart_spawn_chance: f64,
    /// Seconds each animation frame is shown
    pub frame_duration: f32,
    pub frame_rate: u32,
    pub asset_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            sprite_width: 32.0,
            sprite_height: 64.0,
            heart_size: 32.0,
            bullet_radius: 2.0,
            bullet_speed: 750.0,
            enemy_base_speed: 50.0,
            enemy_max_speed: 250.0,
            enemy_ramp_secs: 60.0,
            min_enemies: 2,
            max_enemies: 10,
            enemy_wave_secs: 10.0,
            player_speed: 200.0,
            player_max_health: 3,
            heart_spawn_chance: 0.02,
            frame_duration: 0.1,
            frame_rate: 60,
            asset_dir: PathBuf::from("assets"),
        }
    }
}

impl GameConfig {
    /// Distance under which two entities touch (half a sprite width)
    pub fn contact_radius(&self) -> f32 {
        self.sprite_width / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if `pos` lies inside the closed playfield rectangle
    pub fn in_playfield(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Lowest and highest position the player's centre may occupy
    pub fn player_bounds(&self) -> (Vec2, Vec2) {
        let half = Vec2::new(self.sprite_width / 2.0, self.sprite_height / 2.0);
        (half, Vec2::new(self.width, self.height) - half)
    }

    /// Enemy speed after `elapsed` seconds of survival, capped at the max
    pub fn enemy_speed(&self, elapsed: f32) -> f32 {
        let headroom = self.enemy_max_speed - self.enemy_base_speed;
        let increase = (headroom * (elapsed / self.enemy_ramp_secs)).min(headroom);
        self.enemy_base_speed + increase.max(0.0)
    }

    /// How many enemies should be alive after `elapsed` seconds
    pub fn target_enemy_count(&self, elapsed: f32) -> usize {
        let waves = (elapsed.max(0.0) / self.enemy_wave_secs).floor() as usize;
        (self.min_enemies + waves).min(self.max_enemies)
    }

    pub fn frame_budget(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_speed_ramps_and_caps() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.enemy_speed(0.0), 50.0);
        assert_eq!(cfg.enemy_speed(30.0), 150.0);
        assert_eq!(cfg.enemy_speed(60.0), 250.0);
        assert_eq!(cfg.enemy_speed(600.0), 250.0);
    }

    #[test]
    fn test_target_enemy_count() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.target_enemy_count(0.0), 2);
        assert_eq!(cfg.target_enemy_count(9.99), 2);
        assert_eq!(cfg.target_enemy_count(10.0), 3);
        assert_eq!(cfg.target_enemy_count(79.0), 9);
        assert_eq!(cfg.target_enemy_count(80.0), 10);
        assert_eq!(cfg.target_enemy_count(10_000.0), 10);
    }

    #[test]
    fn test_player_bounds_keep_sprite_visible() {
        let cfg = GameConfig::default();
        let (min, max) = cfg.player_bounds();
        assert_eq!(min, Vec2::new(16.0, 32.0));
        assert_eq!(max, Vec2::new(784.0, 568.0));
    }

    #[test]
    fn test_in_playfield_is_inclusive() {
        let cfg = GameConfig::default();
        assert!(cfg.in_playfield(Vec2::new(0.0, 0.0)));
        assert!(cfg.in_playfield(Vec2::new(800.0, 600.0)));
        assert!(!cfg.in_playfield(Vec2::new(800.1, 300.0)));
        assert!(!cfg.in_playfield(Vec2::new(400.0, -0.1)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enemy_speed_within_limits(elapsed in 0f32..10_000.0) {
                let cfg = GameConfig::default();
                let speed = cfg.enemy_speed(elapsed);
                prop_assert!(speed >= cfg.enemy_base_speed);
                prop_assert!(speed <= cfg.enemy_max_speed);
            }

            #[test]
            fn test_target_enemy_count_within_limits(elapsed in 0f32..10_000.0) {
                let cfg = GameConfig::default();
                let target = cfg.target_enemy_count(elapsed);
                prop_assert!(target >= cfg.min_enemies);
                prop_assert!(target <= cfg.max_enemies);
            }
        }
    }
}
