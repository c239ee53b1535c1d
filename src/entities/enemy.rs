use glam::Vec2;

use super::animation::Animation;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub animation: Animation,
}

impl Enemy {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            animation: Animation::default(),
        }
    }

    /// Velocity of `speed` pointing from `from` at `target`. Zero when the
    /// two coincide.
    pub fn homing_velocity(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
        (target - from).normalize_or_zero() * speed
    }

    /// Re-aims at the player's current position and moves one frame.
    pub fn update(&mut self, target: Vec2, speed: f32, dt: f32, frame_duration: f32) {
        self.vel = Self::homing_velocity(self.pos, target, speed);
        self.pos += self.vel * dt;
        self.animation.advance(dt, frame_duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homing_velocity_has_requested_speed() {
        let vel = Enemy::homing_velocity(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), 50.0);
        assert!((vel.length() - 50.0).abs() < 1e-4);
        assert!((vel.x - 30.0).abs() < 1e-4);
        assert!((vel.y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_homing_velocity_on_top_of_target_is_zero() {
        let vel = Enemy::homing_velocity(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), 50.0);
        assert_eq!(vel, Vec2::ZERO);
    }

    #[test]
    fn test_enemy_update_moves_toward_target() {
        let mut enemy = Enemy::new(Vec2::new(0.0, 300.0), Vec2::ZERO);
        enemy.update(Vec2::new(400.0, 300.0), 100.0, 0.5, 0.1);
        assert!((enemy.pos.x - 50.0).abs() < 1e-4);
        assert!((enemy.pos.y - 300.0).abs() < 1e-4);
        assert!((enemy.vel.x - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_update_retargets_every_frame() {
        let mut enemy = Enemy::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 0.0));
        enemy.update(Vec2::new(100.0, 500.0), 50.0, 0.0, 0.1);
        assert!(enemy.vel.x.abs() < 1e-4);
        assert!((enemy.vel.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_animates() {
        let mut enemy = Enemy::new(Vec2::ZERO, Vec2::ZERO);
        enemy.update(Vec2::new(10.0, 0.0), 50.0, 0.1, 0.1);
        assert_eq!(enemy.animation.frame, 1);
    }
}
