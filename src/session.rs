//! One playthrough: every live entity, the kill counter, and the ordered
//! per-frame simulation step.

use glam::Vec2;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bullet, Enemy, Heart, Player};
use crate::input::FrameInput;
use crate::spawner;

/// Result of advancing the simulation one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Alive,
    PlayerDied,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    /// At most one heart is ever on the field
    pub heart: Option<Heart>,
    pub kills: u32,
    /// Enemy velocities saved while paused, in enemy order
    frozen: Vec<Vec2>,
}

impl Session {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            player: Player::new(cfg.center(), cfg.player_max_health),
            bullets: Vec::new(),
            enemies: Vec::new(),
            heart: None,
            kills: 0,
            frozen: Vec::new(),
        }
    }

    /// Advances everything by `dt` seconds. `elapsed` is the survival time
    /// used for difficulty scaling.
    ///
    /// When the player's last heart is lost the step stops right there:
    /// no heart pickup or animation is applied for that frame.
    pub fn step<R: Rng>(
        &mut self,
        cfg: &GameConfig,
        input: &FrameInput,
        dt: f32,
        elapsed: f32,
        rng: &mut R,
    ) -> StepOutcome {
        self.player.apply_movement(input.heading(), dt, cfg);

        if input.fire {
            self.fire(cfg);
        }

        self.update_bullets(cfg, dt);
        self.spawn_enemies(cfg, rng, elapsed);
        self.maybe_spawn_heart(cfg, rng);
        self.update_enemies(cfg, dt, elapsed);
        self.resolve_bullet_hits(cfg);

        if self.resolve_player_hits(cfg) == StepOutcome::PlayerDied {
            return StepOutcome::PlayerDied;
        }

        self.collect_heart(cfg);
        self.player.animation.advance(dt, cfg.frame_duration);

        StepOutcome::Alive
    }

    /// Shoots one bullet from the player at the nearest enemy
    pub fn fire(&mut self, cfg: &GameConfig) {
        let bullet = Bullet::aimed(
            self.player.pos,
            self.enemies.iter().map(|e| e.pos),
            cfg.bullet_speed,
        );
        log::trace!("fired bullet with velocity {:?}", bullet.vel);
        self.bullets.push(bullet);
    }

    fn update_bullets(&mut self, cfg: &GameConfig, dt: f32) {
        for bullet in &mut self.bullets {
            bullet.update(dt);
        }

        self.bullets.retain(|b| cfg.in_playfield(b.pos));
    }

    /// Tops the enemy count up to the time-based target. Surplus enemies are
    /// never removed here.
    fn spawn_enemies<R: Rng>(&mut self, cfg: &GameConfig, rng: &mut R, elapsed: f32) {
        let target = cfg.target_enemy_count(elapsed);
        while self.enemies.len() < target {
            let enemy = spawner::spawn_enemy(cfg, rng, self.player.pos, elapsed);
            log::debug!("enemy spawned at {:?}", enemy.pos);
            self.enemies.push(enemy);
        }
    }

    fn maybe_spawn_heart<R: Rng>(&mut self, cfg: &GameConfig, rng: &mut R) {
        if self.player.health < cfg.player_max_health
            && self.heart.is_none()
            && rng.random_bool(cfg.heart_spawn_chance)
        {
            let heart = spawner::spawn_heart(cfg, rng);
            log::debug!("heart dropped at {:?}", heart.pos);
            self.heart = Some(heart);
        }
    }

    fn update_enemies(&mut self, cfg: &GameConfig, dt: f32, elapsed: f32) {
        let speed = cfg.enemy_speed(elapsed);
        let target = self.player.pos;
        for enemy in &mut self.enemies {
            enemy.update(target, speed, dt, cfg.frame_duration);
        }
    }

    /// Each bullet destroys at most the first enemy it touches
    fn resolve_bullet_hits(&mut self, cfg: &GameConfig) {
        let radius = cfg.contact_radius();
        let Self {
            bullets,
            enemies,
            kills,
            ..
        } = self;

        bullets.retain(|bullet| {
            match enemies
                .iter()
                .position(|enemy| bullet.pos.distance(enemy.pos) < radius)
            {
                Some(idx) => {
                    enemies.remove(idx);
                    *kills += 1;
                    false
                }
                None => true,
            }
        });
    }

    /// Every enemy touching the player is destroyed and costs one health.
    /// Stops at the contact that empties the health bar.
    fn resolve_player_hits(&mut self, cfg: &GameConfig) -> StepOutcome {
        let radius = cfg.contact_radius();
        let mut enemies_to_remove = Vec::new();
        let mut outcome = StepOutcome::Alive;

        for (idx, enemy) in self.enemies.iter().enumerate() {
            if self.player.touches(enemy.pos, radius) {
                enemies_to_remove.push(idx);
                self.player.take_damage();
                log::debug!("player hit, health now {}", self.player.health);

                if !self.player.is_alive() {
                    outcome = StepOutcome::PlayerDied;
                    break;
                }
            }
        }

        // Remove in reverse order to avoid index issues
        for idx in enemies_to_remove.into_iter().rev() {
            self.enemies.remove(idx);
        }

        outcome
    }

    fn collect_heart(&mut self, cfg: &GameConfig) {
        let touching = self
            .heart
            .as_ref()
            .is_some_and(|heart| self.player.touches(heart.pos, cfg.contact_radius()));

        if touching {
            self.heart = None;
            self.player.heal(cfg.player_max_health);
            log::debug!("heart collected, health now {}", self.player.health);
        }
    }

    /// Saves and zeroes every enemy velocity so the field stands still
    pub fn freeze_enemies(&mut self) {
        self.frozen = self
            .enemies
            .iter_mut()
            .map(|enemy| std::mem::take(&mut enemy.vel))
            .collect();
    }

    /// Gives every enemy back the heading it had when frozen
    pub fn thaw_enemies(&mut self) {
        for (enemy, vel) in self.enemies.iter_mut().zip(self.frozen.drain(..)) {
            enemy.vel = vel;
        }
    }
}
