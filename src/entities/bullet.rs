use glam::Vec2;

#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Fires from `origin` at the nearest of `targets`, or straight up when
    /// there is nothing to aim at. Ties go to the first target listed.
    pub fn aimed(origin: Vec2, targets: impl IntoIterator<Item = Vec2>, speed: f32) -> Self {
        let mut nearest: Option<(Vec2, f32)> = None;
        for target in targets {
            let dist = origin.distance(target);
            match nearest {
                Some((_, best)) if dist >= best => {}
                _ => nearest = Some((target, dist)),
            }
        }

        let vel = match nearest {
            Some((target, _)) => (target - origin).normalize_or_zero() * speed,
            None => Vec2::new(0.0, speed),
        };
        Self::new(origin, vel)
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}
