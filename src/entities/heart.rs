use glam::Vec2;

/// Health pickup; restores one heart on contact
#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    pub pos: Vec2,
}

impl Heart {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }
}
