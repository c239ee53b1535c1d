/// Looping two-frame flipbook driven by elapsed seconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Animation {
    pub frame: usize,
    pub elapsed: f32,
}

impl Animation {
    pub const FRAMES: usize = 2;

    /// Advances the timer; steps to the next frame each time a full
    /// `frame_duration` has accumulated, carrying the remainder over.
    pub fn advance(&mut self, dt: f32, frame_duration: f32) {
        self.elapsed += dt;
        if self.elapsed >= frame_duration {
            self.elapsed -= frame_duration;
            self.frame = (self.frame + 1) % Self::FRAMES;
        }
    }
}
