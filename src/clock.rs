use std::time::{Duration, Instant};

/// Frame delta plus survival time that only counts unpaused play.
///
/// Every method takes `now` so callers (and tests) decide what time it is.
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// Survival time banked before the current running stretch
    banked: Duration,
    /// Start of the current running stretch; `None` while stopped
    running_since: Option<Instant>,
    last_frame: Instant,
}

impl SessionClock {
    pub fn start(now: Instant) -> Self {
        Self {
            banked: Duration::ZERO,
            running_since: Some(now),
            last_frame: now,
        }
    }

    /// Seconds since the previous tick
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        dt.as_secs_f32()
    }

    /// Stops counting survival time
    pub fn stop(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.banked += now.saturating_duration_since(since);
        }
    }

    /// Resumes counting from `now`; the stopped interval is never counted
    /// and the next frame delta starts fresh.
    pub fn resume(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
        self.last_frame = now;
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self.banked + now.saturating_duration_since(since),
            None => self.banked,
        }
    }
}

/// `m:ss`, as shown in the title bar
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Long form used on the pause and game over screens
pub fn format_survival(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{} minutes {} seconds", secs / 60, secs % 60)
}
