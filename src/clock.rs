use web_time::Instant;

use crate::config::MAX_FRAME_DT;

/// Elapsed time between host frames, clamped so a stall does not launch the body.
pub struct FrameClock {
    last_update: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self { last_update: now }
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now
            .saturating_duration_since(self.last_update)
            .as_secs_f32()
            .min(MAX_FRAME_DT);
        self.last_update = now;
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
