use crate::config::BobParams;

/// Sinusoidal camera bob around a fixed base height.
///
/// The phase only advances while the body is moving. When motion stops the offset holds
/// wherever it was instead of easing back to the base.
#[derive(Debug, Clone, Copy)]
pub struct HeadBob {
    base_y: f32,
    timer: f32,
    offset_y: f32,
}

impl HeadBob {
    pub fn new(base_y: f32) -> Self {
        Self {
            base_y,
            timer: 0.0,
            offset_y: base_y,
        }
    }

    pub fn phase(&self) -> f32 {
        self.timer
    }

    /// Current camera local Y.
    pub fn camera_y(&self) -> f32 {
        self.offset_y
    }

    pub fn step(&mut self, params: BobParams, dt: f32) {
        self.timer += dt * params.speed;
        self.offset_y = self.base_y + self.timer.sin() * params.amount;
    }
}
