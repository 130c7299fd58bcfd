use glam::{Quat, Vec2};

use crate::config::LookConfig;

/// Accumulated camera pitch in degrees. Negative looks up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Look {
    pitch: f32,
}

impl Look {
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Camera local rotation for the current pitch (X axis only).
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_rotation_x(-self.pitch.to_radians())
    }

    /// Applies one frame of look input and returns the new body orientation.
    ///
    /// Pitch stays within `[-upper_limit, lower_limit]`; yaw is composed onto `orientation`
    /// without limit.
    pub fn apply(&mut self, config: &LookConfig, look: Vec2, orientation: Quat) -> Quat {
        self.pitch = (self.pitch - look.y * config.speed_y)
            .clamp(-config.upper_limit, config.lower_limit);

        // Positive mouse X turns right, which is clockwise about +Y.
        let yaw = -(look.x * config.speed_x).to_radians();
        (orientation * Quat::from_rotation_y(yaw)).normalize()
    }
}
