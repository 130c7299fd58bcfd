use glam::{Quat, Vec3};

use crate::config::{BobParams, HeadbobConfig, SpeedConfig};

/// Locomotion mode. Crouching wins over sprinting, sprinting over walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gait {
    Walk,
    Sprint,
    Crouch,
}

impl Gait {
    pub fn select(crouching: bool, sprinting: bool) -> Self {
        if crouching {
            Gait::Crouch
        } else if sprinting {
            Gait::Sprint
        } else {
            Gait::Walk
        }
    }

    pub fn speed(self, config: &SpeedConfig) -> f32 {
        match self {
            Gait::Walk => config.walk,
            Gait::Sprint => config.sprint,
            Gait::Crouch => config.crouch,
        }
    }

    pub fn bob(self, config: &HeadbobConfig) -> BobParams {
        match self {
            Gait::Walk => config.walk,
            Gait::Sprint => config.sprint,
            Gait::Crouch => config.crouch,
        }
    }
}

/// Velocity carried between frames, in units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Motion {
    pub velocity: Vec3,
}

impl Motion {
    /// Replaces the horizontal velocity from the axes and the body's basis.
    /// The vertical component is left alone.
    pub fn steer(&mut self, orientation: Quat, forward: f32, strafe: f32, speed: f32) {
        let ahead = orientation * Vec3::NEG_Z;
        let right = orientation * Vec3::X;
        let vertical = self.velocity.y;
        self.velocity = ahead * (forward * speed) + right * (strafe * speed);
        self.velocity.y = vertical;
    }

    pub fn jump(&mut self, force: f32) {
        self.velocity.y = force;
    }

    pub fn apply_gravity(&mut self, grounded: bool, gravity: f32, dt: f32) {
        if !grounded {
            self.velocity.y -= gravity * dt;
        }
    }

    pub fn frame_delta(&self, dt: f32) -> Vec3 {
        self.velocity * dt
    }

    /// Whether horizontal motion is past `deadzone` on either axis.
    pub fn is_moving(&self, deadzone: f32) -> bool {
        self.velocity.x.abs() > deadzone || self.velocity.z.abs() > deadzone
    }
}
