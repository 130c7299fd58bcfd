//! Crouch/stand transition.
//!
//! A transition runs over `time_to_crouch` seconds and is advanced once per frame. Each
//! step samples the capsule at `elapsed / duration` and then adds the frame's time, so the
//! shape lags the clock by one frame and the final step snaps to the exact target.
//! While a transition runs, further triggers are ignored.

use glam::Vec3;

use crate::config::CrouchConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleShape {
    pub height: f32,
    pub center: Vec3,
}

impl CapsuleShape {
    pub fn standing(config: &CrouchConfig) -> Self {
        Self {
            height: config.standing_height,
            center: config.standing_center,
        }
    }

    pub fn crouched(config: &CrouchConfig) -> Self {
        Self {
            height: config.crouch_height,
            center: config.crouch_center,
        }
    }

    fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            height: self.height + (to.height - self.height) * t,
            center: self.center.lerp(to.center, t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrouchPhase {
    Standing,
    Crouching,
    ToCrouch { elapsed: f32, from: CapsuleShape },
    ToStand { elapsed: f32, from: CapsuleShape },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrouchTrigger {
    Started,
    /// Standing up was refused because something is overhead.
    Blocked,
    /// A transition is already running.
    Busy,
}

#[derive(Debug, Clone)]
pub struct Crouch {
    phase: CrouchPhase,
    capsule: CapsuleShape,
}

impl Crouch {
    pub fn new(config: &CrouchConfig) -> Self {
        Self {
            phase: CrouchPhase::Standing,
            capsule: CapsuleShape::standing(config),
        }
    }

    pub fn phase(&self) -> CrouchPhase {
        self.phase
    }

    pub fn capsule(&self) -> CapsuleShape {
        self.capsule
    }

    /// The crouch flag. It flips only when a transition completes.
    pub fn is_crouching(&self) -> bool {
        matches!(
            self.phase,
            CrouchPhase::Crouching | CrouchPhase::ToStand { .. }
        )
    }

    /// Starts a transition toward the other stance and runs its first step.
    ///
    /// `obstructed` is only consulted when standing up.
    pub fn trigger(
        &mut self,
        config: &CrouchConfig,
        dt: f32,
        obstructed: impl FnOnce() -> bool,
    ) -> CrouchTrigger {
        let from = self.capsule;
        self.phase = match self.phase {
            CrouchPhase::ToCrouch { .. } | CrouchPhase::ToStand { .. } => {
                return CrouchTrigger::Busy;
            }
            CrouchPhase::Crouching => {
                if obstructed() {
                    log::debug!("Stand-up blocked by overhead geometry");
                    return CrouchTrigger::Blocked;
                }
                CrouchPhase::ToStand { elapsed: 0.0, from }
            }
            CrouchPhase::Standing => CrouchPhase::ToCrouch { elapsed: 0.0, from },
        };
        log::debug!("Crouch transition started: {:?}", self.phase);
        self.advance(config, dt);
        CrouchTrigger::Started
    }

    /// Runs one frame of the active transition. Returns true on the frame it completes.
    pub fn advance(&mut self, config: &CrouchConfig, dt: f32) -> bool {
        let (elapsed, from, target, resting) = match &mut self.phase {
            CrouchPhase::Standing | CrouchPhase::Crouching => return false,
            CrouchPhase::ToCrouch { elapsed, from } => (
                elapsed,
                *from,
                CapsuleShape::crouched(config),
                CrouchPhase::Crouching,
            ),
            CrouchPhase::ToStand { elapsed, from } => (
                elapsed,
                *from,
                CapsuleShape::standing(config),
                CrouchPhase::Standing,
            ),
        };

        let duration = config.time_to_crouch;
        if *elapsed < duration {
            self.capsule = from.lerp(target, *elapsed / duration);
            *elapsed += dt;
            return false;
        }

        self.capsule = target;
        self.phase = resting;
        log::debug!("Crouch transition finished: {:?}", self.phase);
        true
    }
}
