use glam::{Quat, Vec3};

use crate::config::MotionConfig;
use crate::crouch::{CapsuleShape, Crouch, CrouchPhase, CrouchTrigger};
use crate::headbob::HeadBob;
use crate::input::{ButtonEdge, InputSnapshot};
use crate::look::Look;
use crate::movement::{Gait, Motion};

/// The collision-aware body the controller drives.
pub trait CharacterBody {
    fn is_grounded(&self) -> bool;

    /// Requests a collision-resolved translation.
    fn move_by(&mut self, delta: Vec3);

    /// Upward probe from `origin`, given relative to the body's position.
    fn raycast_up(&self, origin: Vec3, max_distance: f32) -> bool;

    fn set_capsule(&mut self, capsule: CapsuleShape);
}

/// Camera transform relative to the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub rotation: Quat,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub orientation: Quat,
    pub camera: CameraPose,
    pub capsule: CapsuleShape,
    /// Translation requested from the body this frame.
    pub delta: Vec3,
}

pub struct MotionController {
    config: MotionConfig,
    enabled: bool,
    motion: Motion,
    look: Look,
    crouch: Crouch,
    bob: HeadBob,
    applied_capsule: CapsuleShape,
    jump_edge: ButtonEdge,
    crouch_edge: ButtonEdge,
}

impl MotionController {
    pub fn new(config: MotionConfig) -> Self {
        let crouch = Crouch::new(&config.crouch);
        let bob = HeadBob::new(config.camera_local_position.y);
        Self {
            enabled: true,
            motion: Motion::default(),
            look: Look::default(),
            applied_capsule: crouch.capsule(),
            crouch,
            bob,
            jump_edge: ButtonEdge::default(),
            crouch_edge: ButtonEdge::default(),
            config,
        }
    }

    /// A disabled controller ignores input and freezes any running crouch transition.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::debug!("Motion controller {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
    }

    pub fn velocity(&self) -> Vec3 {
        self.motion.velocity
    }

    pub fn pitch(&self) -> f32 {
        self.look.pitch()
    }

    pub fn crouch_phase(&self) -> CrouchPhase {
        self.crouch.phase()
    }

    pub fn is_crouching(&self) -> bool {
        self.crouch.is_crouching()
    }

    pub fn capsule(&self) -> CapsuleShape {
        self.crouch.capsule()
    }

    pub fn bob_phase(&self) -> f32 {
        self.bob.phase()
    }

    pub fn camera(&self) -> CameraPose {
        let mut position = self.config.camera_local_position;
        position.y = self.bob.camera_y();
        CameraPose {
            rotation: self.look.camera_rotation(),
            position,
        }
    }

    fn output(&self, orientation: Quat, delta: Vec3) -> FrameOutput {
        FrameOutput {
            orientation,
            camera: self.camera(),
            capsule: self.crouch.capsule(),
            delta,
        }
    }

    /// Advances the controller by one frame.
    ///
    /// Steps run in a fixed order: movement, look, jump, crouch, head-bob, then gravity and
    /// the move request. Gravity comes last so a jump started this frame keeps its full force.
    pub fn update<B: CharacterBody>(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        orientation: Quat,
        body: &mut B,
    ) -> FrameOutput {
        let jump_pressed = self.jump_edge.rising(input.jump);
        let crouch_pressed = self.crouch_edge.rising(input.crouch);

        let features = self.config.features;
        if !self.enabled || !features.can_move {
            return self.output(orientation, Vec3::ZERO);
        }

        let grounded = body.is_grounded();
        let sprinting = features.can_sprint && input.sprint;

        let gait = Gait::select(self.crouch.is_crouching(), sprinting);
        self.motion.steer(
            orientation,
            input.forward,
            input.strafe,
            gait.speed(&self.config.speed),
        );

        let orientation = self.look.apply(&self.config.look, input.look, orientation);

        if features.can_jump && jump_pressed && grounded {
            log::debug!("Jump");
            self.motion.jump(self.config.jump.force);
        }

        let crouch_triggered = features.can_crouch && crouch_pressed && grounded;
        self.update_crouch(dt, crouch_triggered, orientation, body);

        if features.can_headbob && grounded && self.motion.is_moving(self.config.headbob.deadzone) {
            let gait = Gait::select(self.crouch.is_crouching(), sprinting);
            self.bob.step(gait.bob(&self.config.headbob), dt);
        }

        self.motion.apply_gravity(grounded, self.config.jump.gravity, dt);
        let delta = self.motion.frame_delta(dt);
        body.move_by(delta);

        let output = self.output(orientation, delta);
        log::trace!("Frame output: {:?}", output);
        output
    }

    fn update_crouch<B: CharacterBody>(
        &mut self,
        dt: f32,
        triggered: bool,
        orientation: Quat,
        body: &mut B,
    ) {
        let config = &self.config.crouch;
        let started = triggered && {
            let probe_origin = orientation * self.camera().position;
            let probe = || body.raycast_up(probe_origin, config.ceiling_probe_distance);
            self.crouch.trigger(config, dt, probe) == CrouchTrigger::Started
        };
        if !started {
            self.crouch.advance(config, dt);
        }

        let capsule = self.crouch.capsule();
        if capsule != self.applied_capsule {
            body.set_capsule(capsule);
            self.applied_capsule = capsule;
        }
    }
}
