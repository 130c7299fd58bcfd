use approx::assert_relative_eq;
use glam::{Quat, Vec2, Vec3};

use firstperson::config::CrouchConfig;
use firstperson::{
    CapsuleShape, CharacterBody, CrouchPhase, InputSnapshot, MotionConfig, MotionController,
    PhysicsWorld, StaticBody,
};

/// Body whose contact state is set by the test.
#[derive(Default)]
struct ScriptedBody {
    grounded: bool,
    ceiling: bool,
    moves: Vec<Vec3>,
    capsules: Vec<CapsuleShape>,
}

impl CharacterBody for ScriptedBody {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn move_by(&mut self, delta: Vec3) {
        self.moves.push(delta);
    }

    fn raycast_up(&self, _origin: Vec3, _max_distance: f32) -> bool {
        self.ceiling
    }

    fn set_capsule(&mut self, capsule: CapsuleShape) {
        self.capsules.push(capsule);
    }
}

fn on_ground() -> ScriptedBody {
    ScriptedBody {
        grounded: true,
        ..Default::default()
    }
}

fn held(f: impl FnOnce(&mut InputSnapshot)) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    f(&mut input);
    input
}

#[test]
fn jump_then_gravity_on_next_airborne_frame() {
    let config = MotionConfig::default();
    let (force, gravity) = (config.jump.force, config.jump.gravity);
    let mut controller = MotionController::new(config);
    let mut body = on_ground();
    let jump = held(|i| i.jump = true);

    let out = controller.update(0.016, &jump, Quat::IDENTITY, &mut body);
    assert_eq!(controller.velocity().y, force);
    assert_relative_eq!(out.delta.y, force * 0.016);

    body.grounded = false;
    controller.update(0.016, &jump, Quat::IDENTITY, &mut body);
    assert_relative_eq!(controller.velocity().y, force - gravity * 0.016, epsilon = 1e-5);
}

#[test]
fn crouch_over_two_seconds() {
    let mut config = MotionConfig::default();
    config.crouch.time_to_crouch = 2.0;
    let crouch_cfg = config.crouch;
    let mut controller = MotionController::new(config);
    let mut body = on_ground();

    controller.update(0.016, &held(|i| i.crouch = true), Quat::IDENTITY, &mut body);
    assert!(matches!(controller.crouch_phase(), CrouchPhase::ToCrouch { .. }));

    let mut frames = 0;
    while controller.crouch_phase() != CrouchPhase::Crouching {
        controller.update(0.016, &InputSnapshot::default(), Quat::IDENTITY, &mut body);
        frames += 1;
        assert!(frames < 200);
    }

    // 2.0 / 0.016 = 125 frames of interpolation, then the snap.
    assert!((124..=127).contains(&frames), "took {frames} frames");
    let heights: Vec<f32> = body.capsules.iter().map(|c| c.height).collect();
    assert!(heights.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(body.capsules.last(), Some(&CapsuleShape::crouched(&crouch_cfg)));
    assert!(controller.is_crouching());
}

#[test]
fn repeated_crouch_presses_during_transition_are_ignored() {
    let mut config = MotionConfig::default();
    config.crouch.time_to_crouch = 0.5;
    let mut controller = MotionController::new(config);
    let mut body = on_ground();
    let press = held(|i| i.crouch = true);
    let idle = InputSnapshot::default();

    controller.update(0.05, &press, Quat::IDENTITY, &mut body);
    for _ in 0..3 {
        controller.update(0.05, &idle, Quat::IDENTITY, &mut body);
        controller.update(0.05, &press, Quat::IDENTITY, &mut body);
        assert!(matches!(controller.crouch_phase(), CrouchPhase::ToCrouch { .. }));
    }

    for _ in 0..20 {
        controller.update(0.05, &idle, Quat::IDENTITY, &mut body);
    }
    assert_eq!(controller.crouch_phase(), CrouchPhase::Crouching);
}

#[test]
fn movement_and_look_continue_during_transition() {
    let mut controller = MotionController::new(MotionConfig::default());
    let mut body = on_ground();

    controller.update(0.016, &held(|i| i.crouch = true), Quat::IDENTITY, &mut body);
    let out = controller.update(
        0.016,
        &held(|i| {
            i.forward = 1.0;
            i.look = Vec2::new(1.0, 1.0);
        }),
        Quat::IDENTITY,
        &mut body,
    );

    assert!(matches!(controller.crouch_phase(), CrouchPhase::ToCrouch { .. }));
    assert!(out.delta.length() > 0.0);
    assert_ne!(out.orientation, Quat::IDENTITY);
    assert_eq!(controller.pitch(), -2.0);
}

#[test]
fn head_bob_holds_when_stopping() {
    let mut controller = MotionController::new(MotionConfig::default());
    let mut body = on_ground();
    let walk = held(|i| i.forward = 1.0);
    let idle = InputSnapshot::default();

    let mut last = 0.0;
    for _ in 0..7 {
        last = controller.update(0.016, &walk, Quat::IDENTITY, &mut body).camera.position.y;
    }
    assert_ne!(last, 0.8);

    for _ in 0..30 {
        let y = controller.update(0.016, &idle, Quat::IDENTITY, &mut body).camera.position.y;
        assert_eq!(y, last);
    }
}

#[test]
fn head_bob_paused_in_air_and_when_disabled() {
    let walk = held(|i| i.forward = 1.0);

    let mut controller = MotionController::new(MotionConfig::default());
    let mut airborne = ScriptedBody::default();
    controller.update(0.016, &walk, Quat::IDENTITY, &mut airborne);
    assert_eq!(controller.bob_phase(), 0.0);

    let mut config = MotionConfig::default();
    config.features.can_headbob = false;
    let mut controller = MotionController::new(config);
    let out = controller.update(0.016, &walk, Quat::IDENTITY, &mut on_ground());
    assert_eq!(out.camera.position.y, 0.8);
}

#[test]
fn disabling_freezes_and_resumes_transition() {
    let mut config = MotionConfig::default();
    config.crouch.time_to_crouch = 0.1;
    let mut controller = MotionController::new(config);
    let mut body = on_ground();
    let idle = InputSnapshot::default();

    controller.update(0.02, &held(|i| i.crouch = true), Quat::IDENTITY, &mut body);
    controller.update(0.02, &idle, Quat::IDENTITY, &mut body);
    let frozen = controller.crouch_phase();

    controller.set_enabled(false);
    for _ in 0..50 {
        let out = controller.update(0.02, &idle, Quat::IDENTITY, &mut body);
        assert_eq!(out.delta, Vec3::ZERO);
    }
    assert_eq!(controller.crouch_phase(), frozen);

    controller.set_enabled(true);
    for _ in 0..10 {
        controller.update(0.02, &idle, Quat::IDENTITY, &mut body);
    }
    assert_eq!(controller.crouch_phase(), CrouchPhase::Crouching);
}

#[test]
fn crouch_under_roof_then_stand_outside() {
    let world = PhysicsWorld::from_boxes(&[
        (Vec3::new(-20.0, -1.0, -20.0), Vec3::new(20.0, 0.0, 20.0)),
        (Vec3::new(-3.0, 1.2, -12.0), Vec3::new(3.0, 3.0, -4.0)),
    ])
    .expect("level");
    let config = MotionConfig::default();
    let standing = CapsuleShape::standing(&config.crouch);
    let mut body = StaticBody::new(&world, Vec3::new(0.0, 1.0, -2.0), standing);
    let mut controller = MotionController::new(config);
    let dt: f32 = 1.0 / 60.0;
    let run = |controller: &mut MotionController,
               body: &mut StaticBody,
               input: InputSnapshot,
               frames: usize| {
        for _ in 0..frames {
            controller.update(dt, &input, Quat::IDENTITY, body);
        }
    };
    let idle = InputSnapshot::default();
    let crouch = held(|i| i.crouch = true);

    assert!(body.is_grounded());
    run(&mut controller, &mut body, crouch, 1);
    run(&mut controller, &mut body, idle, 60);
    assert!(controller.is_crouching());
    assert!(body.is_grounded());

    // 3 units forward at crouch speed puts the camera under the roof.
    run(&mut controller, &mut body, held(|i| i.forward = 1.0), 120);
    assert!(body.position.z < -4.5, "z = {}", body.position.z);

    run(&mut controller, &mut body, crouch, 1);
    run(&mut controller, &mut body, idle, 30);
    assert_eq!(controller.crouch_phase(), CrouchPhase::Crouching);

    run(&mut controller, &mut body, held(|i| i.forward = -1.0), 120);
    assert!(body.position.z > -4.0, "z = {}", body.position.z);

    run(&mut controller, &mut body, crouch, 1);
    run(&mut controller, &mut body, idle, 60);
    assert_eq!(controller.crouch_phase(), CrouchPhase::Standing);
    assert_eq!(body.capsule(), CapsuleShape::standing(&CrouchConfig::default()));
    assert!(body.is_grounded());
    assert_relative_eq!(body.position.y, 1.0, epsilon = 1e-3);
}
