//! Headless walkthrough: drives the motion controller over a small test level with a
//! scripted sequence of key presses and mouse motion, logging what the body does.
use glam::{Quat, Vec3};
use web_time::Instant;
use winit::keyboard::KeyCode;

use firstperson::config::KeyBindings;
use firstperson::{
    CapsuleShape, CharacterBody, FrameClock, InputState, MotionConfig, MotionController,
    PhysicsWorld, StaticBody,
};

const FRAME_DT: f32 = 1.0 / 60.0;
const SPAWN: Vec3 = Vec3::new(0.0, 1.0, 0.0);

#[derive(Clone, Copy)]
enum Action {
    Forward,
    Back,
    Sprint,
    Jump,
    Crouch,
}

impl Action {
    fn key(self, bindings: &KeyBindings) -> KeyCode {
        match self {
            Action::Forward => bindings.forward,
            Action::Back => bindings.back,
            Action::Sprint => bindings.sprint,
            Action::Jump => bindings.jump,
            Action::Crouch => bindings.crouch,
        }
    }
}

struct Phase {
    name: &'static str,
    seconds: f32,
    actions: &'static [Action],
    mouse: (f32, f32),
}

const SCRIPT: &[Phase] = &[
    Phase {
        name: "settle",
        seconds: 0.5,
        actions: &[],
        mouse: (0.0, 0.0),
    },
    Phase {
        name: "walk",
        seconds: 1.0,
        actions: &[Action::Forward],
        mouse: (0.0, 0.0),
    },
    Phase {
        name: "sprint",
        seconds: 1.0,
        actions: &[Action::Forward, Action::Sprint],
        mouse: (0.0, 0.0),
    },
    Phase {
        name: "look right and up",
        seconds: 0.5,
        actions: &[],
        mouse: (30.0, -10.0),
    },
    Phase {
        name: "look back",
        seconds: 0.5,
        actions: &[],
        mouse: (-30.0, 10.0),
    },
    Phase {
        name: "jump",
        seconds: 1.0,
        actions: &[Action::Jump],
        mouse: (0.0, 0.0),
    },
    Phase {
        name: "crouch",
        seconds: 0.5,
        actions: &[Action::Crouch],
        mouse: (0.0, 0.0),
    },
    Phase {
        name: "crawl into tunnel",
        seconds: 2.0,
        actions: &[Action::Forward],
        mouse: (0.0, 0.0),
    },
    Phase {
        name: "try to stand",
        seconds: 0.5,
        actions: &[Action::Crouch],
        mouse: (0.0, 0.0),
    },
    Phase {
        name: "crawl out",
        seconds: 2.0,
        actions: &[Action::Back],
        mouse: (0.0, 0.0),
    },
    Phase {
        name: "stand",
        seconds: 0.5,
        actions: &[Action::Crouch],
        mouse: (0.0, 0.0),
    },
];

fn build_level() -> Option<PhysicsWorld> {
    PhysicsWorld::from_boxes(&[
        // Floor
        (Vec3::new(-50.0, -1.0, -50.0), Vec3::new(50.0, 0.0, 50.0)),
        // Low tunnel roof, too low to stand under
        (Vec3::new(-3.0, 1.2, -20.0), Vec3::new(3.0, 3.0, -10.0)),
    ])
}

fn load_config() -> MotionConfig {
    let Some(path) = std::env::args().nth(1) else {
        return MotionConfig::default();
    };
    match MotionConfig::load(&path) {
        Ok(config) => {
            log::info!("Loaded motion config from {}", path);
            config
        }
        Err(e) => {
            log::error!("{}; using defaults", e);
            MotionConfig::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    let Some(world) = build_level() else {
        log::error!("Failed to build level geometry");
        return;
    };

    let bindings = config.keys;
    let mut input = InputState::new(bindings);
    input.cursor_grabbed = true;
    let mut body = StaticBody::new(&world, SPAWN, CapsuleShape::standing(&config.crouch));
    let mut controller = MotionController::new(config);
    let mut orientation = Quat::IDENTITY;

    let started = Instant::now();
    let mut clock = FrameClock::starting_at(started);
    let mut slowest_frame = 0.0f32;
    let mut frames = 0u32;
    for phase in SCRIPT {
        for action in phase.actions {
            input.handle_key_press(action.key(&bindings));
        }

        let steps = (phase.seconds / FRAME_DT).round() as u32;
        for _ in 0..steps {
            input.handle_mouse_move(phase.mouse.0, phase.mouse.1);
            let snapshot = input.snapshot();
            let output = controller.update(FRAME_DT, &snapshot, orientation, &mut body);
            orientation = output.orientation;
            slowest_frame = slowest_frame.max(clock.tick());
            frames += 1;
        }

        for action in phase.actions {
            input.handle_key_release(action.key(&bindings));
        }

        let camera = controller.camera();
        log::info!(
            "{:<18} pos=({:.2}, {:.2}, {:.2}) grounded={} crouch={:?} height={:.2} pitch={:.1} camera_y={:.3}",
            phase.name,
            body.position.x,
            body.position.y,
            body.position.z,
            body.is_grounded(),
            controller.crouch_phase(),
            controller.capsule().height,
            controller.pitch(),
            camera.position.y,
        );
    }

    log::info!(
        "Simulated {} frames ({:.1}s) in {:?}, slowest frame {:.3}ms",
        frames,
        frames as f32 * FRAME_DT,
        started.elapsed(),
        slowest_frame * 1000.0
    );
}
