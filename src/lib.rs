//! First-person motion controller: movement, mouse-look, jumping, crouching and head-bob,
//! stepped once per frame by the host with an input snapshot and the elapsed time.

pub mod clock;
pub mod collision;
pub mod config;
pub mod controller;
pub mod crouch;
pub mod headbob;
pub mod input;
pub mod look;
pub mod movement;

pub use clock::FrameClock;
pub use collision::{PhysicsWorld, StaticBody};
pub use config::{ConfigError, MotionConfig};
pub use controller::{CameraPose, CharacterBody, FrameOutput, MotionController};
pub use crouch::{CapsuleShape, CrouchPhase};
pub use input::{InputSnapshot, InputState};
