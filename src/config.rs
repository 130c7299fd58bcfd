use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

// Movement
pub const WALK_SPEED: f32 = 3.0;
pub const SPRINT_SPEED: f32 = 6.0;
pub const CROUCH_SPEED: f32 = 1.5;

// Look (degrees)
pub const LOOK_SPEED: f32 = 2.0;
pub const UPPER_LOOK_LIMIT: f32 = 80.0;
pub const LOWER_LOOK_LIMIT: f32 = 80.0;

// Jumping
pub const JUMP_FORCE: f32 = 8.0;
pub const GRAVITY: f32 = 30.0;

// Crouching
pub const CROUCH_HEIGHT: f32 = 0.5;
pub const STANDING_HEIGHT: f32 = 2.0;
pub const CROUCH_CENTER: Vec3 = Vec3::new(0.0, 0.5, 0.0);
pub const STANDING_CENTER: Vec3 = Vec3::ZERO;
pub const TIME_TO_CROUCH: f32 = 0.25;
pub const CEILING_PROBE_DISTANCE: f32 = 1.0;

// Head-bob (phase speed, amplitude)
pub const WALK_BOB: (f32, f32) = (14.0, 0.05);
pub const SPRINT_BOB: (f32, f32) = (18.0, 0.11);
pub const CROUCH_BOB: (f32, f32) = (8.0, 0.025);
pub const BOB_DEADZONE: f32 = 0.1;

// Camera
pub const CAMERA_LOCAL_POSITION: Vec3 = Vec3::new(0.0, 0.8, 0.0);

// Reference body
pub const BODY_RADIUS: f32 = 0.5;
pub const STEP_OVER_HEIGHT: f32 = 0.3; // can step over obstacles this tall
pub const GROUND_SNAP_MARGIN: f32 = 0.05; // extra distance for ground detection tolerance

/// Raw mouse counts to look-axis units.
pub const MOUSE_AXIS_SCALE: f32 = 0.1;
/// Upper bound on a single frame's elapsed time.
pub const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid motion config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Optional behaviour blocks. `can_move` gates the whole update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub can_move: bool,
    pub can_sprint: bool,
    pub can_jump: bool,
    pub can_crouch: bool,
    pub can_headbob: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            can_move: true,
            can_sprint: true,
            can_jump: true,
            can_crouch: true,
            can_headbob: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    pub walk: f32,
    pub sprint: f32,
    pub crouch: f32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            walk: WALK_SPEED,
            sprint: SPRINT_SPEED,
            crouch: CROUCH_SPEED,
        }
    }
}

/// Sensitivities are degrees per look-axis unit; limits are degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    pub speed_x: f32,
    pub speed_y: f32,
    pub upper_limit: f32,
    pub lower_limit: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            speed_x: LOOK_SPEED,
            speed_y: LOOK_SPEED,
            upper_limit: UPPER_LOOK_LIMIT,
            lower_limit: LOWER_LOOK_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    pub force: f32,
    pub gravity: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            force: JUMP_FORCE,
            gravity: GRAVITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrouchConfig {
    pub crouch_height: f32,
    pub standing_height: f32,
    pub crouch_center: Vec3,
    pub standing_center: Vec3,
    pub time_to_crouch: f32,
    /// Length of the upward probe that blocks standing up.
    pub ceiling_probe_distance: f32,
}

impl Default for CrouchConfig {
    fn default() -> Self {
        Self {
            crouch_height: CROUCH_HEIGHT,
            standing_height: STANDING_HEIGHT,
            crouch_center: CROUCH_CENTER,
            standing_center: STANDING_CENTER,
            time_to_crouch: TIME_TO_CROUCH,
            ceiling_probe_distance: CEILING_PROBE_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BobParams {
    pub speed: f32,
    pub amount: f32,
}

impl From<(f32, f32)> for BobParams {
    fn from((speed, amount): (f32, f32)) -> Self {
        Self { speed, amount }
    }
}

/// Bob parameters as written in a config file; missing fields fall back per gait.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BobParamsFile {
    speed: Option<f32>,
    amount: Option<f32>,
}

impl BobParamsFile {
    fn or(self, fallback: (f32, f32)) -> BobParams {
        BobParams {
            speed: self.speed.unwrap_or(fallback.0),
            amount: self.amount.unwrap_or(fallback.1),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HeadbobConfigFile {
    walk: BobParamsFile,
    sprint: BobParamsFile,
    crouch: BobParamsFile,
    deadzone: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "HeadbobConfigFile")]
pub struct HeadbobConfig {
    pub walk: BobParams,
    pub sprint: BobParams,
    pub crouch: BobParams,
    pub deadzone: f32,
}

impl Default for HeadbobConfig {
    fn default() -> Self {
        HeadbobConfigFile::default().into()
    }
}

impl From<HeadbobConfigFile> for HeadbobConfig {
    fn from(file: HeadbobConfigFile) -> Self {
        Self {
            walk: file.walk.or(WALK_BOB),
            sprint: file.sprint.or(SPRINT_BOB),
            crouch: file.crouch.or(CROUCH_BOB),
            deadzone: file.deadzone.unwrap_or(BOB_DEADZONE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub sprint: KeyCode,
    pub jump: KeyCode,
    pub crouch: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            sprint: KeyCode::ShiftLeft,
            jump: KeyCode::Space,
            crouch: KeyCode::ControlLeft,
        }
    }
}

/// Everything the controller needs, fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub features: FeatureFlags,
    pub speed: SpeedConfig,
    pub look: LookConfig,
    pub jump: JumpConfig,
    pub crouch: CrouchConfig,
    pub headbob: HeadbobConfig,
    pub keys: KeyBindings,
    /// Camera position relative to the body at startup; head-bob oscillates around its Y.
    pub camera_local_position: Vec3,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            features: FeatureFlags::default(),
            speed: SpeedConfig::default(),
            look: LookConfig::default(),
            jump: JumpConfig::default(),
            crouch: CrouchConfig::default(),
            headbob: HeadbobConfig::default(),
            keys: KeyBindings::default(),
            camera_local_position: CAMERA_LOCAL_POSITION,
        }
    }
}

impl MotionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
