use std::collections::HashSet;

use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::config::{KeyBindings, MOUSE_AXIS_SCALE};

/// One frame of input, sampled by the host and handed to the controller.
///
/// Axes are in [-1, 1]. `look` is in look-axis units with positive Y meaning "mouse up".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub forward: f32,
    pub strafe: f32,
    pub look: Vec2,
    pub sprint: bool,
    pub jump: bool,
    pub crouch: bool,
}

/// Turns a held flag into a pressed-this-frame flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdge {
    was_held: bool,
}

impl ButtonEdge {
    /// True only on the frame `held` goes from false to true.
    pub fn rising(&mut self, held: bool) -> bool {
        let rose = held && !self.was_held;
        self.was_held = held;
        rose
    }
}

/// Keyboard and mouse accumulator fed from window events.
pub struct InputState {
    bindings: KeyBindings,
    pressed_keys: HashSet<KeyCode>,
    mouse_delta: (f32, f32),
    pub cursor_grabbed: bool,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pressed_keys: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            cursor_grabbed: false,
        }
    }

    pub fn handle_key_press(&mut self, key: KeyCode) {
        self.pressed_keys.insert(key);
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.pressed_keys.remove(&key);
    }

    pub fn handle_mouse_move(&mut self, dx: f32, dy: f32) {
        if !self.cursor_grabbed {
            return;
        }
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    pub fn consume_mouse_delta(&mut self) -> (f32, f32) {
        let delta = self.mouse_delta;
        self.mouse_delta = (0.0, 0.0);
        delta
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    fn axis(&self, positive: KeyCode, negative: KeyCode) -> f32 {
        match (self.is_pressed(positive), self.is_pressed(negative)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// Samples the current state and drains the accumulated mouse motion.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let keys = self.bindings;
        let (dx, dy) = self.consume_mouse_delta();
        InputSnapshot {
            forward: self.axis(keys.forward, keys.back),
            strafe: self.axis(keys.right, keys.left),
            // Window Y grows downward.
            look: Vec2::new(dx, -dy) * MOUSE_AXIS_SCALE,
            sprint: self.is_pressed(keys.sprint),
            jump: self.is_pressed(keys.jump),
            crouch: self.is_pressed(keys.crouch),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}
