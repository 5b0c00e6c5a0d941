//! Keyboard input for camera control
//!
//! Polled once per frame into plain booleans so the camera never sees
//! macroquad types.

use macroquad::prelude::*;

/// Logical controls held down this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub forward: bool,
    pub back: bool,
    pub near_up: bool,
    pub near_down: bool,
    pub far_up: bool,
    pub far_down: bool,
    pub fov_up: bool,
    pub fov_down: bool,
    pub reset: bool,
}

impl InputState {
    pub fn any(&self) -> bool {
        *self != Self::default()
    }
}

/// Window-level requests that don't touch the camera
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCommands {
    pub toggle_overlay: bool,
    pub quit: bool,
}

/// Key bindings shown in the overlay
pub const CONTROLS_HELP: &str =
    "Arrows: turn/move | Q/A: near | W/S: far | Z/X: fov | R: reset | F1: overlay";

/// Read held keys for this frame
pub fn poll_input() -> InputState {
    InputState {
        rotate_left: is_key_down(KeyCode::Left),
        rotate_right: is_key_down(KeyCode::Right),
        forward: is_key_down(KeyCode::Up),
        back: is_key_down(KeyCode::Down),
        near_up: is_key_down(KeyCode::Q),
        near_down: is_key_down(KeyCode::A),
        far_up: is_key_down(KeyCode::W),
        far_down: is_key_down(KeyCode::S),
        fov_up: is_key_down(KeyCode::Z),
        fov_down: is_key_down(KeyCode::X),
        reset: is_key_pressed(KeyCode::R),
    }
}

/// Read one-shot window commands for this frame
pub fn poll_commands() -> FrameCommands {
    FrameCommands {
        toggle_overlay: is_key_pressed(KeyCode::F1),
        quit: is_key_pressed(KeyCode::Escape),
    }
}
