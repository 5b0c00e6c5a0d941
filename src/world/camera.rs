//! Camera state and per-frame input update

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use serde::{Serialize, Deserialize};

use crate::input::InputState;
use crate::rasterizer::Vec2;

/// Smallest near distance and smallest near/far gap
pub const MIN_DISTANCE: f32 = 0.0001;
/// Margin kept between the half field of view and 0 / PI/2
pub const MIN_HALF_FOV: f32 = 0.01;

/// Starting camera, as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub x: f32,
    pub y: f32,
    /// Radians, 0 looks along +X
    pub heading: f32,
    pub near: f32,
    pub far: f32,
    /// Radians
    pub half_fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            heading: FRAC_PI_4,
            near: 0.005,
            far: 0.03,
            half_fov: FRAC_PI_4,
        }
    }
}

impl CameraConfig {
    /// Check `0 < near < far` and `0 < half_fov < PI/2`
    pub fn validate(&self) -> Result<(), String> {
        let values = [self.x, self.y, self.heading, self.near, self.far, self.half_fov];
        if values.iter().any(|v| !v.is_finite()) {
            return Err("camera values must be finite".to_string());
        }
        if self.near <= 0.0 || self.near >= self.far {
            return Err(format!(
                "camera needs 0 < near < far (near = {}, far = {})",
                self.near, self.far
            ));
        }
        if self.half_fov <= 0.0 || self.half_fov >= FRAC_PI_2 {
            return Err(format!(
                "camera needs 0 < half_fov < pi/2 (half_fov = {})",
                self.half_fov
            ));
        }
        Ok(())
    }
}

/// Per-frame step sizes for each control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSteps {
    /// Heading change per frame (radians)
    pub turn: f32,
    /// Distance moved per frame
    pub move_step: f32,
    pub near: f32,
    pub far: f32,
    /// Half field of view change per frame (radians)
    pub fov: f32,
}

impl Default for ControlSteps {
    fn default() -> Self {
        Self {
            turn: 0.02,
            move_step: 0.002,
            near: 0.0005,
            far: 0.001,
            fov: 0.01,
        }
    }
}

impl ControlSteps {
    pub fn validate(&self) -> Result<(), String> {
        let steps = [self.turn, self.move_step, self.near, self.far, self.fov];
        if steps.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err("control steps must be positive".to_string());
        }
        Ok(())
    }
}

/// Camera on the ground plane
///
/// Position and heading are free: no clamping, heading is never wrapped
/// since only its sine and cosine are used. The frustum parameters always
/// keep `0 < near < far` and `0 < half_fov < PI/2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub heading: f32,
    pub near: f32,
    pub far: f32,
    pub half_fov: f32,

    // Restored by the reset control
    home: CameraConfig,
}

impl Camera {
    #[cfg(test)]
    pub fn new(position: Vec2, heading: f32, near: f32, far: f32, half_fov: f32) -> Self {
        Self::from_config(CameraConfig {
            x: position.x,
            y: position.y,
            heading,
            near,
            far,
            half_fov,
        })
    }

    pub fn from_config(config: CameraConfig) -> Self {
        Self {
            position: Vec2::new(config.x, config.y),
            heading: config.heading,
            near: config.near,
            far: config.far,
            half_fov: config.half_fov,
            home: config,
        }
    }

    /// Unit vector along the heading
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    pub fn rotate(&mut self, delta: f32) {
        self.heading += delta;
    }

    /// Move along the heading (negative distance moves backwards)
    pub fn advance(&mut self, distance: f32) {
        self.position = self.position + self.forward() * distance;
    }

    pub fn adjust_near(&mut self, delta: f32) {
        let wanted = self.near + delta;
        self.near = wanted.min(self.far - MIN_DISTANCE).max(MIN_DISTANCE);
        if self.near != wanted {
            log::debug!("near distance clamped to {}", self.near);
        }
    }

    pub fn adjust_far(&mut self, delta: f32) {
        let wanted = self.far + delta;
        self.far = wanted.max(self.near + MIN_DISTANCE);
        if self.far != wanted {
            log::debug!("far distance clamped to {}", self.far);
        }
    }

    pub fn adjust_half_fov(&mut self, delta: f32) {
        let wanted = self.half_fov + delta;
        self.half_fov = wanted.min(FRAC_PI_2 - MIN_HALF_FOV).max(MIN_HALF_FOV);
        if self.half_fov != wanted {
            log::debug!("half fov clamped to {}", self.half_fov);
        }
    }

    /// Back to the pose and frustum the camera was created with
    pub fn reset(&mut self) {
        *self = Self::from_config(self.home);
    }

    /// Apply one frame of input. Reset goes first; every other control is
    /// independent and additive, so opposing keys cancel out.
    pub fn apply_input(&mut self, input: &InputState, steps: &ControlSteps) {
        if input.reset {
            self.reset();
        }

        if input.rotate_right {
            self.rotate(steps.turn);
        }
        if input.rotate_left {
            self.rotate(-steps.turn);
        }
        if input.forward {
            self.advance(steps.move_step);
        }
        if input.back {
            self.advance(-steps.move_step);
        }

        if input.near_up {
            self.adjust_near(steps.near);
        }
        if input.near_down {
            self.adjust_near(-steps.near);
        }
        if input.far_up {
            self.adjust_far(steps.far);
        }
        if input.far_down {
            self.adjust_far(-steps.far);
        }
        if input.fov_up {
            self.adjust_half_fov(steps.fov);
        }
        if input.fov_down {
            self.adjust_half_fov(-steps.fov);
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(CameraConfig::default())
    }
}
