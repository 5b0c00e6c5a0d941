//! World module - the camera and what it can see
//!
//! - Camera pose and frustum parameters, driven by per-frame input
//! - Trapezoidal view frustum on the ground plane

mod camera;
mod frustum;

pub use camera::*;
pub use frustum::*;
