//! Mode7-style software rasterizer
//!
//! Features:
//! - Perspective ground plane from per-scanline reciprocal depth
//! - Nearest-neighbor texture sampling (wrapping or clamped)
//! - Packed RGBA framebuffer, presented as-is

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;

/// Default screen dimensions
pub const WIDTH: usize = 1024;
pub const HEIGHT: usize = 768;
