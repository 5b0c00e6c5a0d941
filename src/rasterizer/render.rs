//! Core rendering functions
//! Scanline projection of the ground plane

use std::ops::Range;

use super::math::Vec2;
use super::types::{Color, Texture};
use crate::world::Frustum;

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel, row-major
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    /// Fill whole rows with a solid color (rows past the bottom are ignored)
    pub fn fill_rows(&mut self, rows: Range<usize>, color: Color) {
        let end = rows.end.min(self.height);
        if rows.start >= end {
            return;
        }
        let bytes = color.to_bytes();
        let stride = self.width * 4;
        for px in self.pixels[rows.start * stride..end * stride].chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Packed RGBA bytes, ready for presentation
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of rows the ground plane occupies (the bottom half)
    pub fn ground_rows(&self) -> usize {
        self.height / 2
    }

    /// First screen row of the ground plane
    pub fn horizon(&self) -> usize {
        self.height - self.ground_rows()
    }
}

// Per-pixel access; the projector writes whole rows instead
#[cfg(test)]
impl Framebuffer {
    pub fn clear(&mut self, color: Color) {
        self.fill_rows(0..self.height, color);
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let p = &self.pixels[idx..idx + 4];
            Some(Color::with_alpha(p[0], p[1], p[2], p[3]))
        } else {
            None
        }
    }
}

/// World-space endpoints of one ground scanline.
///
/// `row` counts down from the horizon; `depth = row / rows` is pushed through
/// `1/depth` so rows near the horizon stretch toward infinity. Depth 1 lands
/// on the far edge of the frustum. Row 0 divides by zero and yields
/// non-finite points, which the texture maps to its background color.
#[inline]
pub fn scanline_endpoints(frustum: &Frustum, row: usize, rows: usize) -> (Vec2, Vec2) {
    let depth = row as f32 / rows as f32;
    let start = (frustum.far_left - frustum.near_left) / depth + frustum.near_left;
    let end = (frustum.far_right - frustum.near_right) / depth + frustum.near_right;
    (start, end)
}

/// Point sampled by screen column `col` on a scanline from `start` to `end`
#[inline]
pub fn sample_point(start: Vec2, end: Vec2, col: usize, width: usize) -> Vec2 {
    let t = col as f32 / width as f32;
    Vec2::lerp(start, end, t)
}

/// Project a range of ground rows (relative to the horizon) into the framebuffer.
///
/// Rows are independent of each other, so callers may split the ground into
/// several ranges. Rows outside the ground are ignored.
pub fn project_rows(frustum: &Frustum, texture: &Texture, fb: &mut Framebuffer, rows: Range<usize>) {
    let ground = fb.ground_rows();
    let horizon = fb.horizon();
    let width = fb.width;
    let stride = width * 4;

    for row in rows.start..rows.end.min(ground) {
        let (start, end) = scanline_endpoints(frustum, row, ground);

        let y = horizon + row;
        let line = &mut fb.pixels[y * stride..(y + 1) * stride];

        for (col, px) in line.chunks_exact_mut(4).enumerate() {
            let p = sample_point(start, end, col, width);
            px.copy_from_slice(&texture.sample(p.x, p.y).to_bytes());
        }
    }
}

/// Project the whole ground plane (bottom half of the framebuffer)
pub fn project_ground(frustum: &Frustum, texture: &Texture, fb: &mut Framebuffer) {
    let rows = fb.ground_rows();
    project_rows(frustum, texture, fb, 0..rows);
}
