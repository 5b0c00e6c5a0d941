//! Core types for the rasterizer

use serde::{Serialize, Deserialize};
use std::path::Path;
use thiserror::Error;

/// RGBA color (0-255 per channel)
///
/// Serialized as a plain `(r, g, b, a)` tuple so config files stay short.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u8, u8, u8, u8)", into = "(u8, u8, u8, u8)")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    pub const MAGENTA: Color = Color { r: 255, g: 0, b: 255, a: 255 };

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for (u8, u8, u8, u8) {
    fn from(c: Color) -> Self {
        (c.r, c.g, c.b, c.a)
    }
}

/// What happens when a sample lands outside the texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplePolicy {
    /// Tile the texture infinitely in both directions
    Wrap,
    /// Return `Texture::BACKGROUND` outside `[0, width) x [0, height)`
    Clamp,
}

impl SamplePolicy {
    pub fn label(&self) -> &'static str {
        match self {
            SamplePolicy::Wrap => "wrap",
            SamplePolicy::Clamp => "clamp",
        }
    }
}

/// Parameters for the procedural grid map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPattern {
    /// Width and height in texels
    pub size: usize,
    /// Distance between line centers
    pub spacing: usize,
    /// Line thickness in texels
    pub line_width: usize,
    /// Color of the lines running along Y (constant column)
    pub line_color_x: Color,
    /// Color of the lines running along X (constant row), drawn on top
    pub line_color_y: Color,
    pub background: Color,
}

impl Default for GridPattern {
    fn default() -> Self {
        Self {
            size: 1024,
            spacing: 32,
            line_width: 3,
            line_color_x: Color::MAGENTA,
            line_color_y: Color::BLUE,
            background: Color::BLACK,
        }
    }
}

/// Error type for texture loading
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: usize, height: usize },
}

/// Immutable color grid sampled with normalized coordinates
#[derive(Debug, Clone)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    name: String,
    policy: SamplePolicy,
}

impl Texture {
    /// Color returned for samples that miss a clamped texture
    pub const BACKGROUND: Color = Color::BLACK;

    /// Solid texture. Zero dimensions are bumped to 1 so sampling always
    /// has a texel to land on.
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
            name: String::new(),
            policy: SamplePolicy::Wrap,
        }
    }

    /// Build from a row-major pixel list
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Color>,
        name: String,
    ) -> Result<Self, TextureError> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(TextureError::Empty { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
            name,
            policy: SamplePolicy::Clamp,
        })
    }

    /// Procedural grid: two perpendicular families of lines over a background.
    ///
    /// Lines sit on every multiple of `spacing`, including `size` itself, so
    /// the last column/row is covered by the edge line's inner half.
    pub fn grid(pattern: &GridPattern) -> Self {
        let size = pattern.size.max(1);
        let mut tex = Self::new(size, size, pattern.background);
        tex.name = "grid".to_string();

        let spacing = pattern.spacing.max(1);
        let half = pattern.line_width / 2;

        for center in (0..=size).step_by(spacing) {
            for i in 0..pattern.line_width {
                let Some(col) = (center + i).checked_sub(half) else { continue };
                if col >= size {
                    continue;
                }
                for row in 0..size {
                    tex.pixels[row * size + col] = pattern.line_color_x;
                }
            }
        }

        for center in (0..=size).step_by(spacing) {
            for i in 0..pattern.line_width {
                let Some(row) = (center + i).checked_sub(half) else { continue };
                if row >= size {
                    continue;
                }
                tex.pixels[row * size..(row + 1) * size].fill(pattern.line_color_y);
            }
        }

        tex
    }

    /// Load texture from an image file (PNG, JPEG or BMP)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::from_bytes(&bytes, name)
    }

    /// Load texture from raw encoded image bytes
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self, TextureError> {
        use image::GenericImageView;

        let img = image::load_from_memory(bytes)?;

        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();

        let pixels: Vec<Color> = rgba
            .pixels()
            .map(|p| Color::with_alpha(p[0], p[1], p[2], p[3]))
            .collect();

        Self::from_pixels(width as usize, height as usize, pixels, name)
    }

    /// Same texels, different out-of-range behavior
    pub fn with_policy(mut self, policy: SamplePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> SamplePolicy {
        self.policy
    }

    /// Sample texture at normalized coordinates (nearest texel, no filtering).
    ///
    /// Coordinates are scaled by the texture size and floored, so the texel
    /// grid is continuous across 0 and negative coordinates miss a clamped
    /// texture.
    /// NaN or infinite coordinates resolve to `BACKGROUND` under either policy.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if !u.is_finite() || !v.is_finite() {
            return Self::BACKGROUND;
        }

        let tx = (u * self.width as f32).floor() as i64;
        let ty = (v * self.height as f32).floor() as i64;

        match self.policy {
            SamplePolicy::Wrap => {
                let tx = tx.rem_euclid(self.width as i64) as usize;
                let ty = ty.rem_euclid(self.height as i64) as usize;
                self.pixels[ty * self.width + tx]
            }
            SamplePolicy::Clamp => {
                if tx < 0 || ty < 0 || tx >= self.width as i64 || ty >= self.height as i64 {
                    Self::BACKGROUND
                } else {
                    self.pixels[ty as usize * self.width + tx as usize]
                }
            }
        }
    }

    /// Get pixel at x,y coordinates
    #[cfg(test)]
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            Self::BACKGROUND
        }
    }
}
