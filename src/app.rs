//! Renderer state and the per-frame pipeline
//!
//! One struct owns everything that lives for the whole run: config, camera,
//! texture and framebuffer. The window loop feeds it input and presents
//! whatever `render` leaves in the framebuffer.

use std::fmt::Write as _;

use crate::config::{RendererConfig, TextureSource};
use crate::input::{InputState, CONTROLS_HELP};
use crate::rasterizer::{project_ground, Framebuffer, Texture, TextureError};
use crate::world::{Camera, Frustum};

/// Build the ground texture described by the config
pub fn load_texture(config: &RendererConfig) -> Result<Texture, TextureError> {
    let texture = match &config.texture {
        TextureSource::Grid(pattern) => Texture::grid(pattern),
        TextureSource::Image { path } => Texture::from_file(path)?,
    };
    Ok(texture.with_policy(config.sample_policy()))
}

/// Everything the renderer owns between frames
pub struct RendererState {
    pub config: RendererConfig,
    pub camera: Camera,
    pub texture: Texture,
    pub framebuffer: Framebuffer,
    /// Overlay visibility, toggled at runtime
    pub show_overlay: bool,
    frame_count: u64,
}

impl RendererState {
    /// Create state around an already loaded texture
    pub fn new(config: RendererConfig, texture: Texture) -> Self {
        let camera = Camera::from_config(config.camera);
        let framebuffer = Framebuffer::new(config.screen_width, config.screen_height);
        let show_overlay = config.show_overlay;

        Self {
            config,
            camera,
            texture,
            framebuffer,
            show_overlay,
            frame_count: 0,
        }
    }

    /// Load the texture from the config, then create state
    pub fn from_config(config: RendererConfig) -> Result<Self, TextureError> {
        let texture = load_texture(&config)?;
        Ok(Self::new(config, texture))
    }

    /// Advance the camera by one frame of input
    pub fn update(&mut self, input: &InputState) {
        self.camera.apply_input(input, &self.config.controls);
        if input.any() {
            log::trace!(
                "camera at ({:.4}, {:.4}) heading {:.3}",
                self.camera.position.x,
                self.camera.position.y,
                self.camera.heading
            );
        }
    }

    /// Draw sky and ground into the framebuffer
    pub fn render(&mut self) -> &Framebuffer {
        let frustum = Frustum::from_camera(&self.camera);
        let horizon = self.framebuffer.horizon();

        self.framebuffer.fill_rows(0..horizon, self.config.sky_color);
        project_ground(&frustum, &self.texture, &mut self.framebuffer);

        self.frame_count += 1;
        &self.framebuffer
    }

    /// One full frame: input, camera, frustum, projection
    pub fn frame(&mut self, input: &InputState) -> &Framebuffer {
        self.update(input);
        self.render()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Multi-line diagnostic text for the overlay
    pub fn status_text(&self, fps: i32) -> String {
        let cam = &self.camera;
        let mut text = String::new();
        let _ = writeln!(text, "X: {:.6}", cam.position.x);
        let _ = writeln!(text, "Y: {:.6}", cam.position.y);
        let _ = writeln!(text, "Heading: {:.4} rad", cam.heading);
        let _ = writeln!(text, "Near: {:.5}  Far: {:.5}", cam.near, cam.far);
        let _ = writeln!(
            text,
            "Half FOV: {:.4} rad ({:.1} deg)",
            cam.half_fov,
            cam.half_fov.to_degrees()
        );
        let _ = writeln!(
            text,
            "Texture: {} {}x{} ({})",
            self.texture.name(),
            self.texture.width(),
            self.texture.height(),
            self.texture.policy().label()
        );
        let _ = writeln!(text, "FPS: {}", fps);
        text.push_str(CONTROLS_HELP);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Color, GridPattern, SamplePolicy, Vec2};
    use crate::world::CameraConfig;

    fn small_config() -> RendererConfig {
        RendererConfig {
            screen_width: 64,
            screen_height: 48,
            texture: TextureSource::Grid(GridPattern { size: 128, spacing: 16, ..Default::default() }),
            sky_color: Color::new(1, 2, 3),
            camera: CameraConfig { heading: 0.0, ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn test_state_from_grid_config() {
        let state = RendererState::from_config(small_config()).unwrap();
        assert_eq!(state.texture.width(), 128);
        assert_eq!(state.texture.policy(), SamplePolicy::Wrap);
        assert_eq!(state.framebuffer.width, 64);
        assert_eq!(state.framebuffer.height, 48);
        assert_eq!(state.camera.position, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_missing_image_is_an_error() {
        let config = RendererConfig {
            texture: TextureSource::Image { path: "missing/texture.png".into() },
            ..small_config()
        };
        assert!(RendererState::from_config(config).is_err());
    }

    #[test]
    fn test_render_fills_sky_and_ground() {
        let mut state = RendererState::from_config(small_config()).unwrap();
        let fb = state.render();

        for y in 0..24 {
            assert_eq!(fb.get_pixel(5, y), Some(Color::new(1, 2, 3)));
        }
        // Horizon row hits the divide by zero
        assert_eq!(fb.get_pixel(5, 24), Some(Texture::BACKGROUND));
        assert_eq!(state.frame_count(), 1);
    }

    #[test]
    fn test_frame_applies_input_first() {
        let mut state = RendererState::from_config(small_config()).unwrap();
        let input = InputState { forward: true, ..Default::default() };
        state.frame(&input);
        assert!((state.camera.position.x - 0.502).abs() < 1e-6);
        assert!((state.camera.position.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_same_camera_same_frame() {
        let mut state = RendererState::from_config(small_config()).unwrap();
        let first = state.render().as_bytes().to_vec();
        let second = state.render().as_bytes().to_vec();
        assert_eq!(first, second);

        state.frame(&InputState { rotate_right: true, ..Default::default() });
        assert_ne!(state.framebuffer.as_bytes(), &first[..]);
    }

    #[test]
    fn test_status_text_mentions_camera() {
        let state = RendererState::from_config(small_config()).unwrap();
        let text = state.status_text(60);
        assert!(text.contains("X: 0.500000"));
        assert!(text.contains("Heading: 0.0000"));
        assert!(text.contains("FPS: 60"));
        assert!(text.contains("45.0 deg"));
        assert!(text.contains("wrap"));
    }
}
