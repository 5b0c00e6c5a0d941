//! Mode7: perspective ground plane software renderer
//!
//! SNES-style pseudo-3D floor rendering:
//! - Flat texture seen through a trapezoidal frustum
//! - Reciprocal depth per scanline for perspective foreshortening
//! - Nearest-neighbor sampling, wrapping or clamped
//! - Everything drawn on the CPU into an RGBA framebuffer

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod rasterizer;
mod world;
mod input;
mod config;
mod app;
mod cli;
mod snapshot;

use std::process::ExitCode;

use clap::Parser;
use macroquad::prelude::*;

use app::RendererState;
use cli::Cli;
use config::{save_config, RendererConfig};
use input::{poll_commands, poll_input};

fn window_conf(config: &RendererConfig) -> Conf {
    Conf {
        window_title: format!("Mode7 v{}", VERSION),
        window_width: (config.screen_width * config.window_scale) as i32,
        window_height: (config.screen_height * config.window_scale) as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &cli.write_config {
        return match save_config(&config, path) {
            Ok(()) => {
                log::info!("Wrote config to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to write {}: {}", path.display(), e);
                ExitCode::FAILURE
            }
        };
    }

    // No recovery from a missing texture
    let mut state = match RendererState::from_config(config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to load texture: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Texture {} ({}x{}, {})",
        state.texture.name(),
        state.texture.width(),
        state.texture.height(),
        state.texture.policy().label()
    );

    if let Some(path) = &cli.snapshot {
        let fb = state.render();
        return match snapshot::save_png(fb, path) {
            Ok(()) => {
                log::info!("Saved snapshot to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to save snapshot {}: {}", path.display(), e);
                ExitCode::FAILURE
            }
        };
    }

    let conf = window_conf(&state.config);
    macroquad::Window::from_config(conf, run(state));
    ExitCode::SUCCESS
}

/// Frame loop: poll, update, render, present, overlay
async fn run(mut state: RendererState) {
    let width = state.framebuffer.width;
    let height = state.framebuffer.height;

    let screen = Texture2D::from_rgba8(width as u16, height as u16, state.framebuffer.as_bytes());
    screen.set_filter(FilterMode::Nearest);

    log::info!("=== Mode7 {}x{} ===", width, height);

    loop {
        let commands = poll_commands();
        if commands.quit {
            log::info!("Quit after {} frames", state.frame_count());
            break;
        }
        if commands.toggle_overlay {
            state.show_overlay = !state.show_overlay;
        }

        let input = poll_input();
        let fb = state.frame(&input);
        screen.update_from_bytes(width as u32, height as u32, fb.as_bytes());

        clear_background(BLACK);
        draw_texture_ex(
            &screen,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        if state.show_overlay {
            draw_overlay(&state.status_text(get_fps()));
        }

        next_frame().await;
    }
}

/// Status text in the top-left corner, one line at a time
fn draw_overlay(text: &str) {
    let font_size = 16.0;
    let line_height = 18.0;
    let lines = text.lines().count() as f32;

    draw_rectangle(
        4.0,
        4.0,
        560.0,
        lines * line_height + 8.0,
        Color::from_rgba(0, 0, 0, 160),
    );

    for (i, line) in text.lines().enumerate() {
        draw_text(
            line,
            10.0,
            4.0 + line_height * (i as f32 + 1.0),
            font_size,
            Color::from_rgba(220, 220, 220, 255),
        );
    }
}
