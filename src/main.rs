use anyhow::{Result, anyhow};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod constants;
mod content;
mod engine;
mod page;
mod portfolio;
mod recorder;
mod reveal;
mod rotation;
mod scroll;
mod session;
mod state;
mod text;
mod texture_loader;
mod theme;
mod timer;

use crate::cli::Cli;
use crate::constants::*;
use crate::content::Content;
use crate::engine::Engine;
use crate::portfolio::PortfolioEngine;
use crate::recorder::Recorder;
use crate::texture_loader::load_sorted_image_paths;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // --- Load Content ---
    let content = match &cli.content {
        Some(path) => Content::load(path)?,
        None => Content::default(),
    };
    info!(name = %content.profile.name, projects = content.projects.len(), skills = content.skill_count(), "content ready");

    let mut photo_paths = content.profile.photos.clone();
    if let Some(dir) = &cli.photos {
        match load_sorted_image_paths(dir) {
            Ok(paths) => photo_paths.extend(paths),
            Err(e) => warn!("{e:#}"),
        }
    }

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title(&content.profile.name)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(cli.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut engine = PortfolioEngine::new(content, cli.theme, cli.record.is_some());
    engine.initialize(&mut rl, &thread, &photo_paths)?;

    let mut recorder = match &cli.record {
        Some(path) => Some(Recorder::start(RENDER_WIDTH, RENDER_HEIGHT, cli.fps, path)?),
        None => None,
    };

    let mut framebuffer = rl.load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow!("failed to create render texture: {e}"))?;

    let fixed_step = cli.frame_time();

    // --- Main Loop ---
    while !rl.window_should_close() {
        // The page follows the window shape; recordings keep a fixed frame size
        if recorder.is_none() && rl.is_window_resized() {
            let height = render_height_for(rl.get_screen_width(), rl.get_screen_height());
            if height != framebuffer.height() {
                framebuffer = rl.load_render_texture(&thread, RENDER_WIDTH as u32, height as u32)
                    .map_err(|e| anyhow!("failed to resize render texture: {e}"))?;
                engine.resize(height);
                info!(height, "render texture resized");
            }
        }

        // Recording uses a fixed step so the video runs at real speed
        let dt = if recorder.is_some() { fixed_step } else { rl.get_frame_time() };

        if !engine.render_frame(dt, &mut rl, &thread, &mut framebuffer) {
            break;
        }

        // Draw the framebuffer scaled to the window, flipped back upright
        let mut d = rl.begin_drawing(&thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.clear_background(Color::BLACK);
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        drop(d);

        if let Some(recorder) = recorder.as_mut() {
            let image = framebuffer.load_image().map_err(|e| anyhow!("failed to read back frame: {e}"))?;
            recorder.write(&image)?;
        }
    }

    engine.shutdown();
    // Finishes the video before the window goes away
    drop(recorder);
    Ok(())
}
