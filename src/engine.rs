use anyhow::Result;
use raylib::prelude::*;
use std::path::PathBuf;

pub trait Engine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, photos: &[PathBuf]) -> Result<()>;
    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) -> bool;
    /// The framebuffer was recreated at a new height.
    fn resize(&mut self, height: i32);
    fn shutdown(&mut self);
}
