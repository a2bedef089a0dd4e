use std::path::PathBuf;
use clap::Parser;
use crate::constants::{FPS, MAX_FPS, frame_time};
use crate::theme::Theme;

/// Single-page portfolio presenter.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
pub struct Cli {
    /// Content file (TOML). The built-in sample profile is shown when omitted.
    #[arg(long, value_name = "FILE")]
    pub content: Option<PathBuf>,

    /// Directory of portrait photos, shown after the ones the content file lists.
    #[arg(long, value_name = "DIR")]
    pub photos: Option<PathBuf>,

    /// Colour theme; toggle at runtime with T.
    #[arg(long, value_enum, default_value_t = Theme::System)]
    pub theme: Theme,

    /// Record an automatic scroll-through to this video file and exit.
    #[arg(long, value_name = "FILE.mp4")]
    pub record: Option<PathBuf>,

    /// Target frame rate; also the frame rate of recorded video.
    #[arg(long, default_value_t = FPS, value_parser = clap::value_parser!(u32).range(1..=MAX_FPS as i64))]
    pub fps: u32,
}

impl Cli {
    /// Fixed simulation step used while recording.
    pub fn frame_time(&self) -> f32 {
        frame_time(self.fps)
    }
}
