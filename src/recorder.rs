use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use anyhow::{Context, Result, anyhow};
use raylib::prelude::*;
use tracing::{error, info};

/// Pipes rendered frames into an `ffmpeg` child producing an H.264 video.
pub struct Recorder {
    process: Child,
    stdin: Option<ChildStdin>,
    width: i32,
    height: i32,
    frames: u64,
}

fn ffmpeg_args(width: i32, height: i32, fps: u32, output: &Path) -> Vec<String> {
    let mut args: Vec<String> = [
        "-loglevel", "error",
        "-y",
        "-f", "rawvideo",
        "-pixel_format", "rgba",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    args.extend([
        "-video_size".to_string(), format!("{width}x{height}"),
        "-framerate".to_string(), fps.to_string(),
        "-i".to_string(), "-".to_string(),
        "-c:v".to_string(), "libx264".to_string(),
        "-pix_fmt".to_string(), "yuv420p".to_string(),
        output.to_string_lossy().into_owned(),
    ]);
    args
}

/// Reverses the row order: raylib reads render textures bottom-up.
fn flip_rows(pixels: &[u8], width: usize, height: usize) -> Vec<u8> {
    let stride = width * 4; // RGBA
    let mut flipped = Vec::with_capacity(stride * height);
    for row in pixels.chunks_exact(stride).take(height).rev() {
        flipped.extend_from_slice(row);
    }
    flipped
}

impl Recorder {
    pub fn start(width: i32, height: i32, fps: u32, output: &Path) -> Result<Recorder> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(ffmpeg_args(width, height, fps, output))
            .spawn()
            .context("failed to start ffmpeg, is it installed?")?;
        let stdin = process.stdin.take().ok_or_else(|| anyhow!("ffmpeg stdin was not captured"))?;
        info!(output = %output.display(), width, height, fps, "recording started");
        Ok(Recorder { process, stdin: Some(stdin), width, height, frames: 0 })
    }

    pub fn write(&mut self, image: &Image) -> Result<()> {
        let stdin = self.stdin.as_mut().ok_or_else(|| anyhow!("recorder already finished"))?;
        let width = image.width() as usize;
        let height = image.height() as usize;
        if image.width() != self.width || image.height() != self.height {
            return Err(anyhow!(
                "frame is {}x{}, recorder expects {}x{}",
                width, height, self.width, self.height
            ));
        }
        let pixels = unsafe {
            std::slice::from_raw_parts(image.data() as *const u8, width * height * 4)
        };
        stdin.write_all(&flip_rows(pixels, width, height)).context("failed to write frame to ffmpeg")?;
        self.frames += 1;
        Ok(())
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        // Closing stdin lets ffmpeg finalise the file
        self.stdin = None;
        match self.process.wait() {
            Ok(status) if status.success() => info!(frames = self.frames, "recording finished"),
            Ok(status) => error!(%status, "ffmpeg exited with an error"),
            Err(e) => error!(error = %e, "failed to wait for ffmpeg"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_come_out_top_down() {
        // 1x3 image, one RGBA pixel per row
        let pixels = [1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3];
        assert_eq!(flip_rows(&pixels, 1, 3), vec![3, 3, 3, 3, 2, 2, 2, 2, 1, 1, 1, 1]);
    }

    #[test]
    fn ffmpeg_reads_raw_rgba_from_stdin() {
        let args = ffmpeg_args(1920, 1080, 60, Path::new("out.mp4"));
        let joined = args.join(" ");
        assert!(joined.contains("-f rawvideo -pixel_format rgba"));
        assert!(joined.contains("-video_size 1920x1080"));
        assert!(joined.contains("-framerate 60"));
        assert_eq!(args.last().map(String::as_str), Some("out.mp4"));
    }
}
