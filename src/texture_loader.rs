use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result, anyhow, bail};
use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, warn};

#[derive(Debug, PartialEq, Clone, Copy)]
enum Step {
    RotateCw,
    RotateCcw,
    FlipHorizontal,
    FlipVertical,
}

// EXIF orientation 1..=8 to the pixel operations that make the image upright.
fn orientation_steps(orientation: u16) -> &'static [Step] {
    match orientation {
        2 => &[Step::FlipHorizontal],
        3 => &[Step::RotateCw, Step::RotateCw],
        4 => &[Step::FlipVertical],
        5 => &[Step::RotateCw, Step::FlipHorizontal],
        6 => &[Step::RotateCw],
        7 => &[Step::RotateCcw, Step::FlipHorizontal],
        8 => &[Step::RotateCcw],
        _ => &[],
    }
}

fn is_image(path: &Path) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg" | "bmp" | "gif"),
        None => false,
    }
}

/// Image files directly inside `dir`, sorted by file name.
pub fn load_sorted_image_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    for entry in entries {
        let path = entry.context("failed to read directory entry")?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        bail!("no image files found in directory {}", dir.display());
    }
    Ok(paths)
}

fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Value::Short(values) = &field.value {
                    if let Some(orientation) = values.first() {
                        return *orientation;
                    }
                }
            }
            1
        }
        Err(e) => {
            warn!(path = %image_path.display(), error = %e, "could not read EXIF data, keeping orientation");
            1
        }
    }
}

pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("failed to read file {}", image_path.display()))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();

    // Only JPEG carries EXIF reliably
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_orientation(image_path, &file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| anyhow!("failed to decode {}: {}", image_path.display(), e))?;

    for step in orientation_steps(orientation) {
        match step {
            Step::RotateCw => image.rotate_cw(),
            Step::RotateCcw => image.rotate_ccw(),
            Step::FlipHorizontal => image.flip_horizontal(),
            Step::FlipVertical => image.flip_vertical(),
        }
    }
    debug!(path = %image_path.display(), orientation, "photo decoded");

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("failed to create texture for {}: {}", image_path.display(), e))?;

    // Free the CPU copy now that the GPU has it
    drop(image);

    Ok(texture)
}

/// Loads every photo it can; failures are logged and skipped.
pub fn load_photos(rl: &mut RaylibHandle, thread: &RaylibThread, paths: &[PathBuf]) -> Vec<Texture2D> {
    let mut textures = Vec::with_capacity(paths.len());
    for path in paths {
        match load_texture_with_exif_rotation(rl, thread, path) {
            Ok(texture) => textures.push(texture),
            Err(e) => warn!("skipping photo: {e:#}"),
        }
    }
    textures
}
