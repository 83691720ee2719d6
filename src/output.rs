//! File output for generated images.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbaImage;
use log::info;

/// Create `dir` and its parents if missing
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating directory {}", dir.display()))
}

/// Encode `img` as `<dir>/<name>.png`, creating `dir` first
pub fn save_png(img: &RgbaImage, dir: &Path, name: &str) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(format!("{name}.png"));
    img.save(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Generated: {}", path.display());
    Ok(path)
}
