use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::ColorImage;

/// Write a captured viewport image to disk; the format follows the
/// extension.
pub fn save_snapshot(path: &Path, shot: &ColorImage) -> Result<()> {
    let [width, height] = shot.size;
    let bytes: Vec<u8> = shot.pixels.iter().flat_map(|c| c.to_array()).collect();
    let buffer = image::RgbaImage::from_raw(width as u32, height as u32, bytes)
        .context("snapshot buffer does not match its size")?;
    buffer
        .save(path)
        .with_context(|| format!("writing snapshot {}", path.display()))?;
    Ok(())
}
