use std::path::Path;

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub fn is_supported_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn image_from_path(path: &Path) -> Result<DynamicImage> {
    if !is_supported_image_path(path) {
        anyhow::bail!(
            "Unsupported image file {}, expected one of: {}",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }
    image::open(path).map_err(|e| anyhow::anyhow!("Failed to load image from {}: {}", path.display(), e))
}

/// Decodes an uploaded PNG or JPEG. Other formats are rejected even when the
/// `image` crate could read them.
pub fn image_from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    let format = image::guess_format(bytes)
        .map_err(|_| anyhow::anyhow!("Unrecognized image data ({} bytes)", bytes.len()))?;

    match format {
        ImageFormat::Png | ImageFormat::Jpeg => {}
        other => anyhow::bail!("Unsupported image format: {:?}, expected PNG or JPEG", other),
    }

    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))
}

/// Accepts plain base64 or a data URL such as `data:image/png;base64,...`.
pub fn decode_base64_payload(data: &str) -> Result<Vec<u8>> {
    let base64_part = match data.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        Some(_) => anyhow::bail!("Invalid base64 format: unexpected ','"),
        None => data,
    };

    STANDARD
        .decode(base64_part.trim())
        .map_err(|e| anyhow::anyhow!("Failed to decode base64 data: {}", e))
}
