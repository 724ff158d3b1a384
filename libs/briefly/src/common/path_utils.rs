use std::path::Path;

use anyhow::Result;

use super::InputType;

pub fn default_summary_file_name(input_type: InputType) -> &'static str {
    match input_type {
        InputType::Text => "summary.txt",
        InputType::Image => "image_summary.txt",
    }
}

/// Writes the summary as plain UTF-8 text, creating parent directories as needed.
pub fn save_summary(path: &Path, summary: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", parent.display(), e))?;
        }
    }

    std::fs::write(path, summary)
        .map_err(|e| anyhow::anyhow!("Failed to write summary to {}: {}", path.display(), e))?;
    log::info!("Saved summary to {}", path.display());
    Ok(())
}
