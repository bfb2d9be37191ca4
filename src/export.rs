//! PNG snapshot export.
//!
//! The export is a copy of the rendered pixels, not of the vector strokes.

use crate::config::ExportConfig;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while exporting the canvas.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("drawing surface is not available")]
    SurfaceUnavailable,

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] cairo::IoError),

    #[error("failed to save image: {0}")]
    Save(#[from] std::io::Error),
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
///
/// # Returns
/// Generated filename with the `.png` extension
pub fn generate_filename(template: &str) -> String {
    let now = Local::now();
    format!("{}.png", now.format(template))
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Writes PNG bytes into the configured export directory.
///
/// # Returns
/// Path to the saved file
pub fn save_png(png: &[u8], config: &ExportConfig) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&expand_tilde(&config.save_directory))?;
    let file_path = directory.join(generate_filename(&config.filename_template));
    write_png(png, &file_path)?;
    Ok(file_path)
}

/// Writes PNG bytes to an explicit path, creating parent directories.
pub fn write_png(png: &[u8], path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory_exists(parent)?;
        }
    }

    log::info!("Saving canvas to: {} ({} bytes)", path.display(), png.len());
    fs::write(path, png)?;
    log::debug!("File written: {} bytes", fs::metadata(path)?.len());
    Ok(())
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_filename() {
        let filename = generate_filename("artwork_%Y%m%d");
        assert!(filename.starts_with("artwork_"));
        assert!(filename.ends_with(".png"));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn save_png_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            save_directory: temp.path().join("out").to_string_lossy().into_owned(),
            filename_template: "artwork".to_string(),
        };

        let path = save_png(b"\x89PNG", &config).unwrap();

        assert!(path.ends_with("artwork.png"));
        assert_eq!(fs::read(&path).unwrap(), b"\x89PNG");
    }
}
