/// Saving the generated try-on to disk
///
/// Everything here is local: the result is already in memory as a
/// data URL, so saving is a decode plus a file write.
use image::ImageFormat;
use rfd::FileDialog;
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;
use tokio::task;

use crate::state::data::{DataUrl, DataUrlError};

/// File name offered by the save dialog
pub const DOWNLOAD_FILE_NAME: &str = "virtual-tryon.png";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("Result image is corrupt: {0}")]
    Decode(#[from] DataUrlError),
    #[error("Failed to convert result to PNG: {0}")]
    Convert(String),
    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
    #[error("Task join error: {0}")]
    Join(String),
}

/// Ask the user where to save, starting in their downloads folder
///
/// Returns `None` if the dialog was dismissed.
pub fn choose_destination() -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Virtual Try-On")
        .set_file_name(DOWNLOAD_FILE_NAME)
        .add_filter("PNG image", &["png"]);

    if let Some(dir) = dirs::download_dir() {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}

/// Bytes of the result as a PNG file
///
/// PNG payloads are passed through untouched, anything else is
/// decoded and re-encoded.
pub fn to_png(url: &DataUrl) -> Result<Vec<u8>, DownloadError> {
    let bytes = url.decode()?;

    if url.mime() == "image/png" {
        return Ok(bytes);
    }

    let img = image::load_from_memory(&bytes).map_err(|e| DownloadError::Convert(e.to_string()))?;
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| DownloadError::Convert(e.to_string()))?;

    tracing::debug!(from = url.mime(), bytes = png.len(), "re-encoded result as PNG");
    Ok(png)
}

/// Write the result to `path` as PNG
pub async fn save_png(url: DataUrl, path: PathBuf) -> Result<PathBuf, DownloadError> {
    let png = task::spawn_blocking(move || to_png(&url))
        .await
        .map_err(|e| DownloadError::Join(e.to_string()))??;

    tokio::fs::write(&path, &png)
        .await
        .map_err(|e| DownloadError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    tracing::info!(path = %path.display(), bytes = png.len(), "saved try-on result");
    Ok(path)
}
