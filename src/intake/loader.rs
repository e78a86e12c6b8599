/// Image file loader
///
/// This module turns a picked or dropped file into an embeddable
/// data URL. Reading and encoding happen on the blocking pool so the
/// UI stays responsive while large photos are converted.
use image::ImageFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task;

use crate::state::data::{DataUrl, DataUrlError, ImageValue};

/// Extensions offered by the file picker
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff", "ico",
];

/// Where a file came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeSource {
    /// Dropped onto the window
    DragDrop,
    /// Chosen in the native file dialog
    Picker,
}

/// Outcome of the content-type gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Rejected { content_type: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },
    #[error("{path} is empty")]
    Empty { path: String },
    #[error("{path} is not a recognized image")]
    Unrecognized { path: String },
    #[error("Failed to encode image: {0}")]
    Encode(#[from] DataUrlError),
    #[error("Task join error: {0}")]
    Join(String),
}

/// Content type declared by a file's name, empty when unknown
///
/// This mirrors what a browser reports for a dropped file: it is
/// derived from the extension, not from the bytes.
pub fn content_type(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_default()
}

/// Decide whether a file may enter the intake at all
///
/// Dropped files must declare an `image/*` content type. Picked files
/// were already filtered by the chooser and are not checked again.
pub fn admit(path: &Path, source: IntakeSource) -> Admission {
    match source {
        IntakeSource::Picker => Admission::Accepted,
        IntakeSource::DragDrop => {
            let content_type = content_type(path);
            if content_type.starts_with("image/") {
                Admission::Accepted
            } else {
                Admission::Rejected { content_type }
            }
        }
    }
}

/// Load an image file into a previewable value
///
/// # Arguments
/// * `path` - Path to the image file
///
/// # Returns
/// * `Ok(ImageValue)` - The encoded data URL plus its preview handle
/// * `Err(IntakeError)` - The file could not be read or is not an image
pub async fn load_image(path: PathBuf) -> Result<ImageValue, IntakeError> {
    task::spawn_blocking(move || -> Result<ImageValue, IntakeError> {
        let url = encode_file_blocking(&path)?;
        Ok(ImageValue::from_data_url(url)?)
    })
    .await
    .map_err(|e| IntakeError::Join(e.to_string()))?
}

/// Read a file and encode it as `data:<mime>;base64,<payload>`
///
/// The mime type is sniffed from the bytes, so a mislabeled file still
/// gets the right type and a non-image file is refused.
pub fn encode_file_blocking(path: &Path) -> Result<DataUrl, IntakeError> {
    let display = path.display().to_string();

    let bytes = std::fs::read(path).map_err(|e| IntakeError::Read {
        path: display.clone(),
        message: e.to_string(),
    })?;

    if bytes.is_empty() {
        return Err(IntakeError::Empty { path: display });
    }

    let format = image::guess_format(&bytes)
        .map_err(|_| IntakeError::Unrecognized { path: display })?;
    let mime = format.to_mime_type();

    tracing::debug!(path = %path.display(), mime, bytes = bytes.len(), "encoded image file");
    Ok(DataUrl::encode(mime, &bytes))
}
