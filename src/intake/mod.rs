/// Image intake module
///
/// This module handles:
/// - Reading a picked or dropped file
/// - Validating that it is an image (`image/*`)
/// - Producing the encoded bytes and an on-screen preview
///
/// The file picker and drag-and-drop both hand a path to `submit_file`,
/// so the two entry points share one validation path. Intake never talks
/// to the network.

pub mod encode;
pub mod mime;
pub mod preview;

pub use encode::EncodedImage;
pub use preview::Preview;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task;
use tracing::{debug, info};

use crate::state::data::UploadedImage;

/// Why a selected file was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{file_name} is not an image ({mime_type}). Please upload an image file.")]
    InvalidFileType { file_name: String, mime_type: String },

    #[error("Could not read {file_name}: {reason}")]
    Unreadable { file_name: String, reason: String },

    #[error("{file_name} is empty")]
    Empty { file_name: String },

    #[error("{file_name} could not be decoded: {reason}")]
    Undecodable { file_name: String, reason: String },
}

/// Load, validate and encode the file at `path`.
///
/// Decoding the preview is CPU-bound, so it runs on a blocking thread.
pub async fn submit_file(path: PathBuf) -> Result<UploadedImage, ValidationError> {
    let file_name = display_name(&path);

    task::spawn_blocking(move || submit_path(&path))
        .await
        .map_err(|e| ValidationError::Unreadable {
            file_name,
            reason: format!("Task join error: {}", e),
        })?
}

/// Blocking version of `submit_file`
fn submit_path(path: &Path) -> Result<UploadedImage, ValidationError> {
    let file_name = display_name(path);
    debug!("Reading {}", path.display());

    let bytes = std::fs::read(path).map_err(|e| ValidationError::Unreadable {
        file_name: file_name.clone(),
        reason: e.to_string(),
    })?;

    submit_bytes(&file_name, bytes)
}

/// Validate and encode already-loaded file contents.
pub fn submit_bytes(file_name: &str, bytes: Vec<u8>) -> Result<UploadedImage, ValidationError> {
    let mime_type = mime::detect(file_name, &bytes);
    if !mime::is_image(mime_type) {
        return Err(ValidationError::InvalidFileType {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
        });
    }

    if bytes.is_empty() {
        return Err(ValidationError::Empty {
            file_name: file_name.to_string(),
        });
    }

    let preview = preview::generate(&bytes).map_err(|e| ValidationError::Undecodable {
        file_name: file_name.to_string(),
        reason: e.to_string(),
    })?;

    info!(
        "📸 Loaded {} ({}, {} KB, preview {}x{})",
        file_name,
        mime_type,
        bytes.len() / 1024,
        preview.width,
        preview.height
    );

    Ok(UploadedImage {
        file_name: file_name.to_string(),
        encoded: EncodedImage::new(mime_type, bytes),
        preview,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}
