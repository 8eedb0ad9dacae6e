//! Avatar preview: what the form displays and how a newly selected image is
//! read into an inline `data:` URL.
//!
//! Reads are asynchronous and may finish out of order. Every selection is
//! tagged with a generation from the controller; a [`LoadedPreview`] is only
//! applied when its generation is still the latest one.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to read image `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An image file chosen by the user, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedImage {
    pub file_name: String,
    pub path: PathBuf,
}

impl SelectedImage {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { file_name, path }
    }
}

/// Source of the avatar currently shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarSource {
    Placeholder(String),
    Stored(String),
    Preview(String),
}

impl AvatarSource {
    pub fn src(&self) -> &str {
        match self {
            AvatarSource::Placeholder(url)
            | AvatarSource::Stored(url)
            | AvatarSource::Preview(url) => url,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, AvatarSource::Placeholder(_))
    }
}

impl fmt::Display for AvatarSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvatarSource::Placeholder(url) => write!(f, "placeholder ({})", url),
            AvatarSource::Stored(url) => write!(f, "stored ({})", url),
            AvatarSource::Preview(url) => {
                let head: String = url.chars().take(32).collect();
                write!(f, "preview ({}…, {} bytes)", head, url.len())
            }
        }
    }
}

/// A pending read issued by `FormController::select_image`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTicket {
    pub generation: u64,
    pub image: SelectedImage,
}

/// A completed read, ready to hand back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPreview {
    pub generation: u64,
    pub data_url: String,
}

/// Reads the selected file and encodes it as a `data:` URL.
pub async fn load_preview(ticket: PreviewTicket) -> Result<LoadedPreview, PreviewError> {
    let PreviewTicket { generation, image } = ticket;
    let bytes = tokio::fs::read(&image.path)
        .await
        .map_err(|source| PreviewError::Read {
            path: image.path.clone(),
            source,
        })?;
    Ok(LoadedPreview {
        generation,
        data_url: encode_data_url(mime_type(&image.path), &bytes),
    })
}

/// MIME type guessed from the file extension.
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
