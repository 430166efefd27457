//! Loading files and live frames into blobs for upload.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use showcase_core::Blob;
use showcase_logging::showcase_warn;

/// Supplies the current frame when the live countdown asks for one.
pub trait FrameSource: Send {
    /// `None` when no frame is available right now.
    fn grab(&mut self) -> Option<Blob>;
}

/// Re-reads an image file on every grab, so an external camera tool can keep
/// overwriting it.
pub struct FileFrameSource {
    path: Option<PathBuf>,
}

impl FileFrameSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl FrameSource for FileFrameSource {
    fn grab(&mut self) -> Option<Blob> {
        let path = self.path.as_deref()?;
        match load_blob(path) {
            Ok(blob) if !blob.is_empty() => Some(blob),
            Ok(_) => None,
            Err(err) => {
                showcase_warn!("Could not read live frame {}: {}", path.display(), err);
                None
            }
        }
    }
}

pub fn load_blob(path: &Path) -> io::Result<Blob> {
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let blob = Blob::new(file_name, bytes);
    Ok(match content_type_for(path) {
        Some(content_type) => blob.with_content_type(content_type),
        None => blob,
    })
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => return None,
    };
    Some(content_type)
}
