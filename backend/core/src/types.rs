use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::OcrError;

/// Lowercased file extensions the scanner accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp"];

/// Name of the subfolder results are written into.
pub const RESULTS_DIR_NAME: &str = "ocr_results";

/// Longest side, in pixels, of an image sent to the service.
pub const MAX_IMAGE_SIDE: u32 = 1024;

/// JPEG quality used when re-encoding images for transport.
pub const JPEG_QUALITY: u8 = 85;

/// An image discovered in the input folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    path: PathBuf,
}

impl ImageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name as shown to the user.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name without its final extension.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `<stem>.txt`
    pub fn output_file_name(&self) -> String {
        format!("{}.txt", self.stem())
    }
}

/// An image resized, JPEG-encoded, and base64-encoded for inline transport.
#[derive(Debug, Clone)]
pub struct PreparedPayload {
    pub original_width: u32,
    pub original_height: u32,
    pub width: u32,
    pub height: u32,
    /// Standard-alphabet base64 of the JPEG bytes.
    pub base64: String,
}

impl PreparedPayload {
    pub const MIME_TYPE: &'static str = "image/jpeg";

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", Self::MIME_TYPE, self.base64)
    }
}

/// Outcome of running one image through preparation and extraction.
#[derive(Debug)]
pub struct ExtractionResult {
    pub image: ImageFile,
    pub elapsed: Duration,
    pub outcome: Result<String, OcrError>,
}

impl ExtractionResult {
    pub fn new(image: ImageFile, elapsed: Duration, outcome: Result<String, OcrError>) -> Self {
        Self {
            image,
            elapsed,
            outcome,
        }
    }

    /// Extracted text, absent on any failure.
    pub fn text(&self) -> Option<&str> {
        self.outcome.as_deref().ok()
    }

    pub fn error(&self) -> Option<&OcrError> {
        self.outcome.as_ref().err()
    }
}
