//! Error types for the astrocr-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the astrocr library.
#[derive(Error, Debug)]
pub enum AstrocrError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// The configured OCR engine cannot be used on this machine.
    #[error("OCR dependency missing: {0}")]
    DependencyMissing(String),

    /// The input directory holds no jpg/jpeg/png files.
    #[error("no images found in {}", .0.display())]
    NoInputFound(PathBuf),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to image preparation and text recognition.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The recognition engine is not installed or its models are absent.
    #[error("engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Failed to read or decode an image file.
    #[error("failed to load image: {0}")]
    ImageLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

impl OcrError {
    /// Whether this error means the engine itself is missing, as opposed to
    /// a failure on one particular image.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, OcrError::EngineUnavailable(_))
    }
}

/// Result type for the astrocr library.
pub type Result<T> = std::result::Result<T, AstrocrError>;
