//! Image preparation and text recognition.
//!
//! Two seams keep the pipeline independent of a concrete engine:
//! [`ImageProvider`] turns a file into pixels ready for OCR and
//! [`TextRecognizer`] turns those pixels into text.

mod preprocessing;
mod tesseract;

#[cfg(feature = "onnx")]
mod onnx;

pub use preprocessing::ImagePreprocessor;
pub use tesseract::TesseractRecognizer;

#[cfg(feature = "onnx")]
pub use onnx::OnnxRecognizer;

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::info;

use crate::error::{AstrocrError, OcrError};
use crate::models::config::{AstrocrConfig, OcrBackend};

/// Model files the ONNX backend loads from its model directory.
pub const MODEL_FILES: [&str; 3] = ["det.onnx", "latin_rec.onnx", "latin_dict.txt"];

/// Converts a prepared image into plain text, lines separated by `\n`.
pub trait TextRecognizer {
    /// Short engine name used in logs and reports.
    fn name(&self) -> &str;

    /// Engine version, when the backend reports one.
    fn version(&self) -> Option<&str> {
        None
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// Loads an image file and prepares it for recognition.
pub trait ImageProvider {
    fn prepare(&self, path: &Path) -> Result<DynamicImage, OcrError>;
}

/// Model files absent from `dir`.
pub fn missing_model_files(dir: &Path) -> Vec<PathBuf> {
    MODEL_FILES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| !path.exists())
        .collect()
}

/// Create the recognizer selected by the configuration.
///
/// An engine that cannot start surfaces as
/// [`AstrocrError::DependencyMissing`] so callers can stop before any
/// output is written.
pub fn create_recognizer(config: &AstrocrConfig) -> Result<Box<dyn TextRecognizer>, AstrocrError> {
    let recognizer: Box<dyn TextRecognizer> = match config.ocr.backend {
        OcrBackend::Tesseract => {
            Box::new(TesseractRecognizer::new(&config.ocr).map_err(into_dependency_missing)?)
        }
        OcrBackend::Onnx => create_onnx(config).map_err(into_dependency_missing)?,
    };

    info!("OCR backend: {}", recognizer.name());
    Ok(recognizer)
}

#[cfg(feature = "onnx")]
fn create_onnx(config: &AstrocrConfig) -> Result<Box<dyn TextRecognizer>, OcrError> {
    let recognizer = OnnxRecognizer::from_dir(&config.model_dir(), config.ocr.keep_unk)?;
    Ok(Box::new(recognizer))
}

#[cfg(not(feature = "onnx"))]
fn create_onnx(_config: &AstrocrConfig) -> Result<Box<dyn TextRecognizer>, OcrError> {
    Err(OcrError::EngineUnavailable(
        "built without the `onnx` feature".to_string(),
    ))
}

fn into_dependency_missing(err: OcrError) -> AstrocrError {
    match err {
        OcrError::EngineUnavailable(msg) => AstrocrError::DependencyMissing(msg),
        other => AstrocrError::Ocr(other),
    }
}
