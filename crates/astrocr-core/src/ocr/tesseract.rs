//! Tesseract recognizer driving the external `tesseract` executable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use image::{DynamicImage, GenericImageView, ImageFormat};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::TextRecognizer;

/// Recognizer backed by the Tesseract command line tool.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    binary: PathBuf,
    language: String,
    page_segmentation_mode: u8,
    version: String,
}

impl TesseractRecognizer {
    /// Probe the configured executable and create a recognizer.
    ///
    /// Fails with [`OcrError::EngineUnavailable`] when the executable cannot
    /// be run.
    pub fn new(config: &OcrConfig) -> Result<Self, OcrError> {
        let version = probe_version(&config.tesseract_bin)?;
        info!("Using {} ({})", config.tesseract_bin.display(), version);

        Ok(Self {
            binary: config.tesseract_bin.clone(),
            language: config.language.clone(),
            page_segmentation_mode: config.page_segmentation_mode,
            version,
        })
    }

    fn args(&self, input: &Path) -> Vec<OsString> {
        vec![
            input.as_os_str().to_os_string(),
            OsString::from("stdout"),
            OsString::from("--psm"),
            OsString::from(self.page_segmentation_mode.to_string()),
            OsString::from("-l"),
            OsString::from(&self.language),
        ]
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn name(&self) -> &str {
        "tesseract"
    }

    /// First line of `tesseract --version`.
    fn version(&self) -> Option<&str> {
        Some(&self.version)
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        // Tesseract reads from a file, so stage the preprocessed pixels as PNG.
        let staged = tempfile::Builder::new()
            .prefix("astrocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Recognition(format!("failed to create temp file: {}", e)))?;

        image
            .save_with_format(staged.path(), ImageFormat::Png)
            .map_err(|e| OcrError::Recognition(format!("failed to stage image: {}", e)))?;

        let output = Command::new(&self.binary)
            .args(self.args(staged.path()))
            .output()
            .map_err(|e| {
                OcrError::Recognition(format!(
                    "failed to execute {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();

        debug!(
            "Recognized {} characters from {}x{} image in {}ms",
            text.chars().count(),
            width,
            height,
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

fn probe_version(binary: &Path) -> Result<String, OcrError> {
    let output = Command::new(binary).arg("--version").output().map_err(|e| {
        OcrError::EngineUnavailable(format!("failed to execute {}: {}", binary.display(), e))
    })?;

    if !output.status.success() {
        return Err(OcrError::EngineUnavailable(format!(
            "{} --version exited with {}",
            binary.display(),
            output.status
        )));
    }

    // Older releases print the banner on stderr.
    let banner = if output.stdout.is_empty() {
        output.stderr
    } else {
        output.stdout
    };

    Ok(String::from_utf8_lossy(&banner)
        .lines()
        .next()
        .unwrap_or("tesseract")
        .trim()
        .to_string())
}
