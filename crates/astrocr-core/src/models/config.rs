//! Configuration structures for the extraction pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Main configuration for an astrocr run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AstrocrConfig {
    /// Project directory layout.
    pub paths: PathConfig,

    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// Image preprocessing configuration.
    pub preprocessing: PreprocessConfig,
}

/// Project directory layout. Relative paths resolve against `root`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Project root.
    pub root: PathBuf,

    /// Directory scanned for source images.
    pub input_dir: PathBuf,

    /// Directory receiving one audit file per processed image.
    pub tmp_dir: PathBuf,

    /// Directory receiving the numerology/astro JSON tables.
    pub data_dir: PathBuf,

    /// Directory receiving the Markdown reports.
    pub docs_dir: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            input_dir: PathBuf::from("inputs/images"),
            tmp_dir: PathBuf::from("tmp/ocr"),
            data_dir: PathBuf::from("data"),
            docs_dir: PathBuf::from("docs"),
        }
    }
}

impl PathConfig {
    /// Resolve a configured directory against the project root.
    pub fn resolve(&self, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.root.join(dir)
        }
    }
}

/// Which recognition engine to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrBackend {
    /// External `tesseract` executable.
    #[default]
    Tesseract,
    /// In-process `pure-onnx-ocr` with PaddleOCR models.
    Onnx,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Recognition engine.
    pub backend: OcrBackend,

    /// Tesseract executable name or path.
    pub tesseract_bin: PathBuf,

    /// Tesseract language pack.
    pub language: String,

    /// Tesseract page segmentation mode (6 = single uniform block of text).
    pub page_segmentation_mode: u8,

    /// Directory holding `det.onnx`, `latin_rec.onnx` and `latin_dict.txt`.
    pub model_dir: PathBuf,

    /// Keep `[UNK]` tokens emitted by the ONNX recognizer.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: OcrBackend::Tesseract,
            tesseract_bin: PathBuf::from("tesseract"),
            language: "eng".to_string(),
            page_segmentation_mode: 6,
            model_dir: PathBuf::from("models"),
            keep_unk: false,
        }
    }
}

/// Image preprocessing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Run grayscale/denoise/binarize before recognition.
    pub enabled: bool,

    /// Images larger than this on either side are downscaled.
    pub max_dimension: u32,

    /// Median filter radius used for denoising (0 disables denoising).
    pub denoise_radius: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_dimension: 2000,
            denoise_radius: 1,
        }
    }
}

impl AstrocrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Replace the project root, keeping the relative layout.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.paths.root = root.into();
        self
    }

    /// Absolute (or root-relative) input directory.
    pub fn input_dir(&self) -> PathBuf {
        self.paths.resolve(&self.paths.input_dir)
    }

    /// Absolute (or root-relative) audit directory.
    pub fn tmp_dir(&self) -> PathBuf {
        self.paths.resolve(&self.paths.tmp_dir)
    }

    /// Absolute (or root-relative) data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.paths.resolve(&self.paths.data_dir)
    }

    /// Absolute (or root-relative) docs directory.
    pub fn docs_dir(&self) -> PathBuf {
        self.paths.resolve(&self.paths.docs_dir)
    }

    /// Model directory for the ONNX backend, resolved against the root.
    pub fn model_dir(&self) -> PathBuf {
        self.paths.resolve(&self.ocr.model_dir)
    }
}
