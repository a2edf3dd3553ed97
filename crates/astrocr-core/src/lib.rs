//! Core library for numerology and astrology table OCR.
//!
//! This crate provides:
//! - Image preprocessing (downscale, grayscale, denoise, Otsu binarization)
//! - Text recognition via Tesseract or `pure-onnx-ocr`
//! - Filename-based table classification and line-oriented table parsers
//! - Aggregation into numerology and astrology documents
//! - JSON data files, audit files and Markdown reports
//! - The batch pipeline tying these together

pub mod aggregate;
pub mod error;
pub mod models;
pub mod ocr;
pub mod output;
pub mod pipeline;
pub mod tables;

pub use aggregate::{aggregate, DomainAggregator};
pub use error::{AstrocrError, OcrError, Result};
pub use models::config::{AstrocrConfig, OcrBackend, OcrConfig, PathConfig, PreprocessConfig};
pub use models::domain::{AstrologyData, MasterNumbersDocument, NumerologyData};
pub use models::job::{ImageJob, OcrOutcome, OcrResult};
pub use models::tables::{Category, TableData};
pub use ocr::{
    create_recognizer, ImagePreprocessor, ImageProvider, TesseractRecognizer, TextRecognizer,
};
#[cfg(feature = "onnx")]
pub use ocr::OnnxRecognizer;
pub use output::{validate_outputs, DataFile, ValidationReport, ValidationStatus};
pub use pipeline::{execute, run, Pipeline, RunContext, RunObserver, RunState, RunSummary};
pub use tables::classify_and_parse;
