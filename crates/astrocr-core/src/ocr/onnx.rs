//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;

use super::{missing_model_files, TextRecognizer};

/// A recognized line with the top-left corner of its box.
struct Line {
    x: f32,
    y: f32,
    text: String,
}

/// Recognizer backed by `pure-onnx-ocr` (no external ONNX Runtime).
pub struct OnnxRecognizer {
    engine: pure_onnx_ocr::engine::OcrEngine,
    keep_unk: bool,
}

impl OnnxRecognizer {
    /// Create a recognizer from model files in a directory.
    pub fn from_dir(model_dir: &Path, keep_unk: bool) -> Result<Self, OcrError> {
        let missing = missing_model_files(model_dir);
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(|p| p.display().to_string()).collect();
            return Err(OcrError::EngineUnavailable(format!(
                "missing model files: {}",
                names.join(", ")
            )));
        }

        let det_path = model_dir.join("det.onnx");
        let rec_path = model_dir.join("latin_rec.onnx");
        let dict_path = model_dir.join("latin_dict.txt");

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::EngineUnavailable(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self { engine, keep_unk })
    }
}

impl TextRecognizer for OnnxRecognizer {
    fn name(&self) -> &str {
        "onnx"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        // The detector expects three channels; preprocessing yields Luma8.
        let rgb = DynamicImage::ImageRgb8(image.to_rgb8());

        let results = self
            .engine
            .run_from_image(&rgb)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let mut lines: Vec<Line> = results
            .iter()
            .map(|r| {
                let (x, y) = polygon_origin(&r.bounding_box);
                let text = if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                Line { x, y, text }
            })
            .collect();

        sort_by_reading_order(&mut lines);

        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            "OCR complete: {} text boxes from {}x{} image in {}ms",
            lines.len(),
            width,
            height,
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

/// Top-to-bottom in 20px rows, then left-to-right.
fn sort_by_reading_order(lines: &mut [Line]) {
    lines.sort_by(|a, b| {
        let row_a = (a.y / 20.0) as i32;
        let row_b = (b.y / 20.0) as i32;
        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
        }
    });
}

/// Smallest x and y over the polygon's exterior points.
fn polygon_origin(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    polygon
        .exterior()
        .coords()
        .fold((f32::INFINITY, f32::INFINITY), |(x, y), c| {
            (x.min(c.x as f32), y.min(c.y as f32))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x: f32, y: f32, text: &str) -> Line {
        Line {
            x,
            y,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_reading_order() {
        let mut lines = vec![
            line(200.0, 45.0, "Leo"),
            line(10.0, 5.0, "Fire"),
            line(10.0, 44.0, "Aries"),
            line(120.0, 3.0, "Signs"),
        ];
        sort_by_reading_order(&mut lines);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["Fire", "Signs", "Aries", "Leo"]);
    }

    #[test]
    fn test_missing_models_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = match OnnxRecognizer::from_dir(dir.path(), false) {
            Ok(_) => panic!("expected missing models"),
            Err(e) => e,
        };
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("det.onnx"));
    }
}
