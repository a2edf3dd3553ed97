//! Check command - report whether the configured OCR engine can start.

use console::style;

use astrocr_core::ocr::{missing_model_files, MODEL_FILES};
use astrocr_core::{create_recognizer, OcrBackend};

use super::GlobalOpts;

pub fn run(opts: &GlobalOpts) -> anyhow::Result<()> {
    let config = opts.load_config()?;

    println!("{}", style("OCR Engine Status").bold());

    match config.ocr.backend {
        OcrBackend::Tesseract => {
            println!(
                "Backend: {} ({})",
                style("tesseract").cyan().bold(),
                config.ocr.tesseract_bin.display()
            );
            println!(
                "Language: {}, page segmentation mode: {}",
                config.ocr.language, config.ocr.page_segmentation_mode
            );
        }
        OcrBackend::Onnx => {
            let model_dir = config.model_dir();
            println!(
                "Backend: {} ({})",
                style("onnx").cyan().bold(),
                model_dir.display()
            );
            let missing = missing_model_files(&model_dir);
            for name in MODEL_FILES {
                let present = !missing.contains(&model_dir.join(name));
                let mark = if present {
                    style("✓").green()
                } else {
                    style("✗").red()
                };
                println!("  {} {}", mark, name);
            }
        }
    }
    println!();

    match create_recognizer(&config) {
        Ok(recognizer) => {
            let engine = recognizer.version().unwrap_or(recognizer.name());
            println!("{} {} is available", style("✓").green(), engine);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", style("✗").red(), e);
            anyhow::bail!("OCR engine unavailable")
        }
    }
}
