//! Per-image work items and their recognition results.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use super::tables::{Category, TableData};

/// An image discovered in the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub path: PathBuf,
    pub filename: String,
    pub category: Option<Category>,
}

impl ImageJob {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let category = Category::from_filename(&filename);
        Self {
            path,
            filename,
            category,
        }
    }

    /// File stem, used to name the audit file.
    pub fn stem(&self) -> String {
        Path::new(&self.filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.filename.clone())
    }
}

/// What recognition produced for one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OcrOutcome {
    Recognized {
        raw_text: String,
        table_data: Option<TableData>,
    },
    Failed {
        error: String,
    },
}

/// Result for one image, written verbatim to `tmp/ocr/<stem>.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrResult {
    pub filename: String,
    #[serde(flatten)]
    pub outcome: OcrOutcome,
    pub processed_at: NaiveDateTime,
}

impl OcrResult {
    pub fn recognized(
        filename: impl Into<String>,
        raw_text: impl Into<String>,
        table_data: Option<TableData>,
    ) -> Self {
        Self {
            filename: filename.into(),
            outcome: OcrOutcome::Recognized {
                raw_text: raw_text.into(),
                table_data,
            },
            processed_at: Local::now().naive_local(),
        }
    }

    pub fn failed(filename: impl Into<String>, error: impl ToString) -> Self {
        Self {
            filename: filename.into(),
            outcome: OcrOutcome::Failed {
                error: error.to_string(),
            },
            processed_at: Local::now().naive_local(),
        }
    }

    /// Recognized text; empty for failed images.
    pub fn raw_text(&self) -> &str {
        match &self.outcome {
            OcrOutcome::Recognized { raw_text, .. } => raw_text,
            OcrOutcome::Failed { .. } => "",
        }
    }

    pub fn table_data(&self) -> Option<&TableData> {
        match &self.outcome {
            OcrOutcome::Recognized { table_data, .. } => table_data.as_ref(),
            OcrOutcome::Failed { .. } => None,
        }
    }

    /// Table data that should contribute to the domain documents.
    pub fn usable_table_data(&self) -> Option<&TableData> {
        self.table_data().filter(|data| !data.is_empty())
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            OcrOutcome::Failed { error } => Some(error),
            OcrOutcome::Recognized { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tables::CoreNumbersTable;

    #[test]
    fn test_job_infers_category_and_stem() {
        let job = ImageJob::new("/in/Planetary_Hours.scan.png");
        assert_eq!(job.filename, "Planetary_Hours.scan.png");
        assert_eq!(job.stem(), "Planetary_Hours.scan");
        assert_eq!(job.category, Some(Category::PlanetaryHours));

        assert_eq!(ImageJob::new("/in/cat.jpg").category, None);
    }

    #[test]
    fn test_recognized_serializes_flat() {
        let result = OcrResult::recognized("x.png", "hello", None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["filename"], "x.png");
        assert_eq!(json["raw_text"], "hello");
        assert!(json["table_data"].is_null());
        assert!(json.get("error").is_none());
        assert!(json["processed_at"].is_string());
    }

    #[test]
    fn test_failed_serializes_error_only() {
        let result = OcrResult::failed("x.png", "boom");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], "boom");
        assert!(json.get("raw_text").is_none());
        assert!(json.get("table_data").is_none());
        assert_eq!(result.raw_text(), "");
        assert!(result.is_failed());
    }

    #[test]
    fn test_empty_table_data_is_not_usable() {
        let result = OcrResult::recognized(
            "core_numbers.png",
            "",
            Some(TableData::CoreNumbers(CoreNumbersTable::new())),
        );
        assert!(result.table_data().is_some());
        assert!(result.usable_table_data().is_none());
    }
}
