//! Markdown reports regenerated on every run.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use tracing::info;

use crate::error::Result;
use crate::models::job::OcrResult;

use super::DataFile;

pub const SOURCES_FILE: &str = "SOURCES.md";
pub const CHANGELOG_FILE: &str = "CHANGELOG_DATA.md";

const NOTES: [&str; 3] = [
    "All data extracted via OCR from uploaded images",
    "Times and calculations are reference values; runtime uses live APIs",
    "Manual review recommended for accuracy validation",
];

fn iso(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Per-image summary with the extracted data embedded as JSON.
pub fn sources_markdown(results: &IndexMap<String, OcrResult>, now: &NaiveDateTime) -> String {
    let mut out = String::new();
    out.push_str("# Data Sources\n\n");
    out.push_str("This document tracks the sources of data used in the Daily Secrets app.\n\n");
    out.push_str("## OCR Extraction Results\n\n");
    let _ = writeln!(out, "**Extraction Date:** {}\n", iso(now));

    for (filename, result) in results {
        let data = result.usable_table_data();

        let _ = writeln!(out, "### {}\n", filename);
        let _ = writeln!(out, "- **Processed:** {}", iso(&result.processed_at));
        let _ = writeln!(
            out,
            "- **Text Length:** {} characters",
            result.raw_text().chars().count()
        );
        let _ = writeln!(
            out,
            "- **Table Data:** {}",
            if data.is_some() { "Yes" } else { "No" }
        );
        if let Some(error) = result.error() {
            let _ = writeln!(out, "- **Error:** {}", error);
        }
        out.push('\n');

        if let Some(data) = data {
            // Serializing a plain data tree into a String cannot fail.
            let json = serde_json::to_string_pretty(data).unwrap_or_default();
            out.push_str("**Extracted Data:**\n");
            out.push_str("```json\n");
            out.push_str(&json);
            out.push_str("\n```\n\n");
        }
    }

    out
}

/// Processed-file checklist plus the fixed list of data files.
pub fn changelog_markdown(results: &IndexMap<String, OcrResult>, now: &NaiveDateTime) -> String {
    let mut out = String::new();
    out.push_str("# Data Changelog\n\n");
    let _ = writeln!(out, "**Update Date:** {}\n", iso(now));
    out.push_str("## Changes Made\n\n");

    if !results.is_empty() {
        out.push_str("### Files Processed\n\n");
        for (filename, result) in results {
            let mark = if result.is_failed() { "❌" } else { "✅" };
            let _ = writeln!(out, "- {} {}", mark, filename);
        }
        out.push('\n');
    }

    out.push_str("### Data Files Updated\n\n");
    for file in DataFile::ALL {
        let _ = writeln!(out, "- `data/{}` - {}", file.relative_path(), file.description());
    }
    out.push('\n');

    out.push_str("### Notes\n\n");
    for note in NOTES {
        let _ = writeln!(out, "- {}", note);
    }
    out.push('\n');

    out
}

/// Overwrite both reports in `docs_dir`.
pub fn write_documentation(
    docs_dir: &Path,
    results: &IndexMap<String, OcrResult>,
    now: &NaiveDateTime,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(docs_dir)?;

    let sources = docs_dir.join(SOURCES_FILE);
    fs::write(&sources, sources_markdown(results, now))?;

    let changelog = docs_dir.join(CHANGELOG_FILE);
    fs::write(&changelog, changelog_markdown(results, now))?;

    info!("Documentation written to {}", docs_dir.display());
    Ok(vec![sources, changelog])
}
