//! JSON writers for audit and data files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::AstrocrConfig;
use crate::models::domain::{AstrologyData, NumerologyData};
use crate::models::job::OcrResult;

use super::DataFile;

/// Create the input, audit, data and docs directories if absent.
pub fn ensure_dirs(config: &AstrocrConfig) -> Result<()> {
    for dir in [
        config.input_dir(),
        config.tmp_dir(),
        config.data_dir(),
        config.docs_dir(),
    ] {
        fs::create_dir_all(&dir)?;
    }
    Ok(())
}

/// Write a value as pretty-printed UTF-8 JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}

/// Write one image's result to `<tmp_dir>/<stem>.json`.
pub fn write_audit(tmp_dir: &Path, stem: &str, result: &OcrResult) -> Result<PathBuf> {
    let path = tmp_dir.join(format!("{}.json", stem));
    write_json(&path, result)?;
    debug!("Audit written to {}", path.display());
    Ok(path)
}

/// Write the non-empty parts of both domain documents.
///
/// The `numerology/` and `astro/` directories are always created; each of
/// the six files is written only when its data is present. Returns the
/// paths written, in [`DataFile::ALL`] order.
pub fn write_domain_documents(
    data_dir: &Path,
    numerology: &NumerologyData,
    astrology: &AstrologyData,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(data_dir.join("numerology"))?;
    fs::create_dir_all(data_dir.join("astro"))?;

    let mut written = Vec::new();

    if !numerology.master_numbers.numbers.is_empty() {
        emit(data_dir, DataFile::MasterNumbers, &numerology.master_numbers, &mut written)?;
    }
    if !numerology.core_numbers.is_empty() {
        emit(data_dir, DataFile::CoreNumbers, &numerology.core_numbers, &mut written)?;
    }
    if !numerology.systems.is_empty() {
        emit(data_dir, DataFile::Systems, &numerology.systems, &mut written)?;
    }
    if let Some(table) = &astrology.sunrise_table {
        emit(data_dir, DataFile::SunriseTable, table, &mut written)?;
    }
    if let Some(table) = &astrology.planetary_hours {
        emit(data_dir, DataFile::PlanetaryHours, table, &mut written)?;
    }
    if let Some(table) = &astrology.elements_triangles {
        emit(data_dir, DataFile::ElementsTriangles, table, &mut written)?;
    }

    Ok(written)
}

fn emit<T: Serialize>(
    data_dir: &Path,
    file: DataFile,
    value: &T,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let path = file.path_in(data_dir);
    write_json(&path, value)?;
    info!("Wrote {}", path.display());
    written.push(path);
    Ok(())
}
