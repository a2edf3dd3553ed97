//! Re-reading written data files against their typed schemas.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::domain::MasterNumbersDocument;
use crate::models::tables::{
    CoreNumbersTable, ElementsTrianglesTable, PlanetaryHoursTable, SunriseTable, SystemsTable,
};

use crate::tables::rules::patterns::MASTER_NUMBER_KEY;

use super::DataFile;

/// Outcome of validating one data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationStatus {
    Valid,
    Missing,
    Invalid(String),
}

impl ValidationStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Valid => f.write_str("valid"),
            ValidationStatus::Missing => f.write_str("missing"),
            ValidationStatus::Invalid(reason) => write!(f, "invalid: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub file: DataFile,
    pub path: PathBuf,
    pub status: ValidationStatus,
}

/// Validate one data file under `data_dir`.
pub fn validate_file(data_dir: &Path, file: DataFile) -> ValidationReport {
    let path = file.path_in(data_dir);
    let status = match fs::read_to_string(&path) {
        Ok(content) => check(file, &content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => ValidationStatus::Missing,
        Err(e) => ValidationStatus::Invalid(e.to_string()),
    };

    match &status {
        ValidationStatus::Valid => debug!("{} is valid", path.display()),
        ValidationStatus::Missing => debug!("{} not present", path.display()),
        ValidationStatus::Invalid(reason) => warn!("{} is invalid: {}", path.display(), reason),
    }

    ValidationReport { file, path, status }
}

/// Validate all six data files. Never fails; problems are in the reports.
pub fn validate_outputs(data_dir: &Path) -> Vec<ValidationReport> {
    DataFile::ALL
        .into_iter()
        .map(|file| validate_file(data_dir, file))
        .collect()
}

fn check(file: DataFile, content: &str) -> ValidationStatus {
    let result = match file {
        DataFile::MasterNumbers => parse::<MasterNumbersDocument>(content).and_then(|doc| {
            match doc.numbers.keys().find(|k| !MASTER_NUMBER_KEY.is_match(k)) {
                Some(key) => Err(format!("'{}' is not a 2-3 digit number", key)),
                None => Ok(()),
            }
        }),
        DataFile::CoreNumbers => parse::<CoreNumbersTable>(content).map(drop),
        DataFile::Systems => parse::<SystemsTable>(content).map(drop),
        DataFile::SunriseTable => parse::<SunriseTable>(content).map(drop),
        DataFile::PlanetaryHours => parse::<PlanetaryHoursTable>(content).and_then(|table| {
            match table.daily_tables.iter().find(|(_, hours)| hours.len() != 24) {
                Some((day, hours)) => Err(format!("{:?} has {} hours", day, hours.len())),
                None => Ok(()),
            }
        }),
        DataFile::ElementsTriangles => parse::<ElementsTrianglesTable>(content).map(drop),
    };

    match result {
        Ok(()) => ValidationStatus::Valid,
        Err(reason) => ValidationStatus::Invalid(reason),
    }
}

fn parse<T: DeserializeOwned>(content: &str) -> Result<T, String> {
    serde_json::from_str(content).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{AstrologyData, NumerologyData};
    use crate::output::{write_domain_documents, write_json};
    use crate::tables::rules::{
        parse_elements_triangles, parse_master_numbers, parse_planetary_hours,
    };
    use pretty_assertions::assert_eq;

    fn write(dir: &Path, file: DataFile, content: &str) {
        let path = file.path_in(dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let reports = validate_outputs(dir.path());

        assert_eq!(reports.len(), 6);
        assert!(reports.iter().all(|r| r.status == ValidationStatus::Missing));
    }

    #[test]
    fn test_written_tables_validate() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("astro")).unwrap();
        write_json(
            &DataFile::PlanetaryHours.path_in(dir.path()),
            &parse_planetary_hours(&[]),
        )
        .unwrap();
        write_json(
            &DataFile::ElementsTriangles.path_in(dir.path()),
            &parse_elements_triangles(&["Air", "Gemini"]),
        )
        .unwrap();

        assert!(validate_file(dir.path(), DataFile::PlanetaryHours).status.is_valid());
        assert!(validate_file(dir.path(), DataFile::ElementsTriangles).status.is_valid());
    }

    #[test]
    fn test_master_number_keys_must_be_numeric() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            DataFile::MasterNumbers,
            r#"{"numbers": {"eleven": {"energy": "", "symbolism": "", "traits": []}}, "notes": ""}"#,
        );

        let report = validate_file(dir.path(), DataFile::MasterNumbers);
        assert!(matches!(report.status, ValidationStatus::Invalid(ref r) if r.contains("eleven")));
    }

    #[test]
    fn test_parsed_master_numbers_validate() {
        let dir = tempfile::tempdir().unwrap();
        let numerology = NumerologyData {
            master_numbers: MasterNumbersDocument {
                numbers: parse_master_numbers(&[
                    "Master ١١",
                    "Energy: high",
                    "Master 22",
                    "Energy: builder",
                    "１１１",
                ])
                .numbers,
                notes: "Extracted from images: master_numbers.png".to_string(),
            },
            ..Default::default()
        };
        write_domain_documents(dir.path(), &numerology, &AstrologyData::default()).unwrap();

        let report = validate_file(dir.path(), DataFile::MasterNumbers);
        assert_eq!(report.status, ValidationStatus::Valid);

        let content = fs::read_to_string(&report.path).unwrap();
        let doc: MasterNumbersDocument = serde_json::from_str(&content).unwrap();
        assert_eq!(doc.numbers.keys().collect::<Vec<_>>(), vec!["22"]);
    }

    #[test]
    fn test_wrong_shape_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), DataFile::SunriseTable, r#"{"entries": "none"}"#);
        write(dir.path(), DataFile::Systems, r#"{"klingon": {}}"#);

        assert!(!validate_file(dir.path(), DataFile::SunriseTable).status.is_valid());
        assert!(!validate_file(dir.path(), DataFile::Systems).status.is_valid());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ValidationStatus::Valid.to_string(), "valid");
        assert_eq!(
            ValidationStatus::Invalid("bad".to_string()).to_string(),
            "invalid: bad"
        );
    }
}
