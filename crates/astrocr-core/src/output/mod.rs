//! Everything a run leaves on disk: audit files, data files, reports.

mod docs;
mod validate;
mod writer;

pub use docs::{
    changelog_markdown, sources_markdown, write_documentation, CHANGELOG_FILE, SOURCES_FILE,
};
pub use validate::{validate_file, validate_outputs, ValidationReport, ValidationStatus};
pub use writer::{ensure_dirs, write_audit, write_domain_documents, write_json};

use std::fmt;
use std::path::{Path, PathBuf};

/// The six data files a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFile {
    MasterNumbers,
    CoreNumbers,
    Systems,
    SunriseTable,
    PlanetaryHours,
    ElementsTriangles,
}

impl DataFile {
    pub const ALL: [DataFile; 6] = [
        DataFile::MasterNumbers,
        DataFile::CoreNumbers,
        DataFile::Systems,
        DataFile::SunriseTable,
        DataFile::PlanetaryHours,
        DataFile::ElementsTriangles,
    ];

    /// Path relative to the data directory.
    pub fn relative_path(&self) -> &'static str {
        match self {
            DataFile::MasterNumbers => "numerology/master_numbers.json",
            DataFile::CoreNumbers => "numerology/core_numbers.json",
            DataFile::Systems => "numerology/systems.json",
            DataFile::SunriseTable => "astro/sunrise_table.json",
            DataFile::PlanetaryHours => "astro/planetary_hours.json",
            DataFile::ElementsTriangles => "astro/elements_triangles.json",
        }
    }

    pub fn path_in(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.relative_path())
    }

    /// One-line description used in the data changelog.
    pub fn description(&self) -> &'static str {
        match self {
            DataFile::MasterNumbers => "Master numbers (11, 22, 33, 44, 55)",
            DataFile::CoreNumbers => "Core numerology calculations",
            DataFile::Systems => "Numerology systems (Pythagorean, Chaldean, etc.)",
            DataFile::SunriseTable => "Sunrise times by latitude",
            DataFile::PlanetaryHours => "Planetary hour sequences",
            DataFile::ElementsTriangles => "Zodiac elements and triangles",
        }
    }
}

impl fmt::Display for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.relative_path())
    }
}
