//! Domain documents written as the final JSON artifacts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::tables::{
    CoreNumbersTable, ElementsTrianglesTable, MasterNumber, PlanetaryHoursTable, SunriseTable,
    SystemsTable,
};

/// Master numbers as published in `master_numbers.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterNumbersDocument {
    pub numbers: IndexMap<String, MasterNumber>,
    /// Provenance, e.g. `Extracted from images: master_numbers.png`.
    pub notes: String,
}

/// Numerology reference data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumerologyData {
    pub master_numbers: MasterNumbersDocument,
    pub core_numbers: CoreNumbersTable,
    pub systems: SystemsTable,
}

impl NumerologyData {
    pub fn is_empty(&self) -> bool {
        self.master_numbers.numbers.is_empty()
            && self.core_numbers.is_empty()
            && self.systems.is_empty()
    }
}

/// Astrology reference data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstrologyData {
    pub sunrise_table: Option<SunriseTable>,
    pub planetary_hours: Option<PlanetaryHoursTable>,
    pub elements_triangles: Option<ElementsTrianglesTable>,
}

impl AstrologyData {
    pub fn is_empty(&self) -> bool {
        self.sunrise_table.is_none()
            && self.planetary_hours.is_none()
            && self.elements_triangles.is_none()
    }
}
