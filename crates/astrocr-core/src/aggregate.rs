//! Folding per-image records into the numerology and astrology documents.

use tracing::{debug, warn};

use crate::models::domain::{AstrologyData, MasterNumbersDocument, NumerologyData};
use crate::models::job::OcrResult;
use crate::models::tables::{Category, TableData};

/// Accumulates the two domain documents over a run.
///
/// Each sub-document is replaced, never merged: when two images map to the
/// same category, the one absorbed last wins.
#[derive(Debug, Default)]
pub struct DomainAggregator {
    numerology: NumerologyData,
    astrology: AstrologyData,
}

impl DomainAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one result in. Returns whether it contributed.
    pub fn absorb(&mut self, result: &OcrResult) -> bool {
        let Some(data) = result.usable_table_data() else {
            return false;
        };

        let Some(category) = Category::from_filename(&result.filename) else {
            return false;
        };

        if category != data.category() {
            warn!(
                "{} classifies as {} but carries {} data, skipping",
                result.filename,
                category,
                data.category()
            );
            return false;
        }

        debug!("{} -> {}", result.filename, category);

        match data.clone() {
            TableData::MasterNumbers(table) => {
                self.numerology.master_numbers = MasterNumbersDocument {
                    numbers: table.numbers,
                    notes: format!("Extracted from images: {}", result.filename),
                };
            }
            TableData::CoreNumbers(table) => self.numerology.core_numbers = table,
            TableData::Systems(table) => self.numerology.systems = table,
            TableData::Sunrise(table) => self.astrology.sunrise_table = Some(table),
            TableData::PlanetaryHours(table) => self.astrology.planetary_hours = Some(table),
            TableData::ElementsTriangles(table) => {
                self.astrology.elements_triangles = Some(table)
            }
        }

        true
    }

    pub fn finish(self) -> (NumerologyData, AstrologyData) {
        (self.numerology, self.astrology)
    }
}

/// Aggregate results in the given order.
pub fn aggregate<'a, I>(results: I) -> (NumerologyData, AstrologyData)
where
    I: IntoIterator<Item = &'a OcrResult>,
{
    let mut aggregator = DomainAggregator::new();
    for result in results {
        aggregator.absorb(result);
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tables::NumerologySystem;
    use crate::tables::classify_and_parse;
    use pretty_assertions::assert_eq;

    fn parsed(filename: &str, text: &str) -> OcrResult {
        OcrResult::recognized(filename, text, classify_and_parse(text, filename))
    }

    #[test]
    fn test_master_numbers_notes_name_the_image() {
        let (numerology, astrology) =
            aggregate([&parsed("master_numbers.png", "11\nEnergy: intuition")]);

        assert_eq!(
            numerology.master_numbers.notes,
            "Extracted from images: master_numbers.png"
        );
        assert_eq!(
            numerology.master_numbers.numbers["11"].energy,
            "Energy: intuition"
        );
        assert!(astrology.is_empty());
    }

    #[test]
    fn test_second_systems_image_wins() {
        let first = parsed("systems_a.png", "pythagorean\nDescription: western");
        let second = parsed("systems_b.png", "chaldean\nDescription: babylonian");

        let (numerology, _) = aggregate([&first, &second]);

        assert_eq!(numerology.systems.len(), 1);
        assert!(numerology.systems.contains_key(&NumerologySystem::Chaldean));
        assert!(!numerology.systems.contains_key(&NumerologySystem::Pythagorean));
    }

    #[test]
    fn test_empty_and_failed_results_do_not_contribute() {
        let empty_systems = parsed("systems.png", "nothing useful here");
        let failed = OcrResult::failed("sunrise.png", "decode error");
        let unclassified = parsed("scan_01.png", "Fire\nAries");

        let mut aggregator = DomainAggregator::new();
        assert!(!aggregator.absorb(&empty_systems));
        assert!(!aggregator.absorb(&failed));
        assert!(!aggregator.absorb(&unclassified));

        let (numerology, astrology) = aggregator.finish();
        assert!(numerology.is_empty());
        assert!(astrology.is_empty());
    }

    #[test]
    fn test_astrology_fields_are_filled() {
        let sunrise = parsed("Sunrise_Table.jpg", "Jan 1 07:10");
        let hours = parsed("planetary_hours.png", "");
        let elements = parsed("zodiac_triangles.png", "Fire\nAries");

        let (_, astrology) = aggregate([&sunrise, &hours, &elements]);

        assert_eq!(astrology.sunrise_table.unwrap().entries.len(), 1);
        assert!(astrology.planetary_hours.is_some());
        assert_eq!(astrology.elements_triangles.unwrap().fire, vec!["Aries"]);
    }
}
