//! Table classification and parsing.
//!
//! The filename picks the category, the category picks the parser, and the
//! parser turns OCR text into the category's structured record.

pub mod rules;

use tracing::debug;

use crate::models::tables::{Category, TableData};

use rules::{
    CoreNumbersParser, ElementsTrianglesParser, MasterNumbersParser, PlanetaryHoursParser,
    SunriseParser, SystemsParser, TableParser,
};

/// Split OCR text into trimmed, non-empty lines, keeping their order.
pub fn clean_lines(raw_text: &str) -> Vec<&str> {
    raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Run the parser belonging to `category` over cleaned lines.
pub fn parse_category(category: Category, lines: &[&str]) -> TableData {
    match category {
        Category::MasterNumbers => TableData::MasterNumbers(MasterNumbersParser.parse(lines)),
        Category::CoreNumbers => TableData::CoreNumbers(CoreNumbersParser.parse(lines)),
        Category::Systems => TableData::Systems(SystemsParser.parse(lines)),
        Category::Sunrise => TableData::Sunrise(SunriseParser.parse(lines)),
        Category::PlanetaryHours => TableData::PlanetaryHours(PlanetaryHoursParser.parse(lines)),
        Category::ElementsTriangles => {
            TableData::ElementsTriangles(ElementsTrianglesParser.parse(lines))
        }
    }
}

/// Classify an image by filename and parse its OCR text.
///
/// Returns `None` when the filename matches no category; the raw text is
/// then kept by the caller without structured data.
pub fn classify_and_parse(raw_text: &str, filename: &str) -> Option<TableData> {
    let Some(category) = Category::from_filename(filename) else {
        debug!("{} matches no table category", filename);
        return None;
    };

    let lines = clean_lines(raw_text);
    debug!("Parsing {} as {} ({} lines)", filename, category, lines.len());
    Some(parse_category(category, &lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tables::Element;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_lines() {
        let lines = clean_lines("  Fire \n\n\t\nAries\r\n   Leo   \n");
        assert_eq!(lines, vec!["Fire", "Aries", "Leo"]);
    }

    #[test]
    fn test_unclassified_filename() {
        assert_eq!(classify_and_parse("11\nenergy", "scan_0001.png"), None);
    }

    #[test]
    fn test_core_numbers_wins_over_systems() {
        let data = classify_and_parse("life_path\nmeaning: road", "core_numbers_systems.png").unwrap();
        assert_eq!(data.category(), Category::CoreNumbers);
    }

    #[test]
    fn test_every_category_dispatches_to_its_shape() {
        for category in Category::PRIORITY {
            assert_eq!(parse_category(category, &[]).category(), category);
        }
    }

    #[test]
    fn test_elements_from_raw_text() {
        let data = classify_and_parse("Fire\nAries\nLeo\nWater\nCancer", "triangles.jpg").unwrap();
        let TableData::ElementsTriangles(table) = data else {
            panic!("expected elements table");
        };
        assert_eq!(table.signs(Element::Fire), ["Aries", "Leo"]);
        assert_eq!(table.signs(Element::Water), ["Cancer"]);
        assert!(table.signs(Element::Air).is_empty());
        assert!(table.signs(Element::Earth).is_empty());
    }

    #[test]
    fn test_master_numbers_reparse_is_stable() {
        let text = "Master 11\nEnergy: high\nTrait: visionary\n22\nSymbol: architect";
        let first = classify_and_parse(text, "Master_Numbers.png");
        let second = classify_and_parse(text, "Master_Numbers.png");
        assert!(matches!(first, Some(TableData::MasterNumbers(_))));
        assert_eq!(first, second);
    }
}
