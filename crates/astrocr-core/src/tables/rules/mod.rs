//! Rule-based parsers, one per table category.
//!
//! Every parser makes a single pass over the trimmed, non-empty OCR lines,
//! keeping a cursor on the section opened most recently. Lines that match
//! nothing are dropped; no parser ever fails.

pub mod core_numbers;
pub mod elements;
pub mod master_numbers;
pub mod patterns;
pub mod planetary_hours;
pub mod sunrise;
pub mod systems;

pub use core_numbers::{parse_core_numbers, CoreNumbersParser};
pub use elements::{parse_elements_triangles, ElementsTrianglesParser};
pub use master_numbers::{parse_master_numbers, MasterNumbersParser};
pub use planetary_hours::{parse_planetary_hours, PlanetaryHoursParser};
pub use sunrise::{parse_sunrise_table, SunriseParser};
pub use systems::{parse_systems, SystemsParser};

/// Trait for table parsers.
pub trait TableParser {
    /// The record this parser produces.
    type Output;

    /// Parse the cleaned lines of one image.
    fn parse(&self, lines: &[&str]) -> Self::Output;
}

/// Pick the field a line belongs to.
///
/// `routes` is checked in order; the first route with a keyword contained
/// in `line_lower` wins.
pub(crate) fn route<F: Copy>(line_lower: &str, routes: &[(&[&str], F)]) -> Option<F> {
    routes
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| line_lower.contains(k)))
        .map(|(_, field)| *field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Field {
        A,
        B,
    }

    #[test]
    fn test_route_first_match_wins() {
        let routes: [(&[&str], Field); 2] = [
            (&["alpha", "shared"], Field::A),
            (&["beta", "shared"], Field::B),
        ];
        assert_eq!(route("the beta line", &routes), Some(Field::B));
        assert_eq!(route("a shared line", &routes), Some(Field::A));
        assert_eq!(route("nothing here", &routes), None);
    }
}
