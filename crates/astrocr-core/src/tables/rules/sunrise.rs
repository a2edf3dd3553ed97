//! Sunrise table parser.

use crate::models::tables::{SunriseEntry, SunriseTable};

use super::patterns::{CLOCK_TIME, DAY_NUMBER, MONTH_ABBR};
use super::TableParser;

/// Latitude band assumed for every parsed table.
pub const DEFAULT_LATITUDE_BAND: &str = "0_to_10";

pub const SUNRISE_SOURCE: &str = "sunrise_table image";

pub const SUNRISE_NOTES: &str =
    "Times are local exemplars; final runtime uses live API for exact location";

/// Sunrise table parser.
///
/// A line becomes an entry only when it carries a clock time, a month
/// abbreviation and a day number at once.
#[derive(Debug, Default, Clone, Copy)]
pub struct SunriseParser;

impl SunriseParser {
    fn parse_entry(line: &str) -> Option<SunriseEntry> {
        let time = CLOCK_TIME.captures(line)?;
        let month = MONTH_ABBR.captures(line)?;
        let day = DAY_NUMBER.captures(line)?;

        Some(SunriseEntry {
            month: month[1].to_string(),
            day: day[1].parse().ok()?,
            sunrise: format!("{}:{}", &time[1], &time[2]),
        })
    }
}

impl TableParser for SunriseParser {
    type Output = SunriseTable;

    fn parse(&self, lines: &[&str]) -> Self::Output {
        SunriseTable {
            latitude_band: DEFAULT_LATITUDE_BAND.to_string(),
            entries: lines.iter().filter_map(|line| Self::parse_entry(line)).collect(),
            source: SUNRISE_SOURCE.to_string(),
            notes: SUNRISE_NOTES.to_string(),
        }
    }
}

/// Parse a sunrise table from cleaned lines.
pub fn parse_sunrise_table(lines: &[&str]) -> SunriseTable {
    SunriseParser.parse(lines)
}
