//! Common regex patterns for table line classification.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ASCII digit classes only, so every matched run parses as an integer.
    // Master number section header (11, 22, 33, 111, ...)
    pub static ref MASTER_NUMBER: Regex = Regex::new(r"([0-9]{2,3})").unwrap();

    // A whole master number key as the header pattern captures it
    pub static ref MASTER_NUMBER_KEY: Regex = Regex::new(r"^[0-9]{2,3}$").unwrap();

    // Core number section tokens, matched against the lowercased line
    pub static ref CORE_NUMBER_KIND: Regex = Regex::new(
        r"(life_path|expression_destiny|soul_urge|personality|birthday|maturity|current_name)"
    ).unwrap();

    // Numerology system section tokens, matched against the lowercased line
    pub static ref NUMEROLOGY_SYSTEM: Regex = Regex::new(
        r"(pythagorean|chaldean|kabbalah|tamil|chinese|vedic)"
    ).unwrap();

    // Sunrise row components
    pub static ref CLOCK_TIME: Regex = Regex::new(r"([0-9]{1,2}):([0-9]{2})").unwrap();

    pub static ref MONTH_ABBR: Regex = Regex::new(
        r"(?i)(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)"
    ).unwrap();

    pub static ref DAY_NUMBER: Regex = Regex::new(r"([0-9]{1,2})").unwrap();

    // Element section tokens, matched against the lowercased line
    pub static ref ELEMENT: Regex = Regex::new(r"(fire|water|air|earth)").unwrap();

    pub static ref ZODIAC_SIGN: Regex = Regex::new(
        r"(?i)(Aries|Taurus|Gemini|Cancer|Leo|Virgo|Libra|Scorpio|Sagittarius|Capricorn|Aquarius|Pisces)"
    ).unwrap();
}
