//! Table categories and the structured record produced for each one.
//!
//! A record's shape is fixed by its [`Category`]; the six record types
//! below never share fields.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One of the six recognized table schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    MasterNumbers,
    CoreNumbers,
    Systems,
    Sunrise,
    PlanetaryHours,
    ElementsTriangles,
}

impl Category {
    /// Filename classification order. The first category whose needle
    /// occurs in the filename wins.
    pub const PRIORITY: [Category; 6] = [
        Category::MasterNumbers,
        Category::CoreNumbers,
        Category::Systems,
        Category::Sunrise,
        Category::PlanetaryHours,
        Category::ElementsTriangles,
    ];

    /// Filename substrings selecting this category.
    pub fn needles(&self) -> &'static [&'static str] {
        match self {
            Category::MasterNumbers => &["master_numbers"],
            Category::CoreNumbers => &["core_numbers"],
            Category::Systems => &["systems"],
            Category::Sunrise => &["sunrise"],
            Category::PlanetaryHours => &["planetary_hours"],
            Category::ElementsTriangles => &["elements", "triangles"],
        }
    }

    /// Infer the category from a filename (case-insensitive substring match).
    pub fn from_filename(filename: &str) -> Option<Category> {
        let lower = filename.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|category| category.needles().iter().any(|n| lower.contains(n)))
    }

    /// Snake-case name, as used in filenames and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MasterNumbers => "master_numbers",
            Category::CoreNumbers => "core_numbers",
            Category::Systems => "systems",
            Category::Sunrise => "sunrise",
            Category::PlanetaryHours => "planetary_hours",
            Category::ElementsTriangles => "elements_triangles",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A master number (11, 22, 33, ...) entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterNumber {
    /// Last line mentioning energy or vibration.
    pub energy: String,
    /// Last line mentioning symbolism or meaning.
    pub symbolism: String,
    /// Every line mentioning a trait or characteristic, in order.
    pub traits: Vec<String>,
}

/// Parsed master numbers table, keyed by the number as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterNumbersTable {
    pub numbers: IndexMap<String, MasterNumber>,
}

/// Core numerology number types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreNumberKind {
    LifePath,
    ExpressionDestiny,
    SoulUrge,
    Personality,
    Birthday,
    Maturity,
    CurrentName,
}

impl CoreNumberKind {
    pub const ALL: [CoreNumberKind; 7] = [
        CoreNumberKind::LifePath,
        CoreNumberKind::ExpressionDestiny,
        CoreNumberKind::SoulUrge,
        CoreNumberKind::Personality,
        CoreNumberKind::Birthday,
        CoreNumberKind::Maturity,
        CoreNumberKind::CurrentName,
    ];

    /// Token that opens this section in OCR text.
    pub fn token(&self) -> &'static str {
        match self {
            CoreNumberKind::LifePath => "life_path",
            CoreNumberKind::ExpressionDestiny => "expression_destiny",
            CoreNumberKind::SoulUrge => "soul_urge",
            CoreNumberKind::Personality => "personality",
            CoreNumberKind::Birthday => "birthday",
            CoreNumberKind::Maturity => "maturity",
            CoreNumberKind::CurrentName => "current_name",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }
}

/// A core number definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreNumber {
    pub definition: String,
    pub calc: String,
}

/// Parsed core numbers table.
pub type CoreNumbersTable = IndexMap<CoreNumberKind, CoreNumber>;

/// Numerology systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumerologySystem {
    Pythagorean,
    Chaldean,
    Kabbalah,
    Tamil,
    Chinese,
    Vedic,
}

impl NumerologySystem {
    pub const ALL: [NumerologySystem; 6] = [
        NumerologySystem::Pythagorean,
        NumerologySystem::Chaldean,
        NumerologySystem::Kabbalah,
        NumerologySystem::Tamil,
        NumerologySystem::Chinese,
        NumerologySystem::Vedic,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            NumerologySystem::Pythagorean => "pythagorean",
            NumerologySystem::Chaldean => "chaldean",
            NumerologySystem::Kabbalah => "kabbalah",
            NumerologySystem::Tamil => "tamil",
            NumerologySystem::Chinese => "chinese",
            NumerologySystem::Vedic => "vedic",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|system| system.token() == token)
    }
}

/// Description of one numerology system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemEntry {
    pub desc: String,
    pub alphabet_rule: String,
    pub notes: String,
}

/// Parsed numerology systems table.
pub type SystemsTable = IndexMap<NumerologySystem, SystemEntry>;

/// One row of the sunrise table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunriseEntry {
    /// Three-letter month as it appeared in the text.
    pub month: String,
    pub day: u32,
    /// `H:MM` or `HH:MM`.
    pub sunrise: String,
}

/// Parsed sunrise table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunriseTable {
    pub latitude_band: String,
    pub entries: Vec<SunriseEntry>,
    pub source: String,
    pub notes: String,
}

/// A planetary hour ruler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Venus,
    Mercury,
    Moon,
    Saturn,
    Jupiter,
    Mars,
}

/// Day of the week, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];
}

/// Planetary hours table: ruler order plus 24 hourly rulers per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetaryHoursTable {
    pub rulers_sequence: Vec<Planet>,
    pub daily_tables: IndexMap<Weekday, Vec<Planet>>,
    pub notes: String,
}

/// Classical elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Air,
    Earth,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Air, Element::Earth];

    pub fn token(&self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Air => "air",
            Element::Earth => "earth",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|element| element.token() == token)
    }
}

/// Date ranges of the house triangles, one list per element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseTriangleMapping {
    pub fire_house_ranges: Vec<String>,
    pub water_house_ranges: Vec<String>,
    pub air_house_ranges: Vec<String>,
    pub earth_house_ranges: Vec<String>,
}

/// Parsed zodiac elements/triangles table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementsTrianglesTable {
    pub fire: Vec<String>,
    pub water: Vec<String>,
    pub air: Vec<String>,
    pub earth: Vec<String>,
    pub house_triangle_mapping: HouseTriangleMapping,
    pub source: String,
}

impl ElementsTrianglesTable {
    /// Sign list for an element.
    pub fn signs(&self, element: Element) -> &[String] {
        match element {
            Element::Fire => &self.fire,
            Element::Water => &self.water,
            Element::Air => &self.air,
            Element::Earth => &self.earth,
        }
    }

    pub fn signs_mut(&mut self, element: Element) -> &mut Vec<String> {
        match element {
            Element::Fire => &mut self.fire,
            Element::Water => &mut self.water,
            Element::Air => &mut self.air,
            Element::Earth => &mut self.earth,
        }
    }
}

/// Structured record extracted from one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableData {
    MasterNumbers(MasterNumbersTable),
    CoreNumbers(CoreNumbersTable),
    Systems(SystemsTable),
    Sunrise(SunriseTable),
    PlanetaryHours(PlanetaryHoursTable),
    ElementsTriangles(ElementsTrianglesTable),
}

impl TableData {
    pub fn category(&self) -> Category {
        match self {
            TableData::MasterNumbers(_) => Category::MasterNumbers,
            TableData::CoreNumbers(_) => Category::CoreNumbers,
            TableData::Systems(_) => Category::Systems,
            TableData::Sunrise(_) => Category::Sunrise,
            TableData::PlanetaryHours(_) => Category::PlanetaryHours,
            TableData::ElementsTriangles(_) => Category::ElementsTriangles,
        }
    }

    /// Whether the record carries nothing worth aggregating.
    ///
    /// Only the two bare-map shapes can be empty; the other records always
    /// carry their fixed fields.
    pub fn is_empty(&self) -> bool {
        match self {
            TableData::CoreNumbers(table) => table.is_empty(),
            TableData::Systems(table) => table.is_empty(),
            _ => false,
        }
    }
}
