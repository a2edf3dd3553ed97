//! Zodiac elements and triangles parser.

use crate::models::tables::{Element, ElementsTrianglesTable, HouseTriangleMapping};

use super::patterns::{ELEMENT, ZODIAC_SIGN};
use super::TableParser;

pub const ELEMENTS_SOURCE: &str = "zodiac_triangles_elements image";

/// Fixed date ranges of the house triangles.
pub fn house_triangle_mapping() -> HouseTriangleMapping {
    fn ranges(items: [&str; 3]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    HouseTriangleMapping {
        fire_house_ranges: ranges(["Mar 21–Apr 20", "Jul 21–Aug 20", "Nov 21–Dec 20"]),
        water_house_ranges: ranges(["Jun 21–Jul 20", "Oct 21–Nov 20", "Feb 21–Mar 20"]),
        air_house_ranges: ranges(["May 21–Jun 20", "Sep 21–Oct 20", "Jan 21–Feb 20"]),
        earth_house_ranges: ranges(["Apr 21–May 20", "Aug 21–Sep 20", "Dec 21–Jan 20"]),
    }
}

/// Elements/triangles parser.
///
/// An element name opens that element's bucket; later lines naming a sign
/// append it to the open bucket.
#[derive(Debug, Default, Clone, Copy)]
pub struct ElementsTrianglesParser;

impl TableParser for ElementsTrianglesParser {
    type Output = ElementsTrianglesTable;

    fn parse(&self, lines: &[&str]) -> Self::Output {
        let mut table = ElementsTrianglesTable {
            fire: Vec::new(),
            water: Vec::new(),
            air: Vec::new(),
            earth: Vec::new(),
            house_triangle_mapping: house_triangle_mapping(),
            source: ELEMENTS_SOURCE.to_string(),
        };
        let mut current: Option<Element> = None;

        for line in lines {
            if let Some(element) = ELEMENT
                .captures(&line.to_lowercase())
                .and_then(|caps| Element::from_token(&caps[1]))
            {
                current = Some(element);
                continue;
            }

            if let (Some(element), Some(caps)) = (current, ZODIAC_SIGN.captures(line)) {
                table.signs_mut(element).push(caps[1].to_string());
            }
        }

        table
    }
}

/// Parse an elements/triangles table from cleaned lines.
pub fn parse_elements_triangles(lines: &[&str]) -> ElementsTrianglesTable {
    ElementsTrianglesParser.parse(lines)
}
