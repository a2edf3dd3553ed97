//! Core numbers table parser.

use crate::models::tables::{CoreNumber, CoreNumberKind, CoreNumbersTable};

use super::patterns::CORE_NUMBER_KIND;
use super::{route, TableParser};

#[derive(Debug, Clone, Copy)]
enum Field {
    Definition,
    Calc,
}

const ROUTES: [(&[&str], Field); 2] = [
    (&["definition", "meaning"], Field::Definition),
    (&["calculation", "formula"], Field::Calc),
];

/// Core numbers parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreNumbersParser;

impl TableParser for CoreNumbersParser {
    type Output = CoreNumbersTable;

    fn parse(&self, lines: &[&str]) -> Self::Output {
        let mut table = CoreNumbersTable::new();
        let mut current: Option<CoreNumberKind> = None;

        for line in lines {
            let lower = line.to_lowercase();

            if let Some(kind) = CORE_NUMBER_KIND
                .captures(&lower)
                .and_then(|caps| CoreNumberKind::from_token(&caps[1]))
            {
                table.insert(kind, CoreNumber::default());
                current = Some(kind);
                continue;
            }

            let Some(entry) = current.and_then(|kind| table.get_mut(&kind)) else {
                continue;
            };

            match route(&lower, &ROUTES) {
                Some(Field::Definition) => entry.definition = line.to_string(),
                Some(Field::Calc) => entry.calc = line.to_string(),
                None => {}
            }
        }

        table
    }
}

/// Parse a core numbers table from cleaned lines.
pub fn parse_core_numbers(lines: &[&str]) -> CoreNumbersTable {
    CoreNumbersParser.parse(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_core_numbers() {
        let lines = [
            "LIFE_PATH",
            "Definition: the road you walk",
            "Calculation: reduce the full birth date",
            "Soul_Urge number",
            "Meaning: inner desire",
            "Formula: vowels of the full name",
            "a stray note",
        ];

        let table = parse_core_numbers(&lines);

        assert_eq!(table.len(), 2);
        assert_eq!(
            table[&CoreNumberKind::LifePath],
            CoreNumber {
                definition: "Definition: the road you walk".to_string(),
                calc: "Calculation: reduce the full birth date".to_string(),
            }
        );
        assert_eq!(table[&CoreNumberKind::SoulUrge].definition, "Meaning: inner desire");
        assert_eq!(table[&CoreNumberKind::SoulUrge].calc, "Formula: vowels of the full name");
    }

    #[test]
    fn test_preserves_section_order() {
        let lines = ["maturity", "birthday", "current_name"];
        let keys: Vec<_> = parse_core_numbers(&lines).into_keys().collect();
        assert_eq!(
            keys,
            vec![CoreNumberKind::Maturity, CoreNumberKind::Birthday, CoreNumberKind::CurrentName]
        );
    }

    #[test]
    fn test_no_sections_yields_empty_table() {
        let table = parse_core_numbers(&["Definition without a section", "42"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_space_separated_name_is_not_a_token() {
        assert!(parse_core_numbers(&["Life Path"]).is_empty());
    }
}
