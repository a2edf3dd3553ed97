//! Numerology systems table parser.

use crate::models::tables::{NumerologySystem, SystemEntry, SystemsTable};

use super::patterns::NUMEROLOGY_SYSTEM;
use super::{route, TableParser};

#[derive(Debug, Clone, Copy)]
enum Field {
    Desc,
    AlphabetRule,
    Notes,
}

const ROUTES: [(&[&str], Field); 3] = [
    (&["description", "about"], Field::Desc),
    (&["alphabet", "rule"], Field::AlphabetRule),
    (&["note", "additional"], Field::Notes),
];

/// Numerology systems parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemsParser;

impl TableParser for SystemsParser {
    type Output = SystemsTable;

    fn parse(&self, lines: &[&str]) -> Self::Output {
        let mut table = SystemsTable::new();
        let mut current: Option<NumerologySystem> = None;

        for line in lines {
            let lower = line.to_lowercase();

            if let Some(system) = NUMEROLOGY_SYSTEM
                .captures(&lower)
                .and_then(|caps| NumerologySystem::from_token(&caps[1]))
            {
                table.insert(system, SystemEntry::default());
                current = Some(system);
                continue;
            }

            let Some(entry) = current.and_then(|system| table.get_mut(&system)) else {
                continue;
            };

            match route(&lower, &ROUTES) {
                Some(Field::Desc) => entry.desc = line.to_string(),
                Some(Field::AlphabetRule) => entry.alphabet_rule = line.to_string(),
                Some(Field::Notes) => entry.notes = line.to_string(),
                None => {}
            }
        }

        table
    }
}

/// Parse a numerology systems table from cleaned lines.
pub fn parse_systems(lines: &[&str]) -> SystemsTable {
    SystemsParser.parse(lines)
}
