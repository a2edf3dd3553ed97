//! Master numbers table parser.

use crate::models::tables::{MasterNumber, MasterNumbersTable};

use super::patterns::MASTER_NUMBER;
use super::{route, TableParser};

#[derive(Debug, Clone, Copy)]
enum Field {
    Energy,
    Symbolism,
    Trait,
}

const ROUTES: [(&[&str], Field); 3] = [
    (&["energy", "vibration"], Field::Energy),
    (&["symbol", "meaning"], Field::Symbolism),
    (&["trait", "characteristic"], Field::Trait),
];

/// Master numbers parser.
///
/// A line containing a 2-3 digit number opens a section for that number;
/// a repeated number starts over with an empty entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct MasterNumbersParser;

impl TableParser for MasterNumbersParser {
    type Output = MasterNumbersTable;

    fn parse(&self, lines: &[&str]) -> Self::Output {
        let mut table = MasterNumbersTable::default();
        let mut current: Option<String> = None;

        for line in lines {
            if let Some(caps) = MASTER_NUMBER.captures(line) {
                let number = caps[1].to_string();
                table.numbers.insert(number.clone(), MasterNumber::default());
                current = Some(number);
                continue;
            }

            let Some(entry) = current.as_ref().and_then(|n| table.numbers.get_mut(n)) else {
                continue;
            };

            match route(&line.to_lowercase(), &ROUTES) {
                Some(Field::Energy) => entry.energy = line.to_string(),
                Some(Field::Symbolism) => entry.symbolism = line.to_string(),
                Some(Field::Trait) => entry.traits.push(line.to_string()),
                None => {}
            }
        }

        table
    }
}

/// Parse a master numbers table from cleaned lines.
pub fn parse_master_numbers(lines: &[&str]) -> MasterNumbersTable {
    MasterNumbersParser.parse(lines)
}
