//! Locates the name, id and availability columns of an exchange list.
//!
//! The published lists do not agree on header text, so every logical field
//! has an ordered list of candidate headers. Supporting a new variant means
//! adding a string here.

use std::collections::HashMap;

use anyhow::{Result, bail};

use crate::sheet::Cell;

/// Headers for the exchange name column.
pub const NAME_HEADERS: &[&str] = &["exchange name"];

/// Headers for the exchange id column. Some lists misspell "exchange".
pub const ID_HEADERS: &[&str] = &["echnage id (sauid)", "exchange id (sauid)"];

/// Headers for the availability column. Lists of exchanges that are already
/// live carry "Now" under "accepting orders".
pub const DATE_HEADERS: &[&str] = &[
    "estimated service availability date (c-rfs)",
    "accepting orders",
];

/// Lower-cases and trims a header cell.
pub fn normalize(header: &Cell) -> String {
    header.to_string().to_lowercase().trim().to_string()
}

/// Normalized header text to column position.
#[derive(Debug)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Builds the index from a header row. A header repeated later in the row
    /// keeps its first position.
    pub fn from_row(row: &[Cell]) -> Self {
        let mut positions = HashMap::new();
        for (column, cell) in row.iter().enumerate() {
            positions.entry(normalize(cell)).or_insert(column);
        }
        Self { positions }
    }

    /// Position of the first candidate present in the header row.
    pub fn find(&self, candidates: &[&str]) -> Option<usize> {
        candidates
            .iter()
            .find_map(|candidate| self.positions.get(*candidate).copied())
    }

    fn require(&self, field: &str, candidates: &[&str]) -> Result<usize> {
        match self.find(candidates) {
            Some(column) => Ok(column),
            None => bail!(
                "no {field} column; looked for headers {}",
                candidates
                    .iter()
                    .map(|c| format!("'{c}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

/// Column positions of the three fields every exchange row is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub name: usize,
    pub id: usize,
    pub date: usize,
}

impl Columns {
    /// Resolves all three fields or fails naming the first one that is missing.
    pub fn resolve(index: &HeaderIndex) -> Result<Self> {
        Ok(Self {
            name: index.require("exchange name", NAME_HEADERS)?,
            id: index.require("exchange id", ID_HEADERS)?,
            date: index.require("availability date", DATE_HEADERS)?,
        })
    }

    pub fn from_header_row(row: &[Cell]) -> Result<Self> {
        Self::resolve(&HeaderIndex::from_row(row))
    }
}
