//! One exchange per data row.

use crate::availability::Availability;
use crate::headers::Columns;
use crate::sheet::{Cell, Sheet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub id: String,
    pub name: String,
    pub availability: Availability,
}

impl Exchange {
    /// Reads an exchange from a data row. Cells past the end of a short row
    /// read as empty.
    pub fn from_row(row: &[Cell], columns: &Columns) -> Self {
        let cell = |column: usize| row.get(column).unwrap_or(&Cell::Empty);

        Self {
            id: cell(columns.id).to_string().trim().to_string(),
            name: cell(columns.name).to_string(),
            availability: Availability::from_cell(cell(columns.date)),
        }
    }
}

/// Every exchange in `sheet`, in row order. Rows with no values at all are skipped.
pub fn read_exchanges(sheet: &Sheet, columns: &Columns) -> Vec<Exchange> {
    sheet
        .data_rows()
        .enumerate()
        .filter_map(|(i, row)| {
            if row.iter().all(Cell::is_blank) {
                tracing::debug!(row = i + 1, "Skipping blank row");
                None
            } else {
                Some(Exchange::from_row(row, columns))
            }
        })
        .collect()
}
