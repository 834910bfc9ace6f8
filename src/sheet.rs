//! Spreadsheet loading and the cell model the rest of the pipeline reads.
//!
//! Exchange lists are published as Excel workbooks; CSV exports are accepted
//! too so a list can be prepared by hand. Only the first worksheet of a
//! workbook is read.

use std::fmt;
use std::io::Cursor;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use tracing::debug;

use crate::fetch::{HttpClient, fetch_bytes};

/// A single spreadsheet value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Text cell, or [`Cell::Empty`] for an empty string.
    pub fn text(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(_) => false,
            Cell::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for Cell {
    /// Integral numbers print without a fractional part (`12345`, not `12345.0`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            // Date cells keep their serial value; decoding happens per column.
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::text(s),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// Rows of cells. Row 0 is the header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Decodes the first worksheet of an `.xls`, `.xlsx`, `.xlsb` or `.ods` workbook.
    ///
    /// Rows start at the first non-empty row of the worksheet.
    pub fn from_workbook(bytes: &[u8]) -> Result<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| anyhow!("failed to open workbook: {e}"))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| anyhow!("workbook has no worksheets"))?
            .map_err(|e| anyhow!("failed to read first worksheet: {e}"))?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(Cell::from).collect())
            .collect();

        Ok(Self { rows })
    }

    /// Decodes CSV text. Every field becomes a text cell; rows may differ in length.
    pub fn from_csv(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.context("malformed CSV sheet")?;
            rows.push(record.iter().map(Cell::text).collect());
        }

        Ok(Self { rows })
    }

    pub fn header(&self) -> Option<&[Cell]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Every row after the header, in sheet order.
    pub fn data_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().skip(1).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn is_csv(location: &str) -> bool {
    location
        .split(['?', '#'])
        .next()
        .is_some_and(|path| path.to_ascii_lowercase().ends_with(".csv"))
}

/// Fetches (or, for non-HTTP locations, reads) the sheet at `location` and decodes it.
#[tracing::instrument(skip(client))]
pub async fn load_sheet<C: HttpClient + ?Sized>(client: &C, location: &str) -> Result<Sheet> {
    let bytes = if location.starts_with("http") {
        fetch_bytes(client, location).await?
    } else {
        std::fs::read(location).with_context(|| format!("failed to read sheet '{location}'"))?
    };
    debug!(bytes = bytes.len(), "Sheet bytes received");

    let sheet = if is_csv(location) {
        Sheet::from_csv(&bytes)?
    } else {
        Sheet::from_workbook(&bytes).with_context(|| format!("failed to decode '{location}'"))?
    };
    debug!(rows = sheet.len(), "Sheet decoded");

    Ok(sheet)
}
