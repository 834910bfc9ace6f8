//! Decoding of the availability column.
//!
//! The column mixes three kinds of value: spreadsheet date serials for
//! planned dates, small integers, and free text such as "Now".

use std::fmt;

use chrono::{Days, NaiveDate};

use crate::sheet::Cell;

/// Integers above this are date serials; at or below it they are kept as-is.
pub const SERIAL_DATE_THRESHOLD: i64 = 3000;

/// Day zero of spreadsheet date serials. Using 1899-12-30 rather than
/// 1900-01-01 absorbs the phantom 1900-02-29 that spreadsheets count.
pub fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// A planned date, shown as abbreviated month and year.
    Scheduled(NaiveDate),
    /// An integer too small to be a date serial.
    Year(i64),
    /// Anything that is not an integer, unchanged.
    Text(String),
}

impl Availability {
    pub fn from_cell(cell: &Cell) -> Self {
        match as_integer(cell) {
            Some(n) if n > SERIAL_DATE_THRESHOLD => match serial_to_date(n) {
                Some(date) => Availability::Scheduled(date),
                None => Availability::Year(n),
            },
            Some(n) => Availability::Year(n),
            None => Availability::Text(cell.to_string()),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Scheduled(date) => write!(f, "{}", date.format("%b %Y")),
            Availability::Year(n) => write!(f, "{n}"),
            Availability::Text(s) => f.write_str(s),
        }
    }
}

/// Numbers truncate toward zero; text must be a base-10 integer once trimmed.
fn as_integer(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Number(n) if n.is_finite() && n.abs() < i64::MAX as f64 => Some(n.trunc() as i64),
        Cell::Number(_) | Cell::Empty => None,
        Cell::Text(s) => s.trim().parse().ok(),
    }
}

fn serial_to_date(serial: i64) -> Option<NaiveDate> {
    let days = u64::try_from(serial).ok()?;
    serial_epoch().checked_add_days(Days::new(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(cell: Cell) -> String {
        Availability::from_cell(&cell).to_string()
    }

    #[test]
    fn test_serial_date() {
        assert_eq!(decode(Cell::Number(45000.0)), "Mar 2023");
        assert_eq!(decode(Cell::Number(40909.0)), "Jan 2012");
        assert_eq!(decode(Cell::Number(3001.0)), "Mar 1908");
    }

    #[test]
    fn test_serial_date_is_epoch_plus_days() {
        for serial in [3001_i64, 41000, 45000, 60000] {
            let expected = serial_epoch() + chrono::Duration::days(serial);
            assert_eq!(
                Availability::from_cell(&Cell::Number(serial as f64)),
                Availability::Scheduled(expected)
            );
        }
    }

    #[test]
    fn test_serial_date_from_text() {
        assert_eq!(decode(Cell::text(" 45000 ")), "Mar 2023");
    }

    #[test]
    fn test_fractional_serial_truncates() {
        assert_eq!(decode(Cell::Number(45000.75)), "Mar 2023");
    }

    #[test]
    fn test_small_integers_pass_through() {
        assert_eq!(Availability::from_cell(&Cell::Number(2012.0)), Availability::Year(2012));
        assert_eq!(decode(Cell::Number(3000.0)), "3000");
        assert_eq!(decode(Cell::text("2013")), "2013");
        assert_eq!(decode(Cell::Number(0.0)), "0");
    }

    #[test]
    fn test_non_integers_pass_through_unchanged() {
        assert_eq!(Availability::from_cell(&Cell::text("Now")), Availability::Text("Now".into()));
        assert_eq!(decode(Cell::text("Spring 2012")), "Spring 2012");
        assert_eq!(decode(Cell::text("45000.5")), "45000.5");
        assert_eq!(decode(Cell::Empty), "");
    }
}
