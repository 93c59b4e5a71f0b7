//! Declarative column descriptors.
//!
//! A column pairs a header with a pure selector that turns a record into a
//! [`Cell`]. Cells come in a closed set of kinds; formatting lives here so
//! every renderer shows the same text for the same value.

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Write;

pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";
pub const EMPTY_CELL: &str = "—";

/// Badge colouring, independent of any particular palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Primary,
    Success,
    Error,
    Warning,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Badge { label: String, tone: Tone },
    Date(Option<NaiveDateTime>),
    Boolean(bool),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn display(&self, date_format: &str) -> String {
        match self {
            Cell::Text(s) | Cell::Badge { label: s, .. } if s.trim().is_empty() => {
                EMPTY_CELL.to_string()
            }
            Cell::Text(s) => s.clone(),
            Cell::Badge { label, .. } => label.clone(),
            Cell::Date(Some(ts)) => format_date(ts, date_format),
            Cell::Date(None) => EMPTY_CELL.to_string(),
            Cell::Boolean(true) => "Active".to_string(),
            Cell::Boolean(false) => "Inactive".to_string(),
        }
    }

    /// Tone used when the cell is drawn as a badge. Booleans render as
    /// success/warning badges.
    pub fn tone(&self) -> Option<Tone> {
        match self {
            Cell::Badge { tone, .. } => Some(*tone),
            Cell::Boolean(true) => Some(Tone::Success),
            Cell::Boolean(false) => Some(Tone::Warning),
            _ => None,
        }
    }
}

/// Format `ts` with `date_format`, falling back to [`DEFAULT_DATE_FORMAT`]
/// when the format cannot render a naive timestamp.
pub fn format_date(ts: &NaiveDateTime, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", ts.format(date_format)).is_ok() {
        return out;
    }
    ts.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Whether `date_format` parses and renders a naive timestamp. Offsets and
/// zone names (`%z`, `%Z`) have nothing to render and fail.
pub fn is_valid_date_format(date_format: &str) -> bool {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let Some(sample) = NaiveDate::from_ymd_opt(2000, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)) else {
        return false;
    };
    let mut out = String::new();
    write!(out, "{}", sample.format(date_format)).is_ok()
}

pub struct Column<R> {
    pub header: &'static str,
    /// Preferred width in terminal cells.
    pub width: u16,
    select: fn(&R) -> Cell,
}

impl<R> Column<R> {
    pub fn new(header: &'static str, width: u16, select: fn(&R) -> Cell) -> Self {
        Self {
            header,
            width,
            select,
        }
    }

    pub fn cell(&self, record: &R) -> Cell {
        (self.select)(record)
    }
}

/// Badge tone for a lead pipeline status.
pub fn status_tone(status: &str) -> Tone {
    match status.trim().to_lowercase().as_str() {
        "new" | "open" => Tone::Info,
        "contacted" | "in progress" => Tone::Primary,
        "qualified" | "converted" => Tone::Success,
        "lost" | "closed" => Tone::Error,
        "follow up" | "pending" => Tone::Warning,
        _ => Tone::Light,
    }
}
