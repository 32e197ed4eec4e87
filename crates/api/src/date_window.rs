//! Date range resolution for the climate queries.
//!
//! Every window is inclusive on both ends. Caller supplied dates use the
//! `YYYY-MM-DD` form only; compact forms such as `08232016` are rejected.

use serde::Serializer;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, Duration,
};

use crate::db::{self, RecordStore};

/// Length of the trailing window, in days. Not adjusted for leap years.
pub const TRAILING_WINDOW_DAYS: i64 = 365;

/// Canonical date format for both the dataset and the API.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid date {value:?}, expected YYYY-MM-DD")]
    InvalidDateFormat {
        value: String,
        #[source]
        source: Option<time::error::Parse>,
    },
    #[error("Start date {start} is after end date {end}")]
    InvalidRange { start: Date, end: Date },
    #[error(transparent)]
    Dataset(#[from] db::Error),
}

impl Error {
    /// True when the caller sent a bad request, false when the dataset is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidDateFormat { .. } | Error::InvalidRange { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Date,
    pub end: Date,
}

impl DateWindow {
    pub fn new(start: Date, end: Date) -> Result<Self, Error> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window ending at `reference` and reaching back [`TRAILING_WINDOW_DAYS`].
    pub fn trailing(reference: Date) -> Self {
        Self {
            start: reference.saturating_sub(Duration::days(TRAILING_WINDOW_DAYS)),
            end: reference,
        }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// `[year]` alone would also take a signed year, so the byte layout is checked first.
fn is_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub fn parse_date(value: &str) -> Result<Date, Error> {
    if !is_iso_date_shape(value) {
        return Err(Error::InvalidDateFormat {
            value: value.to_string(),
            source: None,
        });
    }
    Date::parse(value, DATE_FORMAT).map_err(|source| Error::InvalidDateFormat {
        value: value.to_string(),
        source: Some(source),
    })
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Serializes a [`Date`] as `YYYY-MM-DD`.
pub fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(*date))
}

/// The trailing year ending at the dataset's most recent measurement.
pub fn latest_year(store: &dyn RecordStore) -> Result<DateWindow, Error> {
    Ok(DateWindow::trailing(store.most_recent_date()?))
}

/// Resolves caller supplied bounds into a window.
///
/// Without `end` the window closes on the dataset's most recent date. A start
/// past that date is not an error, it just yields an empty window.
pub fn explicit_window(
    store: &dyn RecordStore,
    start: &str,
    end: Option<&str>,
) -> Result<DateWindow, Error> {
    let start = parse_date(start)?;
    match end {
        Some(end) => DateWindow::new(start, parse_date(end)?),
        None => Ok(DateWindow {
            start,
            end: store.most_recent_date()?,
        }),
    }
}
