//! Query parameter validation.
//!
//! Turns the raw `field`, `start_date` and `end_date` strings into a typed
//! [`FilterDescriptor`]. Nothing here touches the store.

use super::error::{DateBound, QueryError};
use crate::models::Field;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;

/// Milliseconds from midnight to the last representable instant of a day.
const END_OF_DAY_MS: i64 = 24 * 60 * 60 * 1000 - 1;

/// Raw, unvalidated filter parameters as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterParams {
    /// Field name.
    pub field: Option<String>,
    /// Inclusive start day, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive end day, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

impl FilterParams {
    /// Creates empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field name.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the start day.
    #[must_use]
    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Sets the end day.
    #[must_use]
    pub fn with_end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }
}

/// A validated filter.
///
/// `start <= end` is deliberately not checked: an inverted range is accepted
/// and later yields no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterDescriptor {
    /// Selected field, `None` for all fields.
    pub field: Option<Field>,
    /// First instant of the start day.
    pub start: Option<DateTime<Utc>>,
    /// Last millisecond of the end day.
    pub end: Option<DateTime<Utc>>,
}

/// Empty strings count as absent (`?field=` behaves like no `field`).
fn present(raw: Option<&String>) -> Option<&str> {
    raw.map(String::as_str).filter(|s| !s.is_empty())
}

/// Validates list query parameters.
///
/// Checks run in order `field`, `start_date`, `end_date`; the first failure
/// is returned.
///
/// # Errors
///
/// Returns [`QueryError::InvalidField`] or [`QueryError::InvalidDateFormat`].
///
/// # Example
///
/// ```
/// use shared::query::{parse_filter, FilterParams};
/// use shared::models::Field;
///
/// let params = FilterParams::new()
///     .with_field("humidity")
///     .with_end_date("2025-01-02");
/// let filter = parse_filter(&params).unwrap();
///
/// assert_eq!(filter.field, Some(Field::Humidity));
/// assert!(filter.start.is_none());
/// assert_eq!(filter.end.unwrap().to_rfc3339(), "2025-01-02T23:59:59.999+00:00");
/// ```
pub fn parse_filter(params: &FilterParams) -> Result<FilterDescriptor, QueryError> {
    let field = present(params.field.as_ref())
        .map(|name| Field::parse(name).ok_or_else(|| QueryError::InvalidField(name.to_string())))
        .transpose()?;

    let start = present(params.start_date.as_ref())
        .map(|raw| parse_date(raw, DateBound::Start))
        .transpose()?;

    let end = present(params.end_date.as_ref())
        .map(|raw| parse_date(raw, DateBound::End))
        .transpose()?;

    Ok(FilterDescriptor { field, start, end })
}

/// Validates metrics query parameters, where `field` is mandatory.
///
/// A missing field is reported before anything else is looked at.
///
/// # Errors
///
/// Returns [`QueryError::MissingField`], or any error [`parse_filter`] returns.
pub fn parse_metrics_filter(params: &FilterParams) -> Result<FilterDescriptor, QueryError> {
    if present(params.field.as_ref()).is_none() {
        return Err(QueryError::MissingField);
    }
    parse_filter(params)
}

/// Parses a `YYYY-MM-DD` day into the first (start) or last (end) instant of
/// that day in UTC.
///
/// # Errors
///
/// Returns [`QueryError::InvalidDateFormat`] if the input does not have the
/// exact shape or is not a real calendar date.
pub fn parse_date(raw: &str, bound: DateBound) -> Result<DateTime<Utc>, QueryError> {
    let invalid = || QueryError::InvalidDateFormat { bound };

    let date = parse_iso_day(raw).ok_or_else(invalid)?;
    let start_of_day = date.and_time(NaiveTime::MIN);

    let naive = match bound {
        DateBound::Start => start_of_day,
        DateBound::End => start_of_day
            .checked_add_signed(Duration::milliseconds(END_OF_DAY_MS))
            .ok_or_else(invalid)?,
    };

    Ok(Utc.from_utc_datetime(&naive))
}

/// Strict `YYYY-MM-DD`: exactly ten ASCII characters, no sign, no padding
/// shortcuts.
fn parse_iso_day(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    let digits = |range: std::ops::Range<usize>| -> Option<u32> {
        bytes[range].iter().try_fold(0u32, |acc, b| {
            b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
        })
    };

    let year = i32::try_from(digits(0..4)?).ok()?;
    let month = digits(5..7)?;
    let day = digits(8..10)?;

    NaiveDate::from_ymd_opt(year, month, day)
}
