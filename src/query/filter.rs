//! Filter normalization
//!
//! Turns raw request inputs (field selector string plus optional
//! `YYYY-MM-DD` date strings) into a validated [`Filter`], or a descriptive
//! [`ValidationError`]. Pure and deterministic: no storage access, no
//! clock reads.
//!
//! Date semantics: both boundaries are inclusive and expanded to full UTC
//! days. A range of `2024-03-01`..`2024-03-01` covers
//! `2024-03-01T00:00:00.000Z` through `2024-03-01T23:59:59.999Z`.

use crate::query::error::ValidationError;
use crate::store::{DateRange, Field};
use chrono::NaiveDate;

/// Normalized query filter: a field plus an optional inclusive UTC range
///
/// Constructed fresh per request via [`Filter::normalize`]; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    /// Selected measurement field
    pub field: Field,
    /// Optional inclusive date range; None matches all timestamps
    pub range: Option<DateRange>,
}

impl Filter {
    /// Validate and normalize raw request inputs
    ///
    /// Rules, checked in order:
    /// - `field` must name a member of the fixed enumeration
    /// - supplying only one of `start`/`end` is an error
    /// - both dates must match the strict `YYYY-MM-DD` calendar format
    /// - the parsed start must not be after the parsed end
    ///
    /// With no dates the filter is unrestricted.
    pub fn normalize(
        field: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let field = field
            .and_then(|s| s.parse::<Field>().ok())
            .ok_or(ValidationError::InvalidField)?;

        let range = match (start, end) {
            (None, None) => None,
            (Some(start), Some(end)) => {
                let start = parse_day(start)?;
                let end = parse_day(end)?;
                if start > end {
                    return Err(ValidationError::InvertedRange);
                }
                Some(DateRange {
                    start: day_start_millis(start),
                    end: day_end_millis(end),
                })
            }
            _ => return Err(ValidationError::IncompleteRange),
        };

        Ok(Self { field, range })
    }

    /// Filter with no range restriction
    pub fn unrestricted(field: Field) -> Self {
        Self { field, range: None }
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date
///
/// chrono's `%Y-%m-%d` accepts single-digit months and days, so the shape
/// is checked first: exactly ten characters, dashes at positions 4 and 7,
/// digits everywhere else.
fn parse_day(s: &str) -> Result<NaiveDate, ValidationError> {
    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !shape_ok {
        return Err(ValidationError::InvalidDate);
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
}

/// First instant of the UTC day, in milliseconds
fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis()
}

/// Last instant of the UTC day (23:59:59.999), in milliseconds
fn day_end_millis(date: NaiveDate) -> i64 {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}
