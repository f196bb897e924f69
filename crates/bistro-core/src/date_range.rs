//! # Date Range Filter
//!
//! Turns optional start/end dates into a filter fragment on `created_at`,
//! used by the reporting queries.
//!
//! ```text
//!   start    end      fragment
//!   ─────    ─────    ──────────────────────────────────
//!   None     None     {}
//!   Some(s)  None     { created_at: { gte: s } }
//!   None     Some(e)  { created_at: { lte: e } }
//!   Some(s)  Some(e)  { created_at: { gte: s, lte: e } }
//! ```
//!
//! Both bounds are inclusive. A bare date means midnight UTC of that day, so
//! an end of `2024-01-31` stops at `2024-01-31T00:00:00Z`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// Inclusive bounds on `created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedAtBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<DateTime<Utc>>,
}

/// A filter fragment restricting orders by creation time.
///
/// ## Example
/// ```rust
/// use bistro_core::DateRangeFilter;
///
/// let all = DateRangeFilter::parse(None, None).unwrap();
/// assert!(all.is_empty());
///
/// let january = DateRangeFilter::parse(Some("2024-01-01"), Some("2024-01-31")).unwrap();
/// let bounds = january.created_at.unwrap();
/// assert!(bounds.gte.is_some() && bounds.lte.is_some());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreatedAtBounds>,
}

impl DateRangeFilter {
    /// Builds the fragment from already-parsed bounds.
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        if start.is_none() && end.is_none() {
            return DateRangeFilter::default();
        }

        DateRangeFilter {
            created_at: Some(CreatedAtBounds {
                gte: start,
                lte: end,
            }),
        }
    }

    /// Matches every order.
    pub fn all() -> Self {
        DateRangeFilter::default()
    }

    /// Builds the fragment from raw request values.
    ///
    /// Accepts RFC 3339 timestamps or `YYYY-MM-DD` dates. Blank values count
    /// as absent.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> ValidationResult<Self> {
        let start = parse_bound("start_date", start)?;
        let end = parse_bound("end_date", end)?;
        Ok(DateRangeFilter::new(start, end))
    }

    pub fn is_empty(&self) -> bool {
        self.created_at.is_none()
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(|bounds| bounds.gte)
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(|bounds| bounds.lte)
    }

    /// Whether a creation time falls within the bounds.
    pub fn contains(&self, created_at: &DateTime<Utc>) -> bool {
        self.start().map_or(true, |start| *created_at >= start)
            && self.end().map_or(true, |end| *created_at <= end)
    }
}

fn parse_bound(field: &str, raw: Option<&str>) -> ValidationResult<Option<DateTime<Utc>>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Some(midnight.and_utc()))
        .ok_or_else(|| {
            ValidationError::invalid_format(field, "expected YYYY-MM-DD or an RFC 3339 timestamp")
        })
}
