//! # Child Age
//!
//! Elapsed time between a birth date and an evaluation instant, expressed in
//! the engine's approximate months.
//!
//! All arithmetic is integer milliseconds. Fractional months are exposed as
//! fixed-point hundredths (`months_hundredths`), never as floats.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::primitives::{AVERAGE_MONTH_MS, MAX_DATE_INPUT_LENGTH, MS_PER_DAY, MS_PER_WEEK};
use crate::types::NurtureError;

// =============================================================================
// CHILD AGE
// =============================================================================

/// Age of a child at a given instant.
///
/// Negative when the birth date lies after the evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChildAge {
    millis: i64,
}

impl ChildAge {
    /// Age at `now` of a child born at `date_of_birth`.
    #[must_use]
    pub fn between(date_of_birth: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            millis: now.signed_duration_since(date_of_birth).num_milliseconds(),
        }
    }

    /// Construct from raw elapsed milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Raw elapsed milliseconds.
    #[must_use]
    pub const fn millis(&self) -> i64 {
        self.millis
    }

    /// Completed average months (floored, zero for future births).
    #[must_use]
    pub const fn whole_months(&self) -> i64 {
        if self.millis <= 0 {
            0
        } else {
            self.millis / AVERAGE_MONTH_MS
        }
    }

    /// Age in months as fixed-point hundredths (1160 = 11.60 months).
    #[must_use]
    pub const fn months_hundredths(&self) -> i64 {
        self.millis.saturating_mul(100) / AVERAGE_MONTH_MS
    }

    /// Completed days (floored, zero for future births).
    #[must_use]
    pub const fn whole_days(&self) -> i64 {
        if self.millis <= 0 {
            0
        } else {
            self.millis / MS_PER_DAY
        }
    }

    /// Whether the age has reached `months` (inclusive).
    #[must_use]
    pub const fn is_at_least_months(&self, months: u32) -> bool {
        self.millis >= months_to_millis(months)
    }

    /// Milliseconds left until the age reaches `months`.
    ///
    /// Negative once the threshold is behind.
    #[must_use]
    pub const fn millis_until_months(&self, months: u32) -> i64 {
        months_to_millis(months).saturating_sub(self.millis)
    }
}

/// Convert a month count to milliseconds using the 30.44-day month.
#[must_use]
pub const fn months_to_millis(months: u32) -> i64 {
    (months as i64).saturating_mul(AVERAGE_MONTH_MS)
}

// =============================================================================
// DATE PARSING
// =============================================================================

/// Parse a birth date from external input.
///
/// Accepts a plain calendar date (`2023-01-15`, read as midnight UTC) or a
/// full RFC 3339 timestamp.
pub fn parse_date_of_birth(input: &str) -> Result<DateTime<Utc>, NurtureError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NurtureError::InvalidDate("empty date".to_string()));
    }
    if trimmed.len() > MAX_DATE_INPUT_LENGTH {
        return Err(NurtureError::InvalidDate(format!(
            "date length {} exceeds maximum {}",
            trimmed.len(),
            MAX_DATE_INPUT_LENGTH
        )));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| NurtureError::InvalidDate(format!("'{}': {}", trimmed, e)))
}

// =============================================================================
// AGE FORMATTING
// =============================================================================

/// Human-readable age at the current wall-clock time, e.g. `"1 year 3 months"`.
#[must_use]
pub fn format_child_age(date_of_birth: DateTime<Utc>) -> String {
    format_child_age_at(date_of_birth, Utc::now())
}

/// Human-readable age at `now`.
///
/// Under a week the label counts days, under a month weeks, under a year
/// months; from one year on it reads `"N years"` plus any leftover months.
#[must_use]
pub fn format_child_age_at(date_of_birth: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = ChildAge::between(date_of_birth, now);
    let millis = age.millis().max(0);

    if millis < MS_PER_WEEK {
        return pluralize(age.whole_days(), "day");
    }
    if millis < AVERAGE_MONTH_MS {
        return pluralize(millis / MS_PER_WEEK, "week");
    }

    let months = age.whole_months();
    let years = months / 12;
    let rest = months % 12;

    match (years, rest) {
        (0, m) => pluralize(m, "month"),
        (y, 0) => pluralize(y, "year"),
        (y, m) => format!("{} {}", pluralize(y, "year"), pluralize(m, "month")),
    }
}

fn pluralize(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

// =============================================================================
// TESTS
// =============================================================================
