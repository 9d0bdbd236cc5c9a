//! # Primitive Constants
//!
//! Fixed thresholds and limits shared by the engine and its callers.
//!
//! ## Month Approximation
//!
//! A month is exactly 30.44 days (365.25 / 12). Ages are never computed with
//! calendar months; they are elapsed milliseconds divided by
//! [`AVERAGE_MONTH_MS`]. Keeping the value as an integer makes every
//! threshold comparison exact.

// =============================================================================
// TIME UNITS
// =============================================================================

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Milliseconds in one week.
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

/// Milliseconds in one average month (30.44 days).
pub const AVERAGE_MONTH_MS: i64 = 3044 * MS_PER_DAY / 100;

// =============================================================================
// STAGE THRESHOLDS (age in months, lower bound inclusive)
// =============================================================================

/// Age at which a child becomes a toddler.
pub const TODDLER_MONTHS: u32 = 12;

/// Age at which early childhood begins.
pub const EARLY_CHILDHOOD_MONTHS: u32 = 36;

/// Age at which school age begins.
pub const SCHOOL_AGE_MONTHS: u32 = 84;

/// Age at which adolescence begins.
pub const ADOLESCENCE_MONTHS: u32 = 156;

// Boundaries must be strictly increasing so every age maps to one stage.
const _: () = assert!(
    TODDLER_MONTHS < EARLY_CHILDHOOD_MONTHS
        && EARLY_CHILDHOOD_MONTHS < SCHOOL_AGE_MONTHS
        && SCHOOL_AGE_MONTHS < ADOLESCENCE_MONTHS
);

// =============================================================================
// TRANSITION DEFAULTS
// =============================================================================

/// Default advance-notice window before a stage transition.
pub const DEFAULT_BUFFER_DAYS: u32 = 14;

/// Largest advance-notice window a caller may request.
pub const MAX_BUFFER_DAYS: u32 = 365;

// =============================================================================
// THEME DEFAULTS
// =============================================================================

/// Primary colour used when a stage id misses the registry.
pub const DEFAULT_PRIMARY_COLOR: &str = "#4F8EF7";

// =============================================================================
// INPUT LIMITS
// =============================================================================

/// Maximum number of children accepted in a single family request.
pub const MAX_FAMILY_SIZE: usize = 32;

/// Maximum length of a date string accepted from external input.
pub const MAX_DATE_INPUT_LENGTH: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_month_is_exact() {
        assert_eq!(AVERAGE_MONTH_MS, 2_630_016_000);
    }

    #[test]
    fn week_is_seven_days() {
        assert_eq!(MS_PER_WEEK, 604_800_000);
    }
}
