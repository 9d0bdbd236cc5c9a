//! # Stage Classifier
//!
//! Maps a birth date to one of the five developmental stages.
//!
//! ## Stage Definitions
//!
//! | Stage | Age (months) |
//! |-------|--------------|
//! | newborn | < 12 |
//! | toddler | 12 – 36 |
//! | early-childhood | 36 – 84 |
//! | school-age | 84 – 156 |
//! | adolescence | >= 156 |
//!
//! Lower bounds are inclusive: a child aged exactly 12.00 months is a toddler.
//! Months are the fixed 30.44-day approximation, not calendar months.

use chrono::{DateTime, Utc};

use crate::age::ChildAge;
use crate::primitives::{
    ADOLESCENCE_MONTHS, EARLY_CHILDHOOD_MONTHS, SCHOOL_AGE_MONTHS, TODDLER_MONTHS,
};
use crate::types::{ChildStage, NurtureError};

// =============================================================================
// STAGE CLASSIFIER
// =============================================================================

/// Stage Classifier - pure function from age to stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageClassifier {
    toddler_months: u32,
    early_childhood_months: u32,
    school_age_months: u32,
    adolescence_months: u32,
}

impl Default for StageClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StageClassifier {
    /// Create a classifier with the standard thresholds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            toddler_months: TODDLER_MONTHS,
            early_childhood_months: EARLY_CHILDHOOD_MONTHS,
            school_age_months: SCHOOL_AGE_MONTHS,
            adolescence_months: ADOLESCENCE_MONTHS,
        }
    }

    /// Create a classifier with custom thresholds.
    ///
    /// Thresholds must be strictly increasing.
    pub fn try_with_thresholds(
        toddler: u32,
        early_childhood: u32,
        school_age: u32,
        adolescence: u32,
    ) -> Result<Self, NurtureError> {
        if !(toddler < early_childhood && early_childhood < school_age && school_age < adolescence)
        {
            return Err(NurtureError::InvalidRequest(format!(
                "stage thresholds must increase: {}, {}, {}, {}",
                toddler, early_childhood, school_age, adolescence
            )));
        }
        Ok(Self {
            toddler_months: toddler,
            early_childhood_months: early_childhood,
            school_age_months: school_age,
            adolescence_months: adolescence,
        })
    }

    /// Months at which `stage` begins under this classifier.
    #[must_use]
    pub const fn lower_bound_months(&self, stage: ChildStage) -> Option<u32> {
        match stage {
            ChildStage::Newborn => None,
            ChildStage::Toddler => Some(self.toddler_months),
            ChildStage::EarlyChildhood => Some(self.early_childhood_months),
            ChildStage::SchoolAge => Some(self.school_age_months),
            ChildStage::Adolescence => Some(self.adolescence_months),
        }
    }

    /// Classify a precomputed age.
    #[must_use]
    pub const fn classify_age(&self, age: ChildAge) -> ChildStage {
        if age.is_at_least_months(self.adolescence_months) {
            ChildStage::Adolescence
        } else if age.is_at_least_months(self.school_age_months) {
            ChildStage::SchoolAge
        } else if age.is_at_least_months(self.early_childhood_months) {
            ChildStage::EarlyChildhood
        } else if age.is_at_least_months(self.toddler_months) {
            ChildStage::Toddler
        } else {
            ChildStage::Newborn
        }
    }

    /// Classify a birth date evaluated at `now`.
    #[must_use]
    pub fn classify_at(&self, date_of_birth: DateTime<Utc>, now: DateTime<Utc>) -> ChildStage {
        self.classify_age(ChildAge::between(date_of_birth, now))
    }

    /// Check whether a child has reached `target` at `now`.
    #[must_use]
    pub fn has_reached(
        &self,
        date_of_birth: DateTime<Utc>,
        target: ChildStage,
        now: DateTime<Utc>,
    ) -> bool {
        self.classify_at(date_of_birth, now) >= target
    }
}

// =============================================================================
// FREE FUNCTIONS
// =============================================================================

/// Classify a birth date against the current wall-clock time.
#[must_use]
pub fn classify_child_stage(date_of_birth: DateTime<Utc>) -> ChildStage {
    classify_child_stage_at(date_of_birth, Utc::now())
}

/// Classify a birth date evaluated at `now`.
#[must_use]
pub fn classify_child_stage_at(date_of_birth: DateTime<Utc>, now: DateTime<Utc>) -> ChildStage {
    StageClassifier::new().classify_at(date_of_birth, now)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::age::months_to_millis;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0)
            .single()
            .expect("valid date")
    }

    fn born(millis_ago: i64) -> DateTime<Utc> {
        now() - Duration::milliseconds(millis_ago)
    }

    #[test]
    fn birth_today_is_newborn() {
        assert_eq!(classify_child_stage_at(now(), now()), ChildStage::Newborn);
    }

    #[test]
    fn exact_boundaries_belong_to_older_stage() {
        let cases = [
            (12, ChildStage::Toddler),
            (36, ChildStage::EarlyChildhood),
            (84, ChildStage::SchoolAge),
            (156, ChildStage::Adolescence),
        ];
        for (months, expected) in cases {
            let at = born(months_to_millis(months));
            assert_eq!(classify_child_stage_at(at, now()), expected, "{} months", months);

            let just_before = born(months_to_millis(months) - 1);
            assert_eq!(
                classify_child_stage_at(just_before, now()),
                expected.previous().expect("has previous"),
                "just under {} months",
                months
            );
        }
    }

    #[test]
    fn very_old_is_adolescence() {
        assert_eq!(
            classify_child_stage_at(born(months_to_millis(400)), now()),
            ChildStage::Adolescence
        );
    }

    #[test]
    fn future_birth_is_newborn() {
        let dob = now() + Duration::days(30);
        assert_eq!(classify_child_stage_at(dob, now()), ChildStage::Newborn);
    }

    #[test]
    fn custom_thresholds_validated() {
        assert!(StageClassifier::try_with_thresholds(12, 36, 84, 156).is_ok());
        assert!(matches!(
            StageClassifier::try_with_thresholds(12, 12, 84, 156),
            Err(NurtureError::InvalidRequest(_))
        ));
        assert!(StageClassifier::try_with_thresholds(100, 36, 84, 156).is_err());
    }

    #[test]
    fn custom_thresholds_shift_boundaries() {
        let classifier =
            StageClassifier::try_with_thresholds(6, 24, 60, 144).expect("valid thresholds");
        assert_eq!(
            classifier.classify_at(born(months_to_millis(6)), now()),
            ChildStage::Toddler
        );
        assert_eq!(classifier.lower_bound_months(ChildStage::Toddler), Some(6));
    }

    #[test]
    fn default_lower_bounds() {
        let classifier = StageClassifier::default();
        let bounds: Vec<u32> = ChildStage::ALL
            .iter()
            .filter_map(|s| classifier.lower_bound_months(*s))
            .collect();
        assert_eq!(bounds, vec![12, 36, 84, 156]);
        assert_eq!(classifier.lower_bound_months(ChildStage::Newborn), None);
    }

    #[test]
    fn has_reached_is_inclusive() {
        let classifier = StageClassifier::new();
        let dob = born(months_to_millis(40));
        assert!(classifier.has_reached(dob, ChildStage::Toddler, now()));
        assert!(classifier.has_reached(dob, ChildStage::EarlyChildhood, now()));
        assert!(!classifier.has_reached(dob, ChildStage::SchoolAge, now()));
    }
}
