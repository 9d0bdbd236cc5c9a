//! # Transition Predictor
//!
//! Answers "is it time to show a stage-transition prompt". Read-only: the
//! caller decides whether to persist a new stage.
//!
//! Two checks are offered:
//!
//! - [`TransitionPredictor::check`] compares a stored stage with the stage
//!   the classifier assigns now. A mismatch means the threshold of the
//!   recomputed stage is already behind, so the remaining time clamps to 0.
//! - [`TransitionPredictor::upcoming`] looks ahead from the current stage to
//!   the next threshold and flags it once it falls inside the buffer. This is
//!   the advance notice shown before a birthday boundary is crossed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classifier::StageClassifier;
use crate::age::ChildAge;
use crate::primitives::{DEFAULT_BUFFER_DAYS, MS_PER_DAY};
use crate::types::ChildStage;

// =============================================================================
// TRANSITION CHECK
// =============================================================================

/// Result of a transition check.
///
/// When `should_transition` is false because nothing changed, both optional
/// fields are `None` and are omitted from the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionCheck {
    pub should_transition: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_stage: Option<ChildStage>,
    /// Whole days remaining before the threshold (floored).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_until_transition: Option<u32>,
}

impl TransitionCheck {
    /// No transition, no further detail.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            should_transition: false,
            next_stage: None,
            days_until_transition: None,
        }
    }

    /// Build a check from the milliseconds left before `next_stage` begins.
    fn toward(next_stage: ChildStage, remaining_millis: i64, buffer_days: u32) -> Self {
        let remaining = remaining_millis.max(0);
        let buffer_millis = (buffer_days as i64).saturating_mul(MS_PER_DAY);
        let days = remaining / MS_PER_DAY;

        Self {
            should_transition: remaining <= buffer_millis,
            next_stage: Some(next_stage),
            days_until_transition: Some(u32::try_from(days).unwrap_or(u32::MAX)),
        }
    }
}

// =============================================================================
// TRANSITION PREDICTOR
// =============================================================================

/// Transition Predictor - classifier plus an advance-notice buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPredictor {
    classifier: StageClassifier,
    buffer_days: u32,
}

impl Default for TransitionPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionPredictor {
    /// Standard thresholds, 14-day buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            classifier: StageClassifier::new(),
            buffer_days: DEFAULT_BUFFER_DAYS,
        }
    }

    /// Standard thresholds, custom buffer.
    #[must_use]
    pub const fn with_buffer_days(buffer_days: u32) -> Self {
        Self {
            classifier: StageClassifier::new(),
            buffer_days,
        }
    }

    /// Custom classifier and buffer.
    #[must_use]
    pub const fn with_classifier(classifier: StageClassifier, buffer_days: u32) -> Self {
        Self {
            classifier,
            buffer_days,
        }
    }

    #[must_use]
    pub const fn buffer_days(&self) -> u32 {
        self.buffer_days
    }

    /// Compare a stored stage with the stage assigned at `now`.
    ///
    /// - Same stage: [`TransitionCheck::none`].
    /// - Recomputed stage is `Newborn` (stored stage ahead of the clock):
    ///   there is no threshold to enter it, so also `none()`.
    /// - Otherwise the remaining time to the recomputed stage's lower bound,
    ///   clamped at zero, is compared with the buffer.
    #[must_use]
    pub fn check(
        &self,
        current_stage: ChildStage,
        date_of_birth: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> TransitionCheck {
        let age = ChildAge::between(date_of_birth, now);
        let computed = self.classifier.classify_age(age);

        if computed == current_stage {
            return TransitionCheck::none();
        }

        match self.classifier.lower_bound_months(computed) {
            Some(threshold) => TransitionCheck::toward(
                computed,
                age.millis_until_months(threshold),
                self.buffer_days,
            ),
            None => TransitionCheck::none(),
        }
    }

    /// Advance notice for the next stage boundary after the one at `now`.
    ///
    /// Reports the next stage and days remaining whenever a next stage exists;
    /// `should_transition` is set once the boundary is within the buffer.
    /// Adolescents have no next stage and get `none()`.
    #[must_use]
    pub fn upcoming(&self, date_of_birth: DateTime<Utc>, now: DateTime<Utc>) -> TransitionCheck {
        let age = ChildAge::between(date_of_birth, now);
        let current = self.classifier.classify_age(age);

        let Some(next) = current.next() else {
            return TransitionCheck::none();
        };
        match self.classifier.lower_bound_months(next) {
            Some(threshold) => TransitionCheck::toward(
                next,
                age.millis_until_months(threshold),
                self.buffer_days,
            ),
            None => TransitionCheck::none(),
        }
    }
}

// =============================================================================
// FREE FUNCTIONS
// =============================================================================

/// Transition check against the wall clock with the default 14-day buffer.
#[must_use]
pub fn should_transition_stage(
    current_stage: ChildStage,
    date_of_birth: DateTime<Utc>,
) -> TransitionCheck {
    TransitionPredictor::new().check(current_stage, date_of_birth, Utc::now())
}

/// Transition check with an explicit buffer and evaluation time.
#[must_use]
pub fn should_transition_stage_at(
    current_stage: ChildStage,
    date_of_birth: DateTime<Utc>,
    buffer_days: u32,
    now: DateTime<Utc>,
) -> TransitionCheck {
    TransitionPredictor::with_buffer_days(buffer_days).check(current_stage, date_of_birth, now)
}

/// Advance-notice check with an explicit buffer and evaluation time.
#[must_use]
pub fn upcoming_transition_at(
    date_of_birth: DateTime<Utc>,
    buffer_days: u32,
    now: DateTime<Utc>,
) -> TransitionCheck {
    TransitionPredictor::with_buffer_days(buffer_days).upcoming(date_of_birth, now)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::age::months_to_millis;
    use crate::primitives::AVERAGE_MONTH_MS;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 20, 9, 0, 0)
            .single()
            .expect("valid date")
    }

    fn born(millis_ago: i64) -> DateTime<Utc> {
        now() - Duration::milliseconds(millis_ago)
    }

    #[test]
    fn same_stage_is_none() {
        let dob = born(months_to_millis(20));
        let check = should_transition_stage_at(ChildStage::Toddler, dob, 14, now());
        assert_eq!(check, TransitionCheck::none());
    }

    #[test]
    fn stale_stage_transitions_immediately() {
        let dob = born(months_to_millis(13));
        let check = should_transition_stage_at(ChildStage::Newborn, dob, 14, now());
        assert!(check.should_transition);
        assert_eq!(check.next_stage, Some(ChildStage::Toddler));
        assert_eq!(check.days_until_transition, Some(0));
    }

    #[test]
    fn stale_stage_with_zero_buffer_still_transitions() {
        let dob = born(months_to_millis(90));
        let check = should_transition_stage_at(ChildStage::EarlyChildhood, dob, 0, now());
        assert!(check.should_transition);
        assert_eq!(check.next_stage, Some(ChildStage::SchoolAge));
    }

    #[test]
    fn backward_to_newborn_is_none() {
        let dob = born(months_to_millis(3));
        let check = should_transition_stage_at(ChildStage::Toddler, dob, 14, now());
        assert_eq!(check, TransitionCheck::none());
    }

    #[test]
    fn upcoming_within_buffer() {
        // 11.6 months old: 0.4 months (~12.2 days) before toddlerhood.
        let dob = born(AVERAGE_MONTH_MS * 116 / 10);
        let check = upcoming_transition_at(dob, 14, now());
        assert!(check.should_transition);
        assert_eq!(check.next_stage, Some(ChildStage::Toddler));
        assert_eq!(check.days_until_transition, Some(12));
    }

    #[test]
    fn upcoming_outside_buffer() {
        let dob = born(months_to_millis(6));
        let check = upcoming_transition_at(dob, 14, now());
        assert!(!check.should_transition);
        assert_eq!(check.next_stage, Some(ChildStage::Toddler));
        // 6 months * 30.44 days = 182.64 days
        assert_eq!(check.days_until_transition, Some(182));
    }

    #[test]
    fn upcoming_buffer_edge_is_inclusive() {
        let dob = born(months_to_millis(36) - 14 * MS_PER_DAY);
        let check = upcoming_transition_at(dob, 14, now());
        assert!(check.should_transition);
        assert_eq!(check.days_until_transition, Some(14));

        let earlier = born(months_to_millis(36) - 14 * MS_PER_DAY - 1);
        assert!(!upcoming_transition_at(earlier, 14, now()).should_transition);
    }

    #[test]
    fn upcoming_for_adolescent_is_none() {
        let dob = born(months_to_millis(200));
        assert_eq!(upcoming_transition_at(dob, 14, now()), TransitionCheck::none());
    }

    #[test]
    fn none_serializes_without_optional_fields() {
        let json = serde_json::to_string(&TransitionCheck::none()).expect("serialize");
        assert_eq!(json, r#"{"should_transition":false}"#);
    }

    #[test]
    fn custom_classifier_moves_upcoming_boundary() {
        let classifier =
            StageClassifier::try_with_thresholds(6, 24, 60, 144).expect("valid thresholds");
        let predictor = TransitionPredictor::with_classifier(classifier, 14);
        let dob = born(months_to_millis(6) - 10 * MS_PER_DAY);

        let check = predictor.upcoming(dob, now());
        assert!(check.should_transition);
        assert_eq!(check.next_stage, Some(ChildStage::Toddler));
        assert_eq!(check.days_until_transition, Some(10));

        // The standard thresholds put the same child months away.
        assert!(!upcoming_transition_at(dob, 14, now()).should_transition);
    }

    #[test]
    fn custom_classifier_drives_stored_stage_check() {
        let classifier =
            StageClassifier::try_with_thresholds(6, 24, 60, 144).expect("valid thresholds");
        let predictor = TransitionPredictor::with_classifier(classifier, 14);
        let dob = born(months_to_millis(7));

        let check = predictor.check(ChildStage::Newborn, dob, now());
        assert!(check.should_transition);
        assert_eq!(check.next_stage, Some(ChildStage::Toddler));
        assert_eq!(check.days_until_transition, Some(0));

        assert_eq!(
            should_transition_stage_at(ChildStage::Newborn, dob, 14, now()),
            TransitionCheck::none()
        );
    }

    #[test]
    fn predictor_defaults() {
        let predictor = TransitionPredictor::default();
        assert_eq!(predictor.buffer_days(), DEFAULT_BUFFER_DAYS);
    }
}
