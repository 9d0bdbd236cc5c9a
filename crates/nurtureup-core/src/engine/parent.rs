//! # Parent-Stage Resolver
//!
//! Derives the parent-facing stage of a family from its children.
//!
//! Two entry points exist and use different selection rules:
//!
//! - [`calculate_parent_stage`] picks the youngest child by raw birth date,
//!   then uses that child's stage (supplied or classified).
//! - [`get_parent_navigation_config`] picks the most junior stage by rank
//!   in the newborn → adolescence ordering.
//!
//! For consistent data they agree. They can diverge when a record carries a
//! pre-supplied `stage` that does not match its birth date. Both rules are
//! kept as-is; do not merge them without a product decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classifier::classify_child_stage_at;
use super::registry::{NavigationConfig, parent_stage_config};
use crate::types::{ChildStage, ParentStage};

// =============================================================================
// CHILD RECORD
// =============================================================================

/// The slice of a child the resolver consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRecord {
    pub date_of_birth: DateTime<Utc>,
    /// Stage already known to the caller, if any. Trusted as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<ChildStage>,
}

impl ChildRecord {
    /// A record with only a birth date.
    #[must_use]
    pub const fn new(date_of_birth: DateTime<Utc>) -> Self {
        Self {
            date_of_birth,
            stage: None,
        }
    }

    /// A record with a caller-supplied stage.
    #[must_use]
    pub const fn with_stage(date_of_birth: DateTime<Utc>, stage: ChildStage) -> Self {
        Self {
            date_of_birth,
            stage: Some(stage),
        }
    }

    /// Supplied stage, or the classifier's answer at `now`.
    #[must_use]
    pub fn stage_at(&self, now: DateTime<Utc>) -> ChildStage {
        self.stage
            .unwrap_or_else(|| classify_child_stage_at(self.date_of_birth, now))
    }
}

// =============================================================================
// CONTRACT A: BY BIRTH DATE
// =============================================================================

/// The child with the latest birth date. Ties keep the first record.
#[must_use]
pub fn youngest_child(children: &[ChildRecord]) -> Option<&ChildRecord> {
    children.iter().reduce(|youngest, child| {
        if child.date_of_birth > youngest.date_of_birth {
            child
        } else {
            youngest
        }
    })
}

/// Parent stage for a family, evaluated at the current wall-clock time.
#[must_use]
pub fn calculate_parent_stage(children: &[ChildRecord]) -> ParentStage {
    calculate_parent_stage_at(children, Utc::now())
}

/// Parent stage for a family, evaluated at `now`.
///
/// No children means the family is still planning (`TtcPregnancy`).
/// Otherwise the parent stage mirrors the youngest child by birth date.
#[must_use]
pub fn calculate_parent_stage_at(children: &[ChildRecord], now: DateTime<Utc>) -> ParentStage {
    match youngest_child(children) {
        Some(child) => ParentStage::from(child.stage_at(now)),
        None => ParentStage::TtcPregnancy,
    }
}

// =============================================================================
// CONTRACT B: BY STAGE RANK
// =============================================================================

/// The most junior stage in the newborn → adolescence ordering.
#[must_use]
pub fn most_junior_stage(stages: &[ChildStage]) -> Option<ChildStage> {
    stages.iter().copied().min_by_key(ChildStage::rank)
}

/// Parent stage selected for navigation: the most junior stage by rank,
/// or `TtcPregnancy` for an empty set.
#[must_use]
pub fn parent_navigation_stage(stages: &[ChildStage]) -> ParentStage {
    most_junior_stage(stages)
        .map(ParentStage::from)
        .unwrap_or(ParentStage::TtcPregnancy)
}

/// Parent navigation for a set of child stages.
///
/// Uses the most junior stage by rank, not the youngest birth date; see the
/// module docs. An empty set yields the planning-stage navigation.
#[must_use]
pub fn get_parent_navigation_config(stages: &[ChildStage]) -> &'static NavigationConfig {
    &parent_stage_config(parent_navigation_stage(stages)).navigation
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
        Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0)
            .single()
            .expect("valid date")
    }

    fn born_months_ago(months: u32) -> DateTime<Utc> {
        now() - Duration::milliseconds(months_to_millis(months))
    }

    #[test]
    fn empty_family_is_planning() {
        assert_eq!(
            calculate_parent_stage_at(&[], now()),
            ParentStage::TtcPregnancy
        );
    }

    #[test]
    fn youngest_by_birth_date_wins() {
        let children = [
            ChildRecord::new(born_months_ago(170)),
            ChildRecord::new(born_months_ago(5)),
            ChildRecord::new(born_months_ago(50)),
        ];
        assert_eq!(
            calculate_parent_stage_at(&children, now()),
            ParentStage::NewbornInfant
        );
        assert_eq!(
            youngest_child(&children).map(|c| c.date_of_birth),
            Some(born_months_ago(5))
        );
    }

    #[test]
    fn supplied_stage_is_trusted() {
        // Inconsistent on purpose: a 5-month-old recorded as school-age.
        let children = [
            ChildRecord::new(born_months_ago(40)),
            ChildRecord::with_stage(born_months_ago(5), ChildStage::SchoolAge),
        ];
        assert_eq!(
            calculate_parent_stage_at(&children, now()),
            ParentStage::SchoolAge
        );
    }

    #[test]
    fn rules_diverge_on_inconsistent_stage() {
        let children = [
            ChildRecord::new(born_months_ago(40)),
            ChildRecord::with_stage(born_months_ago(5), ChildStage::SchoolAge),
        ];
        let stages: Vec<ChildStage> = children.iter().map(|c| c.stage_at(now())).collect();

        assert_eq!(
            calculate_parent_stage_at(&children, now()),
            ParentStage::SchoolAge
        );
        assert_eq!(
            get_parent_navigation_config(&stages),
            &parent_stage_config(ParentStage::EarlyChildhood).navigation
        );
    }

    #[test]
    fn most_junior_by_rank() {
        let stages = [
            ChildStage::SchoolAge,
            ChildStage::Newborn,
            ChildStage::Adolescence,
        ];
        assert_eq!(most_junior_stage(&stages), Some(ChildStage::Newborn));
        assert_eq!(most_junior_stage(&[]), None);

        let ids: Vec<_> = get_parent_navigation_config(&stages).tab_ids().collect();
        assert_eq!(ids, vec!["home", "log", "growth", "profile"]);
    }

    #[test]
    fn navigation_stage_matches_navigation_config() {
        let stages = [ChildStage::Adolescence, ChildStage::Toddler];
        assert_eq!(parent_navigation_stage(&stages), ParentStage::Toddler);
        assert_eq!(parent_navigation_stage(&[]), ParentStage::TtcPregnancy);

        for stage in ChildStage::ALL {
            let set = [ChildStage::Adolescence, stage];
            assert_eq!(
                get_parent_navigation_config(&set),
                &parent_stage_config(parent_navigation_stage(&set)).navigation
            );
        }
    }

    #[test]
    fn empty_stages_get_planning_navigation() {
        assert_eq!(
            get_parent_navigation_config(&[]),
            &parent_stage_config(ParentStage::TtcPregnancy).navigation
        );
    }
}
