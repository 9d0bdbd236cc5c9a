//! # Property-Based Tests
//!
//! Invariants of the stage engine checked with proptest.

use chrono::{DateTime, Duration, TimeZone, Utc};
use nurtureup_core::age::months_to_millis;
use nurtureup_core::{
    ChildRecord, ChildStage, ParentStage, TransitionCheck, calculate_parent_stage_at,
    classify_child_stage_at, format_child_age_at, get_parent_navigation_config,
    should_transition_stage_at, upcoming_transition_at,
};
use proptest::prelude::*;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0)
        .single()
        .expect("valid date")
}

/// Ages from birth to 25 years, in milliseconds.
fn age_millis() -> impl Strategy<Value = i64> {
    0i64..months_to_millis(300)
}

fn any_stage() -> impl Strategy<Value = ChildStage> {
    prop::sample::select(ChildStage::ALL.to_vec())
}

proptest! {
    /// An older child is never in a more junior stage.
    #[test]
    fn classification_is_monotonic(a in age_millis(), b in age_millis()) {
        let (older, younger) = if a >= b { (a, b) } else { (b, a) };
        let now = fixed_now();
        let older_stage = classify_child_stage_at(now - Duration::milliseconds(older), now);
        let younger_stage = classify_child_stage_at(now - Duration::milliseconds(younger), now);
        prop_assert!(older_stage >= younger_stage);
    }

    /// A stage that matches the classifier never prompts.
    #[test]
    fn matching_stage_never_prompts(age in age_millis(), buffer in 0u32..365) {
        let now = fixed_now();
        let dob = now - Duration::milliseconds(age);
        let stage = classify_child_stage_at(dob, now);
        prop_assert_eq!(
            should_transition_stage_at(stage, dob, buffer, now),
            TransitionCheck::none()
        );
    }

    /// A mismatch toward an older stage always prompts with zero days left.
    #[test]
    fn stale_stage_always_prompts(age in age_millis(), stored in any_stage(), buffer in 0u32..365) {
        let now = fixed_now();
        let dob = now - Duration::milliseconds(age);
        let computed = classify_child_stage_at(dob, now);
        prop_assume!(stored != computed && computed != ChildStage::Newborn);

        let check = should_transition_stage_at(stored, dob, buffer, now);
        prop_assert!(check.should_transition);
        prop_assert_eq!(check.next_stage, Some(computed));
        prop_assert_eq!(check.days_until_transition, Some(0));
    }

    /// Advance notice always names the stage after the current one.
    #[test]
    fn upcoming_names_next_stage(age in age_millis(), buffer in 0u32..365) {
        let now = fixed_now();
        let dob = now - Duration::milliseconds(age);
        let current = classify_child_stage_at(dob, now);
        let check = upcoming_transition_at(dob, buffer, now);
        prop_assert_eq!(check.next_stage, current.next());
        if let Some(days) = check.days_until_transition {
            if check.should_transition {
                prop_assert!(days <= buffer);
            }
        }
    }

    /// Parent stage mirrors the child with the latest birth date.
    #[test]
    fn parent_stage_mirrors_youngest(ages in prop::collection::vec(age_millis(), 1..8)) {
        let now = fixed_now();
        let children: Vec<ChildRecord> = ages
            .iter()
            .map(|a| ChildRecord::new(now - Duration::milliseconds(*a)))
            .collect();
        let youngest_age = ages.iter().copied().min().unwrap_or_default();
        let expected = ParentStage::from(
            classify_child_stage_at(now - Duration::milliseconds(youngest_age), now),
        );
        prop_assert_eq!(calculate_parent_stage_at(&children, now), expected);
    }

    /// For consistent data both parent selection rules agree.
    #[test]
    fn selection_rules_agree_on_consistent_data(ages in prop::collection::vec(age_millis(), 1..8)) {
        let now = fixed_now();
        let children: Vec<ChildRecord> = ages
            .iter()
            .map(|a| ChildRecord::new(now - Duration::milliseconds(*a)))
            .collect();
        let stages: Vec<ChildStage> = children.iter().map(|c| c.stage_at(now)).collect();

        let by_birth = calculate_parent_stage_at(&children, now);
        let by_rank = get_parent_navigation_config(&stages);
        prop_assert_eq!(
            &nurtureup_core::engine::parent_stage_config(by_birth).navigation,
            by_rank
        );
    }

    /// Age labels are never empty.
    #[test]
    fn age_label_non_empty(age in age_millis()) {
        let now = fixed_now();
        let label = format_child_age_at(now - Duration::milliseconds(age), now);
        prop_assert!(!label.is_empty());
    }
}
