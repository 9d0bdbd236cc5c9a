//! # Stage Registry
//!
//! Static table of display metadata, features and navigation per stage.
//!
//! Every `ChildStage` and every `ParentStage` has exactly one entry. The
//! child/parent twins (`early-childhood` / `early_childhood`, `school-age` /
//! `school_age`, and the identically spelled `toddler` and `adolescence`)
//! resolve to the same payload. `newborn_infant` has its own parent-facing
//! copy but shares the newborn navigation.
//!
//! The table is compile-time data and is never mutated.

use serde::Serialize;

use crate::primitives::DEFAULT_PRIMARY_COLOR;
use crate::types::{ChildStage, ParentStage, StageKey, UiTheme};

// =============================================================================
// CONFIG TYPES
// =============================================================================

/// One navigation tab. Tabs are authored in ascending `order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabConfig {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub order: u8,
}

/// A gesture binding available on a stage's dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GestureConfig {
    pub gesture: &'static str,
    pub action: &'static str,
    pub description: &'static str,
}

/// Ordered tabs plus gesture bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationConfig {
    pub tabs: &'static [TabConfig],
    pub gestures: &'static [GestureConfig],
}

impl NavigationConfig {
    /// Tab ids in display order.
    pub fn tab_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tabs.iter().map(|tab| tab.id)
    }
}

/// Registry entry for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageConfig {
    pub name: &'static str,
    pub description: &'static str,
    pub age_range: &'static str,
    pub primary_color: &'static str,
    pub ui_theme: UiTheme,
    pub features: &'static [&'static str],
    pub navigation: NavigationConfig,
}

/// Theme tokens derived from a registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageTheme {
    pub primary_color: &'static str,
    pub stage: String,
    pub ui_theme: UiTheme,
}

// =============================================================================
// LOOKUPS
// =============================================================================

/// Registry entry for a key. Total over the closed key set.
#[must_use]
pub fn stage_config(key: StageKey) -> &'static StageConfig {
    match key {
        StageKey::Child(stage) => child_stage_config(stage),
        StageKey::Parent(stage) => parent_stage_config(stage),
    }
}

/// Registry entry for a child stage.
#[must_use]
pub fn child_stage_config(stage: ChildStage) -> &'static StageConfig {
    match stage {
        ChildStage::Newborn => &NEWBORN,
        ChildStage::Toddler => &TODDLER,
        ChildStage::EarlyChildhood => &EARLY_CHILDHOOD,
        ChildStage::SchoolAge => &SCHOOL_AGE,
        ChildStage::Adolescence => &ADOLESCENCE,
    }
}

/// Registry entry for a parent stage.
#[must_use]
pub fn parent_stage_config(stage: ParentStage) -> &'static StageConfig {
    match stage {
        ParentStage::TtcPregnancy => &TTC_PREGNANCY,
        ParentStage::NewbornInfant => &NEWBORN_INFANT,
        ParentStage::Toddler => &TODDLER,
        ParentStage::EarlyChildhood => &EARLY_CHILDHOOD,
        ParentStage::SchoolAge => &SCHOOL_AGE,
        ParentStage::Adolescence => &ADOLESCENCE,
    }
}

/// Look up a stage by wire id. `None` only for an unrecognized id.
#[must_use]
pub fn get_stage_config(id: &str) -> Option<&'static StageConfig> {
    id.parse::<StageKey>().ok().map(stage_config)
}

/// Theme for a stage id, falling back to the default blue parent theme
/// when the id misses the registry.
#[must_use]
pub fn get_stage_theme(id: &str) -> StageTheme {
    match get_stage_config(id) {
        Some(config) => StageTheme {
            primary_color: config.primary_color,
            stage: id.to_string(),
            ui_theme: config.ui_theme,
        },
        None => StageTheme {
            primary_color: DEFAULT_PRIMARY_COLOR,
            stage: id.to_string(),
            ui_theme: UiTheme::Parent,
        },
    }
}

/// Navigation shown on a child's own dashboard.
#[must_use]
pub fn get_child_navigation_config(stage: ChildStage) -> &'static NavigationConfig {
    &child_stage_config(stage).navigation
}

/// Distinct wire ids present in the registry, child ids first.
pub fn registry_ids() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = Vec::with_capacity(StageKey::ALL.len());
    for key in StageKey::ALL {
        let id = key.as_str();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

// =============================================================================
// REGISTRY DATA
// =============================================================================

const fn tab(id: &'static str, label: &'static str, icon: &'static str, order: u8) -> TabConfig {
    TabConfig {
        id,
        label,
        icon,
        order,
    }
}

const fn gesture(
    gesture: &'static str,
    action: &'static str,
    description: &'static str,
) -> GestureConfig {
    GestureConfig {
        gesture,
        action,
        description,
    }
}

static TTC_PREGNANCY: StageConfig = StageConfig {
    name: "Planning & Pregnancy",
    description: "Preparing for a new arrival: cycle tracking, appointments and a nursery checklist.",
    age_range: "Before birth",
    primary_color: "#E88AA8",
    ui_theme: UiTheme::Parent,
    features: &[
        "Pregnancy week tracker",
        "Appointment reminders",
        "Symptom journal",
        "Baby preparation checklist",
    ],
    navigation: NavigationConfig {
        tabs: &[
            tab("home", "Home", "home", 1),
            tab("tracker", "Tracker", "calendar", 2),
            tab("journal", "Journal", "book-open", 3),
            tab("resources", "Resources", "bookmark", 4),
            tab("profile", "Profile", "user", 5),
        ],
        gestures: &[
            gesture("swipe-right", "log_symptom", "Swipe right to log a symptom"),
            gesture("long-press", "add_appointment", "Long press to add an appointment"),
        ],
    },
};

const NEWBORN_NAVIGATION: NavigationConfig = NavigationConfig {
    tabs: &[
        tab("home", "Home", "home", 1),
        tab("log", "Log", "clipboard", 2),
        tab("growth", "Growth", "trending-up", 3),
        tab("profile", "Profile", "user", 4),
    ],
    gestures: &[
        gesture("swipe-right", "log_feeding", "Swipe right to log a feeding"),
        gesture("double-tap", "log_diaper", "Double tap to log a diaper change"),
        gesture("long-press", "start_sleep_timer", "Long press to start the sleep timer"),
    ],
};

static NEWBORN: StageConfig = StageConfig {
    name: "Newborn",
    description: "The first year: feeding, sleep and growth tracking with health milestones.",
    age_range: "0-12 months",
    primary_color: "#F7A8B8",
    ui_theme: UiTheme::Parent,
    features: &[
        "Feeding log",
        "Sleep tracking",
        "Diaper log",
        "Growth charts",
        "Vaccination schedule",
    ],
    navigation: NEWBORN_NAVIGATION,
};

static NEWBORN_INFANT: StageConfig = StageConfig {
    name: "New Parent",
    description: "Support for parents of a baby under one: routines, recovery and health checkups.",
    age_range: "0-12 months",
    primary_color: "#F7A8B8",
    ui_theme: UiTheme::Parent,
    features: &[
        "Feeding log",
        "Sleep tracking",
        "Health checkup reminders",
        "Parent recovery tips",
    ],
    navigation: NEWBORN_NAVIGATION,
};

static TODDLER: StageConfig = StageConfig {
    name: "Toddler",
    description: "First steps and first words: routines, developmental milestones and simple rewards.",
    age_range: "1-3 years",
    primary_color: "#FFB347",
    ui_theme: UiTheme::Parent,
    features: &[
        "Daily routine builder",
        "Milestone tracker",
        "Sticker rewards",
        "Potty training log",
    ],
    navigation: NavigationConfig {
        tabs: &[
            tab("home", "Home", "home", 1),
            tab("routine", "Routine", "sun", 2),
            tab("milestones", "Milestones", "flag", 3),
            tab("rewards", "Rewards", "star", 4),
            tab("profile", "Profile", "user", 5),
        ],
        gestures: &[
            gesture("swipe-left", "next_activity", "Swipe left for the next routine step"),
            gesture("tap-hold", "celebrate", "Tap and hold to celebrate a milestone"),
        ],
    },
};

static EARLY_CHILDHOOD: StageConfig = StageConfig {
    name: "Early Childhood",
    description: "Preschool and early grades: first chores, learning games and a reward chart.",
    age_range: "3-7 years",
    primary_color: "#7ED957",
    ui_theme: UiTheme::Child,
    features: &[
        "Picture chore chart",
        "Reward store",
        "Learning activities",
        "Badge collection",
    ],
    navigation: NavigationConfig {
        tabs: &[
            tab("home", "Home", "home", 1),
            tab("chores", "Chores", "check-square", 2),
            tab("rewards", "Rewards", "gift", 3),
            tab("learn", "Learn", "book", 4),
            tab("profile", "Profile", "smile", 5),
        ],
        gestures: &[
            gesture("swipe-right", "complete_chore", "Swipe right to finish a chore"),
            gesture("shake", "surprise_reward", "Shake for a surprise reward"),
        ],
    },
};

static SCHOOL_AGE: StageConfig = StageConfig {
    name: "School Age",
    description: "Growing independence: tasks, homework planning, points and screen-time balance.",
    age_range: "7-13 years",
    primary_color: "#5B7FFF",
    ui_theme: UiTheme::Child,
    features: &[
        "Task list with points",
        "Homework planner",
        "Reward redemption",
        "Screen time balance",
        "Badges and streaks",
    ],
    navigation: NavigationConfig {
        tabs: &[
            tab("home", "Home", "home", 1),
            tab("tasks", "Tasks", "check-square", 2),
            tab("homework", "Homework", "edit", 3),
            tab("rewards", "Rewards", "award", 4),
            tab("profile", "Profile", "user", 5),
        ],
        gestures: &[
            gesture("swipe-right", "complete_task", "Swipe right to complete a task"),
            gesture("swipe-left", "snooze_task", "Swipe left to snooze a task"),
            gesture("pull-down", "refresh_points", "Pull down to refresh points"),
        ],
    },
};

static ADOLESCENCE: StageConfig = StageConfig {
    name: "Adolescence",
    description: "Teen years: personal goals, schedules, self-managed screen time and allowances.",
    age_range: "13+ years",
    primary_color: "#8E6CEF",
    ui_theme: UiTheme::Child,
    features: &[
        "Goal setting",
        "Shared family calendar",
        "Screen time self-management",
        "Allowance tracking",
    ],
    navigation: NavigationConfig {
        tabs: &[
            tab("home", "Home", "home", 1),
            tab("goals", "Goals", "target", 2),
            tab("schedule", "Schedule", "calendar", 3),
            tab("screen_time", "Screen Time", "smartphone", 4),
            tab("profile", "Profile", "user", 5),
        ],
        gestures: &[
            gesture("swipe-right", "complete_goal_step", "Swipe right to check off a goal step"),
            gesture("long-press", "request_screen_time", "Long press to request extra screen time"),
        ],
    },
};

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_an_entry() {
        for key in StageKey::ALL {
            assert!(get_stage_config(key.as_str()).is_some(), "{}", key);
        }
    }

    #[test]
    fn unknown_key_misses() {
        assert!(get_stage_config("infant").is_none());
        assert!(get_stage_config("").is_none());
    }

    #[test]
    fn twins_share_payload() {
        let pairs = [
            ("early-childhood", "early_childhood"),
            ("school-age", "school_age"),
        ];
        for (child, parent) in pairs {
            assert_eq!(get_stage_config(child), get_stage_config(parent));
        }
        for stage in ChildStage::ALL {
            if stage == ChildStage::Newborn {
                continue;
            }
            assert!(std::ptr::eq(
                child_stage_config(stage),
                parent_stage_config(ParentStage::from(stage))
            ));
        }
    }

    #[test]
    fn newborn_tab_ids() {
        let ids: Vec<_> = get_child_navigation_config(ChildStage::Newborn)
            .tab_ids()
            .collect();
        assert_eq!(ids, vec!["home", "log", "growth", "profile"]);
        assert_eq!(
            parent_stage_config(ParentStage::NewbornInfant).navigation,
            NEWBORN_NAVIGATION
        );
    }

    #[test]
    fn theme_from_registry() {
        let theme = get_stage_theme("toddler");
        assert_eq!(theme.primary_color, "#FFB347");
        assert_eq!(theme.stage, "toddler");
        assert_eq!(theme.ui_theme, UiTheme::Parent);
    }

    #[test]
    fn theme_falls_back_on_miss() {
        let theme = get_stage_theme("preteen");
        assert_eq!(theme.primary_color, "#4F8EF7");
        assert_eq!(theme.stage, "preteen");
        assert_eq!(theme.ui_theme, UiTheme::Parent);
    }

    #[test]
    fn registry_ids_are_distinct() {
        let ids = registry_ids();
        assert_eq!(ids.len(), 9);
        assert_eq!(ids[0], "newborn");
        assert!(ids.contains(&"ttc_pregnancy"));
    }
}
