//! # nurtureup-core
//!
//! The developmental stage engine for NurtureUp - THE ENGINE.
//!
//! Dashboard pages ask this crate four questions about a family:
//! - Which stage is this child in? (`classify_child_stage`)
//! - What tabs, gestures and colours belong to that stage? (`get_stage_config`)
//! - Which parent hub should the family see? (`calculate_parent_stage`)
//! - Is a stage change coming up? (`should_transition_stage`)
//!
//! ## Architectural Constraints
//!
//! - Pure: no I/O, no async, no shared mutable state
//! - Integer-only: ages are milliseconds, months are exactly 30.44 days
//! - Static: the registry is compile-time data, safe to share across threads
//!
//! Every `*_at` variant takes the evaluation instant explicitly; the plain
//! variants read the wall clock.

// =============================================================================
// MODULES
// =============================================================================

pub mod age;
pub mod engine;
pub mod primitives;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{ChildStage, NurtureError, ParentStage, StageKey, UiTheme};

// =============================================================================
// RE-EXPORTS: Age
// =============================================================================

pub use age::{ChildAge, format_child_age, format_child_age_at, parse_date_of_birth};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use engine::{
    ChildRecord, GestureConfig, NavigationConfig, StageClassifier, StageConfig, StageTheme,
    TabConfig, TransitionCheck, TransitionPredictor, calculate_parent_stage,
    calculate_parent_stage_at, classify_child_stage, classify_child_stage_at,
    get_child_navigation_config, get_parent_navigation_config, get_stage_config, get_stage_theme,
    should_transition_stage, should_transition_stage_at, upcoming_transition_at,
};
