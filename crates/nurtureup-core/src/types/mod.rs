//! # Core Type Definitions
//!
//! This module contains the closed vocabulary of the stage engine:
//! - Child developmental stages (`ChildStage`)
//! - Parent-facing UI stages (`ParentStage`)
//! - Registry keys spanning both spaces (`StageKey`)
//! - UI theme tag (`UiTheme`)
//! - Error types (`NurtureError`)
//!
//! ## Two Stage Spaces
//!
//! `ChildStage` and `ParentStage` are kept as distinct enums. The parent UI
//! mirrors the stage of a child, but it is a separate presentational concept,
//! and `ParentStage::TtcPregnancy` has no child-side counterpart at all.
//! The only bridge between them is the total `From<ChildStage>` mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// CHILD STAGE
// =============================================================================

/// Developmental stage of a child, totally ordered by age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChildStage {
    /// 0 to 12 months.
    Newborn,
    /// 12 to 36 months.
    Toddler,
    /// 3 to 7 years.
    EarlyChildhood,
    /// 7 to 13 years.
    SchoolAge,
    /// 13 years and up.
    Adolescence,
}

impl ChildStage {
    /// All stages, youngest first.
    pub const ALL: [ChildStage; 5] = [
        ChildStage::Newborn,
        ChildStage::Toddler,
        ChildStage::EarlyChildhood,
        ChildStage::SchoolAge,
        ChildStage::Adolescence,
    ];

    /// Get the wire identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChildStage::Newborn => "newborn",
            ChildStage::Toddler => "toddler",
            ChildStage::EarlyChildhood => "early-childhood",
            ChildStage::SchoolAge => "school-age",
            ChildStage::Adolescence => "adolescence",
        }
    }

    /// Position in the newborn → adolescence ordering (0 is most junior).
    #[must_use]
    pub const fn rank(&self) -> usize {
        match self {
            ChildStage::Newborn => 0,
            ChildStage::Toddler => 1,
            ChildStage::EarlyChildhood => 2,
            ChildStage::SchoolAge => 3,
            ChildStage::Adolescence => 4,
        }
    }

    /// Get the next stage, if any.
    #[must_use]
    pub const fn next(&self) -> Option<ChildStage> {
        match self {
            ChildStage::Newborn => Some(ChildStage::Toddler),
            ChildStage::Toddler => Some(ChildStage::EarlyChildhood),
            ChildStage::EarlyChildhood => Some(ChildStage::SchoolAge),
            ChildStage::SchoolAge => Some(ChildStage::Adolescence),
            ChildStage::Adolescence => None,
        }
    }

    /// Get the previous stage, if any.
    #[must_use]
    pub const fn previous(&self) -> Option<ChildStage> {
        match self {
            ChildStage::Newborn => None,
            ChildStage::Toddler => Some(ChildStage::Newborn),
            ChildStage::EarlyChildhood => Some(ChildStage::Toddler),
            ChildStage::SchoolAge => Some(ChildStage::EarlyChildhood),
            ChildStage::Adolescence => Some(ChildStage::SchoolAge),
        }
    }
}

impl fmt::Display for ChildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChildStage {
    type Err = NurtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChildStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| NurtureError::UnknownStage(s.to_string()))
    }
}

// =============================================================================
// PARENT STAGE
// =============================================================================

/// Parent-facing UI stage.
///
/// Mirrors `ChildStage` one-to-one except for `TtcPregnancy`, which stands
/// for a family with no children yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentStage {
    TtcPregnancy,
    NewbornInfant,
    Toddler,
    EarlyChildhood,
    SchoolAge,
    Adolescence,
}

impl ParentStage {
    /// All parent stages, planning stage first.
    pub const ALL: [ParentStage; 6] = [
        ParentStage::TtcPregnancy,
        ParentStage::NewbornInfant,
        ParentStage::Toddler,
        ParentStage::EarlyChildhood,
        ParentStage::SchoolAge,
        ParentStage::Adolescence,
    ];

    /// Get the wire identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ParentStage::TtcPregnancy => "ttc_pregnancy",
            ParentStage::NewbornInfant => "newborn_infant",
            ParentStage::Toddler => "toddler",
            ParentStage::EarlyChildhood => "early_childhood",
            ParentStage::SchoolAge => "school_age",
            ParentStage::Adolescence => "adolescence",
        }
    }

    /// The child stage this parent stage mirrors, if any.
    #[must_use]
    pub const fn child_counterpart(&self) -> Option<ChildStage> {
        match self {
            ParentStage::TtcPregnancy => None,
            ParentStage::NewbornInfant => Some(ChildStage::Newborn),
            ParentStage::Toddler => Some(ChildStage::Toddler),
            ParentStage::EarlyChildhood => Some(ChildStage::EarlyChildhood),
            ParentStage::SchoolAge => Some(ChildStage::SchoolAge),
            ParentStage::Adolescence => Some(ChildStage::Adolescence),
        }
    }
}

impl From<ChildStage> for ParentStage {
    fn from(stage: ChildStage) -> Self {
        match stage {
            ChildStage::Newborn => ParentStage::NewbornInfant,
            ChildStage::Toddler => ParentStage::Toddler,
            ChildStage::EarlyChildhood => ParentStage::EarlyChildhood,
            ChildStage::SchoolAge => ParentStage::SchoolAge,
            ChildStage::Adolescence => ParentStage::Adolescence,
        }
    }
}

impl fmt::Display for ParentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParentStage {
    type Err = NurtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParentStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| NurtureError::UnknownStage(s.to_string()))
    }
}

// =============================================================================
// STAGE KEY
// =============================================================================

/// A key into the stage registry: either naming scheme.
///
/// `toddler` and `adolescence` are spelled the same in both spaces; they
/// parse as child keys. Both resolve to the same registry payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKey {
    Child(ChildStage),
    Parent(ParentStage),
}

impl StageKey {
    /// Every enum value of both spaces, child keys first.
    ///
    /// `toddler` and `adolescence` share their spelling across the two
    /// spaces, so these eleven keys cover nine distinct wire ids.
    pub const ALL: [StageKey; 11] = [
        StageKey::Child(ChildStage::Newborn),
        StageKey::Child(ChildStage::Toddler),
        StageKey::Child(ChildStage::EarlyChildhood),
        StageKey::Child(ChildStage::SchoolAge),
        StageKey::Child(ChildStage::Adolescence),
        StageKey::Parent(ParentStage::TtcPregnancy),
        StageKey::Parent(ParentStage::NewbornInfant),
        StageKey::Parent(ParentStage::Toddler),
        StageKey::Parent(ParentStage::EarlyChildhood),
        StageKey::Parent(ParentStage::SchoolAge),
        StageKey::Parent(ParentStage::Adolescence),
    ];

    /// Get the wire identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            StageKey::Child(stage) => stage.as_str(),
            StageKey::Parent(stage) => stage.as_str(),
        }
    }
}

impl From<ChildStage> for StageKey {
    fn from(stage: ChildStage) -> Self {
        StageKey::Child(stage)
    }
}

impl From<ParentStage> for StageKey {
    fn from(stage: ParentStage) -> Self {
        StageKey::Parent(stage)
    }
}

impl fmt::Display for StageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StageKey {
    type Err = NurtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<ChildStage>()
            .map(StageKey::Child)
            .or_else(|_| s.parse::<ParentStage>().map(StageKey::Parent))
    }
}

// =============================================================================
// UI THEME
// =============================================================================

/// Who primarily drives the UI for a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiTheme {
    Child,
    Parent,
}

impl UiTheme {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            UiTheme::Child => "child",
            UiTheme::Parent => "parent",
        }
    }
}

impl fmt::Display for UiTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur around the stage engine.
///
/// The engine operations are total; these errors only come from parsing
/// external input, validating requests, or loading configuration.
#[derive(Debug, Error)]
pub enum NurtureError {
    /// A date could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A stage identifier is not one of the known keys.
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    /// A request violated an input limit.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_stage_ordering() {
        assert!(ChildStage::Newborn < ChildStage::Toddler);
        assert!(ChildStage::Toddler < ChildStage::EarlyChildhood);
        assert!(ChildStage::EarlyChildhood < ChildStage::SchoolAge);
        assert!(ChildStage::SchoolAge < ChildStage::Adolescence);
    }

    #[test]
    fn rank_matches_ordering() {
        for pair in ChildStage::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].previous(), Some(pair[0]));
        }
    }

    #[test]
    fn wire_ids_round_trip() {
        for stage in ChildStage::ALL {
            assert_eq!(stage.as_str().parse::<ChildStage>().expect("parse"), stage);
        }
        for stage in ParentStage::ALL {
            assert_eq!(stage.as_str().parse::<ParentStage>().expect("parse"), stage);
        }
    }

    #[test]
    fn serde_uses_wire_ids() {
        let json = serde_json::to_string(&ChildStage::EarlyChildhood).expect("serialize");
        assert_eq!(json, "\"early-childhood\"");

        let json = serde_json::to_string(&ParentStage::TtcPregnancy).expect("serialize");
        assert_eq!(json, "\"ttc_pregnancy\"");
    }

    #[test]
    fn child_to_parent_mapping() {
        assert_eq!(
            ParentStage::from(ChildStage::Newborn),
            ParentStage::NewbornInfant
        );
        assert_eq!(
            ParentStage::from(ChildStage::SchoolAge),
            ParentStage::SchoolAge
        );
        for stage in ChildStage::ALL {
            assert_eq!(ParentStage::from(stage).child_counterpart(), Some(stage));
        }
        assert_eq!(ParentStage::TtcPregnancy.child_counterpart(), None);
    }

    #[test]
    fn stage_key_parses_both_schemes() {
        assert_eq!(
            "early-childhood".parse::<StageKey>().expect("parse"),
            StageKey::Child(ChildStage::EarlyChildhood)
        );
        assert_eq!(
            "early_childhood".parse::<StageKey>().expect("parse"),
            StageKey::Parent(ParentStage::EarlyChildhood)
        );
        assert!(matches!(
            "teenager".parse::<StageKey>(),
            Err(NurtureError::UnknownStage(_))
        ));
    }
}
