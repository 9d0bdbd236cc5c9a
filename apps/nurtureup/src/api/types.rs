//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Dates travel as strings (`2023-01-15` or RFC 3339) and are parsed at the
//! API boundary. Every request may carry `as_of` to pin the evaluation
//! instant; without it the wall clock is used.

use chrono::{DateTime, Utc};
use nurtureup_core::{
    ChildRecord, ChildStage, GestureConfig, NavigationConfig, NurtureError, ParentStage,
    StageConfig, StageTheme, TabConfig, TransitionCheck, parse_date_of_birth,
    primitives::{MAX_BUFFER_DAYS, MAX_FAMILY_SIZE},
};
use serde::{Deserialize, Serialize};

/// Resolve the optional `as_of` field to an evaluation instant.
pub fn resolve_as_of(as_of: Option<&str>) -> Result<DateTime<Utc>, NurtureError> {
    match as_of {
        Some(value) => parse_date_of_birth(value),
        None => Ok(Utc::now()),
    }
}

fn validate_buffer_days(buffer_days: Option<u32>, default: u32) -> Result<u32, NurtureError> {
    let days = buffer_days.unwrap_or(default);
    if days > MAX_BUFFER_DAYS {
        return Err(NurtureError::InvalidRequest(format!(
            "buffer_days {} exceeds maximum {}",
            days, MAX_BUFFER_DAYS
        )));
    }
    Ok(days)
}

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// REGISTRY JSON
// =============================================================================

/// Tab JSON representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabJson {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub order: u8,
}

impl From<&TabConfig> for TabJson {
    fn from(tab: &TabConfig) -> Self {
        Self {
            id: tab.id.to_string(),
            label: tab.label.to_string(),
            icon: tab.icon.to_string(),
            order: tab.order,
        }
    }
}

/// Gesture JSON representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureJson {
    pub gesture: String,
    pub action: String,
    pub description: String,
}

impl From<&GestureConfig> for GestureJson {
    fn from(gesture: &GestureConfig) -> Self {
        Self {
            gesture: gesture.gesture.to_string(),
            action: gesture.action.to_string(),
            description: gesture.description.to_string(),
        }
    }
}

/// Navigation JSON representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationJson {
    pub tabs: Vec<TabJson>,
    pub gestures: Vec<GestureJson>,
}

impl From<&NavigationConfig> for NavigationJson {
    fn from(nav: &NavigationConfig) -> Self {
        Self {
            tabs: nav.tabs.iter().map(TabJson::from).collect(),
            gestures: nav.gestures.iter().map(GestureJson::from).collect(),
        }
    }
}

/// Stage config JSON representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfigJson {
    pub name: String,
    pub description: String,
    pub age_range: String,
    pub primary_color: String,
    pub ui_theme: String,
    pub features: Vec<String>,
    pub navigation: NavigationJson,
}

impl From<&StageConfig> for StageConfigJson {
    fn from(config: &StageConfig) -> Self {
        Self {
            name: config.name.to_string(),
            description: config.description.to_string(),
            age_range: config.age_range.to_string(),
            primary_color: config.primary_color.to_string(),
            ui_theme: config.ui_theme.as_str().to_string(),
            features: config.features.iter().map(|f| (*f).to_string()).collect(),
            navigation: NavigationJson::from(&config.navigation),
        }
    }
}

// =============================================================================
// STAGE RESPONSES
// =============================================================================

/// Registry id listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageListResponse {
    pub stages: Vec<String>,
}

/// Registry entry lookup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfigResponse {
    pub success: bool,
    pub stage: String,
    pub config: Option<StageConfigJson>,
    pub error: Option<String>,
}

impl StageConfigResponse {
    pub fn found(stage: impl Into<String>, config: &StageConfig) -> Self {
        Self {
            success: true,
            stage: stage.into(),
            config: Some(StageConfigJson::from(config)),
            error: None,
        }
    }

    pub fn error(stage: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            success: false,
            stage: stage.into(),
            config: None,
            error: Some(msg.into()),
        }
    }
}

/// Theme response. Never an error: misses fall back to the default theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub primary_color: String,
    pub stage: String,
    pub ui_theme: String,
}

impl From<StageTheme> for ThemeResponse {
    fn from(theme: StageTheme) -> Self {
        Self {
            primary_color: theme.primary_color.to_string(),
            stage: theme.stage,
            ui_theme: theme.ui_theme.as_str().to_string(),
        }
    }
}

/// Navigation lookup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResponse {
    pub success: bool,
    pub stage: Option<String>,
    pub navigation: Option<NavigationJson>,
    pub error: Option<String>,
}

impl NavigationResponse {
    pub fn found(stage: impl Into<String>, nav: &NavigationConfig) -> Self {
        Self {
            success: true,
            stage: Some(stage.into()),
            navigation: Some(NavigationJson::from(nav)),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            stage: None,
            navigation: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// CLASSIFY REQUEST/RESPONSE
// =============================================================================

/// Child classification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<String>,
}

impl ClassifyRequest {
    /// Parse the birth date and evaluation instant.
    pub fn to_dates(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), NurtureError> {
        let dob = parse_date_of_birth(&self.date_of_birth)?;
        let now = resolve_as_of(self.as_of.as_deref())?;
        Ok((dob, now))
    }
}

/// Child classification response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub success: bool,
    pub stage: Option<ChildStage>,
    pub parent_stage: Option<ParentStage>,
    pub age_label: Option<String>,
    /// Age in months as fixed-point hundredths.
    pub age_months_hundredths: Option<i64>,
    pub error: Option<String>,
}

impl ClassifyResponse {
    pub fn success(stage: ChildStage, age_label: String, age_months_hundredths: i64) -> Self {
        Self {
            success: true,
            stage: Some(stage),
            parent_stage: Some(ParentStage::from(stage)),
            age_label: Some(age_label),
            age_months_hundredths: Some(age_months_hundredths),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            stage: None,
            parent_stage: None,
            age_label: None,
            age_months_hundredths: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// TRANSITION REQUEST/RESPONSE
// =============================================================================

/// Stored-stage transition request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub current_stage: String,
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<String>,
}

/// Parsed transition request.
#[derive(Debug, Clone, Copy)]
pub struct TransitionInput {
    pub current_stage: ChildStage,
    pub date_of_birth: DateTime<Utc>,
    pub buffer_days: u32,
    pub now: DateTime<Utc>,
}

impl TransitionRequest {
    /// Validate and parse, using `default_buffer` when none is given.
    pub fn to_input(&self, default_buffer: u32) -> Result<TransitionInput, NurtureError> {
        Ok(TransitionInput {
            current_stage: self.current_stage.parse()?,
            date_of_birth: parse_date_of_birth(&self.date_of_birth)?,
            buffer_days: validate_buffer_days(self.buffer_days, default_buffer)?,
            now: resolve_as_of(self.as_of.as_deref())?,
        })
    }
}

/// Advance-notice request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingRequest {
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<String>,
}

impl UpcomingRequest {
    /// Validate and parse into `(date_of_birth, buffer_days, now)`.
    pub fn to_input(
        &self,
        default_buffer: u32,
    ) -> Result<(DateTime<Utc>, u32, DateTime<Utc>), NurtureError> {
        Ok((
            parse_date_of_birth(&self.date_of_birth)?,
            validate_buffer_days(self.buffer_days, default_buffer)?,
            resolve_as_of(self.as_of.as_deref())?,
        ))
    }
}

/// Transition response. Optional fields are omitted when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub success: bool,
    pub should_transition: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_stage: Option<ChildStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_until_transition: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransitionResponse {
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            should_transition: false,
            next_stage: None,
            days_until_transition: None,
            error: Some(msg.into()),
        }
    }
}

impl From<TransitionCheck> for TransitionResponse {
    fn from(check: TransitionCheck) -> Self {
        Self {
            success: true,
            should_transition: check.should_transition,
            next_stage: check.next_stage,
            days_until_transition: check.days_until_transition,
            error: None,
        }
    }
}

// =============================================================================
// PARENT REQUESTS/RESPONSES
// =============================================================================

/// One child in a parent-stage request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildJson {
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

impl ChildJson {
    /// Convert to a core record, validating fields.
    pub fn to_record(&self) -> Result<ChildRecord, NurtureError> {
        let date_of_birth = parse_date_of_birth(&self.date_of_birth)?;
        let stage = self
            .stage
            .as_deref()
            .map(str::parse::<ChildStage>)
            .transpose()?;
        Ok(ChildRecord {
            date_of_birth,
            stage,
        })
    }
}

fn validate_family_size(len: usize) -> Result<(), NurtureError> {
    if len > MAX_FAMILY_SIZE {
        return Err(NurtureError::InvalidRequest(format!(
            "family size {} exceeds maximum {}",
            len, MAX_FAMILY_SIZE
        )));
    }
    Ok(())
}

/// Parent stage request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentStageRequest {
    #[serde(default)]
    pub children: Vec<ChildJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<String>,
}

impl ParentStageRequest {
    /// Validate and parse into records plus the evaluation instant.
    pub fn to_records(&self) -> Result<(Vec<ChildRecord>, DateTime<Utc>), NurtureError> {
        validate_family_size(self.children.len())?;
        let records = self
            .children
            .iter()
            .map(ChildJson::to_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((records, resolve_as_of(self.as_of.as_deref())?))
    }
}

/// Parent stage response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentStageResponse {
    pub success: bool,
    pub parent_stage: Option<ParentStage>,
    pub error: Option<String>,
}

impl ParentStageResponse {
    pub fn success(parent_stage: ParentStage) -> Self {
        Self {
            success: true,
            parent_stage: Some(parent_stage),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            parent_stage: None,
            error: Some(msg.into()),
        }
    }
}

/// Parent navigation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentNavigationRequest {
    #[serde(default)]
    pub stages: Vec<String>,
}

impl ParentNavigationRequest {
    /// Validate and parse the child stage ids.
    pub fn to_stages(&self) -> Result<Vec<ChildStage>, NurtureError> {
        validate_family_size(self.stages.len())?;
        self.stages.iter().map(|s| s.parse()).collect()
    }
}
