//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers. Every handler
//! is a thin adapter: parse the request, call the engine, wrap the answer.

use super::{
    AppState,
    types::{
        ClassifyRequest, ClassifyResponse, HealthResponse, NavigationResponse,
        ParentNavigationRequest, ParentStageRequest, ParentStageResponse, StageConfigResponse,
        StageListResponse, ThemeResponse, TransitionRequest, TransitionResponse, UpcomingRequest,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use nurtureup_core::{
    ChildAge, TransitionPredictor, calculate_parent_stage_at, classify_child_stage_at,
    engine::{parent_navigation_stage, registry_ids},
    format_child_age_at, get_parent_navigation_config, get_stage_config, get_stage_theme,
};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// REGISTRY HANDLERS
// =============================================================================

/// List registry ids.
pub async fn stages_handler() -> impl IntoResponse {
    let response = StageListResponse {
        stages: registry_ids().into_iter().map(str::to_string).collect(),
    };
    (StatusCode::OK, Json(response))
}

/// Registry entry for one stage id.
pub async fn stage_config_handler(Path(id): Path<String>) -> impl IntoResponse {
    match get_stage_config(&id) {
        Some(config) => (
            StatusCode::OK,
            Json(StageConfigResponse::found(id, config)),
        ),
        None => {
            tracing::debug!(stage = %id, "Registry miss");
            let msg = format!("Unknown stage: {}", id);
            (StatusCode::NOT_FOUND, Json(StageConfigResponse::error(id, msg)))
        }
    }
}

/// Theme for a stage id. Misses fall back to the default theme.
pub async fn stage_theme_handler(Path(id): Path<String>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ThemeResponse::from(get_stage_theme(&id))),
    )
}

/// Navigation of a registry entry.
pub async fn stage_navigation_handler(Path(id): Path<String>) -> impl IntoResponse {
    match get_stage_config(&id) {
        Some(config) => (
            StatusCode::OK,
            Json(NavigationResponse::found(id, &config.navigation)),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(NavigationResponse::error(format!("Unknown stage: {}", id))),
        ),
    }
}

// =============================================================================
// CHILD HANDLERS
// =============================================================================

/// Classify a child and describe its age.
pub async fn classify_handler(Json(request): Json<ClassifyRequest>) -> impl IntoResponse {
    let (dob, now) = match request.to_dates() {
        Ok(dates) => dates,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ClassifyResponse::error(e.to_string())),
            );
        }
    };

    let stage = classify_child_stage_at(dob, now);
    let age = ChildAge::between(dob, now);
    let response =
        ClassifyResponse::success(stage, format_child_age_at(dob, now), age.months_hundredths());

    (StatusCode::OK, Json(response))
}

/// Compare a stored stage with the classifier.
pub async fn transition_handler(
    State(state): State<AppState>,
    Json(request): Json<TransitionRequest>,
) -> impl IntoResponse {
    let input = match request.to_input(state.config.transition.buffer_days) {
        Ok(input) => input,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(TransitionResponse::error(e.to_string())),
            );
        }
    };

    let check = TransitionPredictor::with_buffer_days(input.buffer_days).check(
        input.current_stage,
        input.date_of_birth,
        input.now,
    );
    if check.should_transition {
        tracing::info!(
            event = "stage_transition_due",
            from = %input.current_stage,
            to = ?check.next_stage,
            "Stored stage is behind the classifier"
        );
    }

    (StatusCode::OK, Json(TransitionResponse::from(check)))
}

/// Advance notice for the next stage boundary.
pub async fn upcoming_handler(
    State(state): State<AppState>,
    Json(request): Json<UpcomingRequest>,
) -> impl IntoResponse {
    match request.to_input(state.config.transition.buffer_days) {
        Ok((dob, buffer_days, now)) => {
            let check = TransitionPredictor::with_buffer_days(buffer_days).upcoming(dob, now);
            (StatusCode::OK, Json(TransitionResponse::from(check)))
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(TransitionResponse::error(e.to_string())),
        ),
    }
}

// =============================================================================
// PARENT HANDLERS
// =============================================================================

/// Parent stage of a family (youngest child by birth date).
pub async fn parent_stage_handler(Json(request): Json<ParentStageRequest>) -> impl IntoResponse {
    match request.to_records() {
        Ok((children, now)) => {
            let stage = calculate_parent_stage_at(&children, now);
            (StatusCode::OK, Json(ParentStageResponse::success(stage)))
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ParentStageResponse::error(e.to_string())),
        ),
    }
}

/// Parent navigation for a set of child stages (most junior by rank).
pub async fn parent_navigation_handler(
    Json(request): Json<ParentNavigationRequest>,
) -> impl IntoResponse {
    let stages = match request.to_stages() {
        Ok(stages) => stages,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(NavigationResponse::error(e.to_string())),
            );
        }
    };

    let parent_stage = parent_navigation_stage(&stages);
    let nav = get_parent_navigation_config(&stages);

    (
        StatusCode::OK,
        Json(NavigationResponse::found(parent_stage.as_str(), nav)),
    )
}
