//! # NurtureUp HTTP API Module
//!
//! This module implements the HTTP REST API server using axum. Dashboard
//! pages call it to decide which stage template, tabs and prompts to show.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /stages` - List registry ids
//! - `GET /stages/{id}` - Registry entry
//! - `GET /stages/{id}/theme` - Theme tokens (falls back on unknown ids)
//! - `GET /stages/{id}/navigation` - Tabs and gestures
//! - `POST /child/classify` - Stage and age label for a birth date
//! - `POST /child/transition` - Stored stage vs. classifier
//! - `POST /child/upcoming` - Advance notice for the next stage
//! - `POST /parent/stage` - Parent stage of a family
//! - `POST /parent/navigation` - Parent navigation for a set of stages

mod handlers;
mod middleware;
mod types;

pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use types::{
    ChildJson, ClassifyRequest, ClassifyResponse, GestureJson, HealthResponse, NavigationJson,
    NavigationResponse, ParentNavigationRequest, ParentStageRequest, ParentStageResponse,
    StageConfigJson, StageConfigResponse, StageListResponse, TabJson, ThemeResponse,
    TransitionInput, TransitionRequest, TransitionResponse, UpcomingRequest, resolve_as_of,
};

use crate::config::{AppConfig, ServerConfig};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use nurtureup_core::NurtureError;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Request body limit. Requests are a handful of dates.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// The configuration the server was started with.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create new app state from configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from `server.cors_origins`.
///
/// - `["*"]`: allows all origins
/// - empty: localhost only
/// - otherwise: the listed origins
fn build_cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
        return CorsLayer::permissive();
    }
    if server.cors_origins.is_empty() {
        tracing::info!("CORS: No origins configured, defaulting to localhost only");
        return build_localhost_cors();
    }

    let allowed_origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => {
                tracing::info!("CORS: Allowing origin: {}", origin);
                Some(hv)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if allowed_origins.is_empty() {
        tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
        build_localhost_cors()
    } else {
        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting - if enabled
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server);

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/stages", get(handlers::stages_handler))
        .route("/stages/{id}", get(handlers::stage_config_handler))
        .route("/stages/{id}/theme", get(handlers::stage_theme_handler))
        .route(
            "/stages/{id}/navigation",
            get(handlers::stage_navigation_handler),
        )
        .route("/child/classify", post(handlers::classify_handler))
        .route("/child/transition", post(handlers::transition_handler))
        .route("/child/upcoming", post(handlers::upcoming_handler))
        .route("/parent/stage", post(handlers::parent_stage_handler))
        .route(
            "/parent/navigation",
            post(handlers::parent_navigation_handler),
        );

    match create_rate_limiter(state.config.server.rate_limit) {
        Some(limiter) => {
            tracing::info!(
                "Rate limiting enabled: {} requests/second",
                state.config.server.rate_limit
            );
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::rate_limit_middleware,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), NurtureError> {
    let addr = config.bind_address();
    let router = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| NurtureError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("NurtureUp stage service listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| NurtureError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
