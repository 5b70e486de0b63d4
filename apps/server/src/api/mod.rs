//! API layer - routes, handlers, and middleware

pub mod handlers;
pub mod middleware;

use crate::state::AppState;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config().server.cors_origins.clone();

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Root endpoint
        .route("/", get(root))
        // Favicon handler (returns 204 to prevent 404 logs)
        .route("/favicon.ico", get(favicon))
        // Dual-coding search
        .route("/api/search-codes", get(handlers::search::search_codes))
        // Dual-coded record submission
        .route(
            "/api/submit-patient-record",
            post(handlers::records::submit_patient_record),
        )
        // Add state
        .with_state(state)
        // Add middleware (applied in reverse order)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::compression())
        .layer(middleware::cors(&cors_origins))
        .layer(middleware::trace())
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "bridge-server"
    }))
}

async fn root() -> impl IntoResponse {
    // Informational endpoint, not part of the search contract.
    (
        StatusCode::OK,
        Json(json!({
            "server": "Terminology Bridge (Rust)",
            "version": env!("CARGO_PKG_VERSION"),
            "status": "running"
        })),
    )
}

async fn favicon() -> impl IntoResponse {
    // Return 204 No Content to indicate no favicon is available
    StatusCode::NO_CONTENT
}
