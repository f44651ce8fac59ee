use crate::models::Envelope;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// Plain-text banner on the base URL.
pub async fn root() -> &'static str {
    "BFHL API is running"
}

/// Liveness check. Has no dependencies, so it is always healthy.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(Envelope::healthy(&state.official_email)),
    )
}
