use crate::models::Envelope;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// `POST /bfhl`: exactly one of `fibonacci`, `prime`, `hcf`, `lcm`, `AI`.
///
/// The body is taken as raw bytes so malformed JSON still gets the envelope
/// instead of the extractor's own rejection.
pub async fn bfhl(State(state): State<AppState>, body: Bytes) -> Response {
    match state.dispatcher.handle(&body).await {
        Ok(data) => (
            StatusCode::OK,
            Json(Envelope::success(&state.official_email, data)),
        )
            .into_response(),
        Err(err) => err.into_envelope_response(&state.official_email),
    }
}
