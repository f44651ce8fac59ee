use crate::models::Envelope;
use crate::services::math::MathError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message returned for every 500; internal detail only goes to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Why a `/bfhl` request could not produce data.
///
/// Every variant except `Internal` is a client input error whose `Display`
/// text is the exact `error` string sent back.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid JSON body")]
    InvalidBody,

    #[error("Exactly one key required")]
    KeyCount,

    #[error("Invalid fibonacci input")]
    InvalidFibonacci,

    #[error("Prime input must be array")]
    PrimeNotArray,

    #[error("Invalid hcf input")]
    InvalidHcf,

    #[error("Invalid lcm input")]
    InvalidLcm,

    #[error("AI input must be string")]
    AiNotString,

    #[error("Invalid key")]
    InvalidKey,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MathError> for DispatchError {
    fn from(err: MathError) -> Self {
        DispatchError::Internal(anyhow::Error::new(err))
    }
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Render as the failure envelope, logging according to severity.
    pub fn into_envelope_response(self, official_email: &str) -> Response {
        let status = self.status();
        let message = match &self {
            DispatchError::Internal(err) => {
                tracing::error!(error = ?err, "Unhandled error while dispatching request");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => {
                tracing::debug!(error = %other, "Rejected request");
                other.to_string()
            }
        };

        (status, Json(Envelope::failure(official_email, message))).into_response()
    }
}
