use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

/// Error taxonomy surfaced by the HTTP API.
///
/// Validation problems are detected before any mutation is attempted;
/// credential failures never reveal which field was wrong; storage failures
/// leave no partial state visible (the store is all-or-nothing).
#[derive(Debug, Display)]
pub enum ApiError {
    /// Malformed or missing input, with a field-specific message.
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Bad credentials. Deliberately does not distinguish "no such
    /// employee" from "wrong password".
    #[display(fmt = "Invalid employee ID or password")]
    InvalidCredentials,

    /// Missing or expired session.
    #[display(fmt = "Unauthorized")]
    Unauthorized,

    /// Backing-store read/write failure.
    #[display(fmt = "{}", _0)]
    Storage(StoreError),
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Storage(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Storage(e) => {
                error!(error = %e, "Storage failure");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}
