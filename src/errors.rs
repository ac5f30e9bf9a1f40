use crate::store::StoreError;
use axum::http::StatusCode;
use tracing::{error, warn};

pub const VALIDATION_MESSAGE: &str = "Please choose a mood level (1-5)!";
pub const BUSY_MESSAGE: &str = "A check-in is already being submitted.";
pub const NETWORK_MESSAGE: &str = "A network error occurred. Please try again shortly.";
pub const UNKNOWN_SAVE_ERROR: &str = "unknown error";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected { message } => {
                warn!(?message, "store rejected check-in");
                let detail = message
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_SAVE_ERROR.to_string());
                Self::bad_gateway(format!("Save failed: {detail}"))
            }
            other => {
                error!("store request failed: {other}");
                Self::bad_gateway(NETWORK_MESSAGE)
            }
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
