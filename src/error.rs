//! # error
//!
//! Centralised HTTP-facing error type.
//!
//! Every handler returns `Result<_, AppError>`.  The `IntoResponse` impl turns
//! these into `{ "ok": false, "error": "..." }` bodies so the dashboard always
//! gets a label it can show as-is.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::engine::refresh::RefreshError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Nothing to show yet (e.g. no successful fetch so far).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A refresh is already running; this trigger was dropped.
    #[error("Refresh already in progress")]
    Conflict,

    /// The ticker endpoint failed.  Carries the user-facing label.
    #[error("{0}")]
    Upstream(String),
}

impl From<RefreshError> for AppError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::InFlight => AppError::Conflict,
            RefreshError::Fetch(fetch) => AppError::Upstream(fetch.label()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        let message = match &self {
            AppError::NotFound(msg) | AppError::Upstream(msg) => msg.clone(),
            AppError::Conflict => self.to_string(),
        };

        let body = Json(json!({
            "ok":    false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
