//! Error responses.
//!
//! Every error body has the shape `{"error": "<code>", "message": "<text>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use tally_core::LedgerError;
use tally_core::team::TeamError;
use tally_shared::AppError;

/// Builds an error response.
pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into()
        })),
    )
        .into_response()
}

/// Maps an application error onto its status and lowercase category code.
///
/// Server-side failures are logged and answered with a generic body.
pub fn app_error(err: &AppError) -> Response {
    coded_app_error(err, &err.error_code().to_lowercase())
}

fn coded_app_error(err: &AppError, code: &str) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "Request failed");
        return internal_error();
    }
    error_response(status, code, err.message())
}

/// Maps a ledger error through [`AppError`], keeping the ledger's specific code.
pub fn ledger_error(err: LedgerError) -> Response {
    let code = err.error_code().to_lowercase();
    coded_app_error(&AppError::from(err), &code)
}

/// Maps a team registry error.
pub fn team_error(err: &TeamError) -> Response {
    match err {
        TeamError::EmptyName => {
            error_response(StatusCode::BAD_REQUEST, "empty_name", err.to_string())
        }
        TeamError::NotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "team_not_found", err.to_string())
        }
        TeamError::UnknownUser(_) => {
            error_response(StatusCode::NOT_FOUND, "user_not_found", err.to_string())
        }
        TeamError::Store(e) => app_error(&AppError::Database(e.to_string())),
    }
}

/// Generic 500 response; details stay in the logs.
pub fn internal_error() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "An error occurred",
    )
}
