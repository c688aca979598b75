//! Split settlement routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use uuid::Uuid;

use crate::error::ledger_error;
use crate::extractors::PathParam;
use crate::{AppState, middleware::AuthUser};
use tally_shared::types::SplitId;

/// Creates the splits router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/splits/{split_id}/request", post(request_payment))
        .route("/splits/{split_id}/verify", post(verify_payment))
}

/// POST `/splits/{split_id}/request` - Debtor declares payment.
async fn request_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(split_id): PathParam<Uuid>,
) -> Response {
    match state
        .ledger
        .request_payment(SplitId::from_uuid(split_id), auth.user_id())
        .await
    {
        Ok(transition) => (StatusCode::OK, Json(transition)).into_response(),
        Err(e) => ledger_error(e),
    }
}

/// POST `/splits/{split_id}/verify` - Payer confirms payment.
async fn verify_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(split_id): PathParam<Uuid>,
) -> Response {
    match state
        .ledger
        .verify_payment(SplitId::from_uuid(split_id), auth.user_id())
        .await
    {
        Ok(transition) => (StatusCode::OK, Json(transition)).into_response(),
        Err(e) => ledger_error(e),
    }
}
