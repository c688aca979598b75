//! Team balance routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use uuid::Uuid;

use crate::error::ledger_error;
use crate::extractors::PathParam;
use crate::{AppState, middleware::AuthUser};
use tally_shared::types::TeamId;

/// Creates the balances router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/teams/{team_id}/balances", get(team_balances))
}

/// GET `/teams/{team_id}/balances` - Total, per-user balances, and pairwise debts.
async fn team_balances(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(team_id): PathParam<Uuid>,
) -> Response {
    match state
        .ledger
        .balance_report(auth.user_id(), TeamId::from_uuid(team_id))
        .await
    {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => ledger_error(e),
    }
}
