//! Expense routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::ledger_error;
use crate::extractors::{PathParam, ValidatedJson};
use crate::{AppState, middleware::AuthUser};
use tally_core::LedgerError;
use tally_core::expense::{ExpenseError, NewExpense};
use tally_shared::types::{ExpenseId, TeamId, UserId, parse_amount};

/// Request body for POST /teams/{team_id}/expenses.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateExpenseRequest {
    /// Short label.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Free-form notes.
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    /// Decimal string with at most two places, e.g. `"90.00"`.
    pub amount: String,
    /// Payer; defaults to the caller.
    #[serde(default)]
    pub payer_id: Option<Uuid>,
    /// Members sharing the cost besides the payer.
    #[serde(default)]
    pub involved_member_ids: Vec<Uuid>,
}

/// Creates the expenses router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/teams/{team_id}/expenses",
            get(list_expenses).post(create_expense),
        )
        .route("/expenses/{expense_id}", get(get_expense))
        .route("/expenses/{expense_id}/splits", get(list_splits))
        .route("/expenses/{expense_id}/settle", post(settle_expense))
}

/// GET `/teams/{team_id}/expenses` - Team expenses, oldest first.
async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(team_id): PathParam<Uuid>,
) -> Response {
    match state
        .ledger
        .list_expenses(auth.user_id(), TeamId::from_uuid(team_id))
        .await
    {
        Ok(expenses) => (StatusCode::OK, Json(expenses)).into_response(),
        Err(e) => ledger_error(e),
    }
}

/// POST `/teams/{team_id}/expenses` - Record an expense and split it evenly.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(team_id): PathParam<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateExpenseRequest>,
) -> Response {
    let amount = match parse_amount(&payload.amount) {
        Ok(a) => a,
        Err(e) => return ledger_error(LedgerError::Validation(ExpenseError::from(e))),
    };

    let input = NewExpense {
        team_id: TeamId::from_uuid(team_id),
        name: payload.name,
        description: payload.description,
        amount,
        payer_id: payload.payer_id.map_or_else(|| auth.user_id(), UserId::from_uuid),
        involved_member_ids: payload
            .involved_member_ids
            .into_iter()
            .map(UserId::from_uuid)
            .collect(),
    };

    match state.ledger.create_expense(auth.user_id(), input).await {
        Ok(detail) => (StatusCode::CREATED, Json(detail)).into_response(),
        Err(e) => ledger_error(e),
    }
}

/// GET `/expenses/{expense_id}` - Expense with splits and settlement progress.
async fn get_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(expense_id): PathParam<Uuid>,
) -> Response {
    match state
        .ledger
        .expense_detail(auth.user_id(), ExpenseId::from_uuid(expense_id))
        .await
    {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => ledger_error(e),
    }
}

/// GET `/expenses/{expense_id}/splits` - Splits in creation order.
async fn list_splits(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(expense_id): PathParam<Uuid>,
) -> Response {
    match state
        .ledger
        .list_splits(auth.user_id(), ExpenseId::from_uuid(expense_id))
        .await
    {
        Ok(splits) => (StatusCode::OK, Json(splits)).into_response(),
        Err(e) => ledger_error(e),
    }
}

/// POST `/expenses/{expense_id}/settle` - Payer settles every outstanding split.
async fn settle_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(expense_id): PathParam<Uuid>,
) -> Response {
    match state
        .ledger
        .settle_expense(ExpenseId::from_uuid(expense_id), auth.user_id())
        .await
    {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => ledger_error(e),
    }
}
