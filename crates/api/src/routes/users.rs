//! Caller profile routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::put,
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::error::team_error;
use crate::extractors::ValidatedJson;
use crate::{AppState, middleware::AuthUser};
use tally_core::team::TeamMember;

/// Request body for PUT /users/me.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpsertProfileRequest {
    /// Display name.
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    /// Contact email.
    #[validate(email, length(max = 255))]
    pub email: String,
}

/// Creates the users router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/me", put(upsert_me))
}

/// PUT /users/me - Register or update the caller's directory profile.
///
/// Identities come from the external provider; a profile must exist before
/// the caller can create or join teams.
async fn upsert_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpsertProfileRequest>,
) -> Response {
    let profile = TeamMember {
        user_id: auth.user_id(),
        username: payload.username,
        email: payload.email,
    };

    if let Err(e) = state.teams.upsert_user(&profile).await {
        return team_error(&e);
    }

    info!(user_id = %profile.user_id, "Profile saved");
    (StatusCode::OK, Json(profile)).into_response()
}
