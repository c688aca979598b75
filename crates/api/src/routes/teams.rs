//! Team and membership routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::{app_error, error_response, team_error};
use crate::extractors::{PathParam, ValidatedJson};
use crate::{AppState, middleware::AuthUser};
use tally_core::team::{Team, TeamMember};
use tally_shared::AppError;
use tally_shared::types::{TeamId, UserId};

/// Request body for POST /teams.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateTeamRequest {
    /// Team name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Request body for POST /teams/{team_id}/members.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AddMemberRequest {
    /// User to add.
    pub user_id: Uuid,
}

/// Team with its member profiles.
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    /// Team ID.
    pub id: TeamId,
    /// Team name.
    pub name: String,
    /// Creator.
    pub creator_id: UserId,
    /// Members in join order.
    pub members: Vec<TeamMember>,
    /// Creation time.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TeamResponse {
    fn new(team: Team, members: Vec<TeamMember>) -> Self {
        Self {
            id: team.id,
            name: team.name,
            creator_id: team.creator_id,
            members,
            created_at: team.created_at,
        }
    }
}

/// Creates the teams router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teams", get(list_teams).post(create_team))
        .route("/teams/{team_id}", get(get_team))
        .route("/teams/{team_id}/members", get(list_members).post(add_member))
}

/// GET /teams - Teams the caller belongs to, oldest first.
async fn list_teams(State(state): State<AppState>, auth: AuthUser) -> Response {
    match state.teams.teams_for_user(auth.user_id()).await {
        Ok(teams) => (StatusCode::OK, Json(teams)).into_response(),
        Err(e) => app_error(&AppError::Database(e.to_string())),
    }
}

/// POST /teams - Create a team with the caller as creator.
async fn create_team(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTeamRequest>,
) -> Response {
    let team = match state.teams.create_team(&payload.name, auth.user_id()).await {
        Ok(t) => t,
        Err(e) => return team_error(&e),
    };

    info!(team_id = %team.id, creator_id = %auth.user_id(), "Team created");

    match state.teams.get_members(team.id).await {
        Ok(members) => (StatusCode::CREATED, Json(TeamResponse::new(team, members))).into_response(),
        Err(e) => app_error(&AppError::Database(e.to_string())),
    }
}

/// GET `/teams/{team_id}` - Team detail for members.
async fn get_team(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(team_id): PathParam<Uuid>,
) -> Response {
    let team = match load_team_for_member(&state, TeamId::from_uuid(team_id), auth.user_id()).await
    {
        Ok(t) => t,
        Err(response) => return response,
    };

    match state.teams.get_members(team.id).await {
        Ok(members) => (StatusCode::OK, Json(TeamResponse::new(team, members))).into_response(),
        Err(e) => app_error(&AppError::Database(e.to_string())),
    }
}

/// GET `/teams/{team_id}/members` - Member profiles in join order.
async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(team_id): PathParam<Uuid>,
) -> Response {
    let team = match load_team_for_member(&state, TeamId::from_uuid(team_id), auth.user_id()).await
    {
        Ok(t) => t,
        Err(response) => return response,
    };

    match state.teams.get_members(team.id).await {
        Ok(members) => (StatusCode::OK, Json(members)).into_response(),
        Err(e) => app_error(&AppError::Database(e.to_string())),
    }
}

/// POST `/teams/{team_id}/members` - Add a member. Creator only.
async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(team_id): PathParam<Uuid>,
    ValidatedJson(payload): ValidatedJson<AddMemberRequest>,
) -> Response {
    let team = match load_team_for_member(&state, TeamId::from_uuid(team_id), auth.user_id()).await
    {
        Ok(t) => t,
        Err(response) => return response,
    };

    if team.creator_id != auth.user_id() {
        return app_error(&AppError::Forbidden(
            "Only the team creator can add members".to_string(),
        ));
    }

    let new_member = UserId::from_uuid(payload.user_id);
    let team = match state.teams.add_member(team.id, new_member).await {
        Ok(t) => t,
        Err(e) => return team_error(&e),
    };

    info!(team_id = %team.id, user_id = %new_member, "Member added");

    match state.teams.get_members(team.id).await {
        Ok(members) => (StatusCode::OK, Json(TeamResponse::new(team, members))).into_response(),
        Err(e) => app_error(&AppError::Database(e.to_string())),
    }
}

/// Loads a team, rejecting callers who are not members.
async fn load_team_for_member(
    state: &AppState,
    team_id: TeamId,
    user_id: UserId,
) -> Result<Team, Response> {
    match state.teams.find_team(team_id).await {
        Ok(Some(team)) if team.is_member(user_id) => Ok(team),
        Ok(Some(_)) => Err(app_error(&AppError::Forbidden(
            "You are not a member of this team".to_string(),
        ))),
        Ok(None) => Err(error_response(
            StatusCode::NOT_FOUND,
            "team_not_found",
            format!("Team {team_id} not found"),
        )),
        Err(e) => Err(app_error(&AppError::Database(e.to_string()))),
    }
}
