/// Team endpoints
///
/// - `POST /api/teams` - `{ name }`, the caller becomes OWNER
/// - `GET /api/teams` - teams the caller belongs to, with member and
///   project counts

use super::current_user;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use issuedeck_shared::{
    auth::middleware::SessionContext,
    models::team::{CreateTeam, Team, TeamWithCounts},
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Team name must be at most 100 characters"))]
    pub name: Option<String>,
}

/// Creates a team with the caller as owner
///
/// # Errors
///
/// - `400 Bad Request`: name missing or blank
/// - `404 Not Found`: session user no longer exists
pub async fn create_team(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    body: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Team>)> {
    let Json(req) = body?;
    req.validate()?;

    let name = req
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::invalid_field("name", "Team name is required"))?;

    let user = current_user(&state, &session).await?;

    let team = Team::create(
        &state.db,
        CreateTeam {
            name,
            owner_id: user.id,
        },
    )
    .await?;

    tracing::info!(team_id = %team.id, user_id = %user.id, "Team created");

    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn list_teams(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Json<Vec<TeamWithCounts>>> {
    let user = current_user(&state, &session).await?;
    let teams = Team::list_for_member(&state.db, user.id).await?;

    Ok(Json(teams))
}
