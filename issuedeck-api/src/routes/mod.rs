/// API route handlers
///
/// Organized by resource:
///
/// - `health`: health check (public)
/// - `auth`: registration, login, logout (public)
/// - `profile`: the caller's own account
/// - `issues`: issue CRUD with filtering and sorting
/// - `teams`: team creation and listing
/// - `summary`: AI summary of recent issues

pub mod auth;
pub mod health;
pub mod issues;
pub mod profile;
pub mod summary;
pub mod teams;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use issuedeck_shared::{auth::middleware::SessionContext, models::user::User};

/// Resolves the session to its user row by email
///
/// A session whose user has since been deleted yields 404.
pub(crate) async fn current_user(state: &AppState, session: &SessionContext) -> ApiResult<User> {
    User::find_by_email(&state.db, &session.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!(user_id = %session.user_id, "Session refers to a missing user");
            ApiError::NotFound("User not found".to_string())
        })
}
