/// Profile endpoints for the signed-in user
///
/// - `GET /api/profile`
/// - `PUT /api/profile` - `{ name, profileImage? }`
/// - `GET /api/profile/check-password` - `{ hasPassword }`
/// - `PUT /api/profile/password` - `{ currentPassword?, newPassword }`

use super::current_user;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use issuedeck_shared::{
    auth::{middleware::SessionContext, password},
    models::user::{UpdateProfile, User},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,

    /// Absent keeps the current image, empty or null removes it
    #[serde(default)]
    #[validate(url(message = "Profile image must be a valid URL"))]
    pub profile_image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: Option<String>,

    pub new_password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordStatus {
    pub has_password: bool,
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Json<User>> {
    Ok(Json(current_user(&state, &session).await?))
}

/// Updates name and image
///
/// # Errors
///
/// - `400 Bad Request`: name blank or longer than 50 characters, bad image URL
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Json(raw) = body?;
    let image_present = raw.get("profileImage").is_some();

    let mut req: UpdateProfileRequest = serde_json::from_value(raw)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;
    req.name = req.name.trim().to_string();
    req.profile_image = req
        .profile_image
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());
    req.validate()?;

    let user = current_user(&state, &session).await?;

    let updated = User::update_profile(
        &state.db,
        user.id,
        UpdateProfile {
            name: Some(req.name),
            image: image_present.then_some(req.profile_image),
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %updated.id, "Profile updated");

    Ok(Json(updated))
}

pub async fn check_password(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Json<PasswordStatus>> {
    let user = current_user(&state, &session).await?;

    Ok(Json(PasswordStatus {
        has_password: user.has_password(),
    }))
}

/// Changes the caller's password
///
/// The current password is required and verified when one is set; accounts
/// without a local password may set one directly.
///
/// # Errors
///
/// - `400 Bad Request`: new password fails the length rules, current password
///   missing or wrong
pub async fn change_password(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = body?;

    password::validate_password_strength(&req.new_password)
        .map_err(|e| ApiError::invalid_field("newPassword", e))?;

    let user = current_user(&state, &session).await?;

    if let Some(hash) = user.password_hash.as_deref() {
        let current = req
            .current_password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApiError::invalid_field("currentPassword", "Current password is required"))?;

        if !password::verify_password(current, hash)? {
            return Err(ApiError::invalid_field(
                "currentPassword",
                "Current password is incorrect",
            ));
        }
    }

    let new_hash = password::hash_password(&req.new_password)?;
    User::set_password_hash(&state.db, user.id, &new_hash).await?;

    tracing::info!(user_id = %user.id, "Password changed");

    Ok(Json(json!({ "message": "Password changed successfully" })))
}
