/// Account endpoints
///
/// - `POST /api/register` - create an account with email and password
/// - `POST /api/auth/login` - exchange credentials for a session
/// - `POST /api/auth/logout` - clear the session cookie
///
/// Login returns the session token in the body and also sets it as an
/// `HttpOnly` cookie, so both API clients and browsers can authenticate.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use chrono::Duration;
use issuedeck_shared::{
    auth::{
        middleware::{clear_session_cookie, session_cookie},
        password,
        session::{create_session_token, SessionClaims},
    },
    models::user::{CreateUser, User},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(
        min = 6,
        max = 100,
        message = "Password must be between 6 and 100 characters"
    ))]
    pub password: String,

    #[validate(length(max = 50, message = "Name must be at most 50 characters"))]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token, also set as the session cookie
    pub token: String,

    pub user: User,
}

/// Register a new account
///
/// ```text
/// POST /api/register
/// { "email": "user@example.com", "password": "secret1", "name": "Jane" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: invalid email, password or name
/// - `409 Conflict`: email already registered
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(req) = body?;
    req.validate()?;

    password::validate_password_strength(&req.password)
        .map_err(|e| ApiError::invalid_field("password", e))?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;
    let name = req
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    // Unique violation on a concurrent insert still maps to 409
    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            name,
            password_hash: Some(password_hash),
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with email and password
///
/// ```text
/// POST /api/auth/login
/// { "email": "user@example.com", "password": "secret1" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: malformed body
/// - `401 Unauthorized`: unknown email, wrong password, or an account
///   without a local password
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = body?;
    req.validate()?;

    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(invalid)?;

    let hash = user.password_hash.as_deref().ok_or_else(invalid)?;
    if !password::verify_password(&req.password, hash)? {
        tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    let claims = SessionClaims::with_expiration(
        user.id,
        user.email.clone(),
        Duration::hours(state.config.session.ttl_hours),
    );
    let token = create_session_token(&claims, state.session_secret())?;
    let cookie = session_cookie(
        &token,
        state.config.session_ttl_seconds(),
        state.config.api.production,
    );

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse { token, user }),
    ))
}

/// Clears the session cookie
///
/// Sessions are stateless tokens; a bearer client logs out by discarding it.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        AppendHeaders([(
            header::SET_COOKIE,
            clear_session_cookie(state.config.api.production),
        )]),
        Json(json!({ "message": "Logged out successfully" })),
    )
}
