/// Session extraction for Axum middleware
///
/// Reads the session token from `Authorization: Bearer <token>` or, for
/// browser clients, from the `issuedeck_session` cookie. The API's session
/// layer calls [`authenticate`] and inserts the resulting [`SessionContext`]
/// into the request extensions.
///
/// # Example
///
/// ```
/// use axum::http::HeaderMap;
/// use issuedeck_shared::auth::middleware::{authenticate, AuthError};
///
/// let headers = HeaderMap::new();
/// assert!(matches!(authenticate(&headers, "secret"), Err(AuthError::MissingCredentials)));
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::{validate_session_token, SessionError};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE_NAME: &str = "issuedeck_session";

/// Identity of the caller, added to request extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// User the session was issued to
    pub user_id: Uuid,

    /// Email used to resolve the user row
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing session")]
    MissingCredentials,

    #[error("Invalid session: {0}")]
    InvalidSession(String),
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Expired => AuthError::InvalidSession("Session has expired".to_string()),
            other => AuthError::InvalidSession(other.to_string()),
        }
    }
}

/// Pulls the raw session token out of the request headers
///
/// The Authorization header wins over the cookie when both are present.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE_NAME && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Validates the request's session and resolves it to a [`SessionContext`]
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<SessionContext, AuthError> {
    let token = extract_session_token(headers).ok_or(AuthError::MissingCredentials)?;
    let claims = validate_session_token(&token, secret)?;

    Ok(SessionContext {
        user_id: claims.sub,
        email: claims.email,
    })
}

/// `Set-Cookie` value storing a session token
pub fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE_NAME, token, max_age_seconds
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value expiring the session cookie
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::{create_session_token, SessionClaims};
    use axum::http::HeaderValue;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn token_for(email: &str) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        let claims = SessionClaims::new(user_id, email);
        (user_id, create_session_token(&claims, SECRET).unwrap())
    }

    #[test]
    fn test_authenticate_with_bearer() {
        let (user_id, token) = token_for("bearer@example.com");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );

        let session = authenticate(&headers, SECRET).unwrap();
        assert_eq!(session.user_id, user_id);
        assert_eq!(session.email, "bearer@example.com");
    }

    #[test]
    fn test_authenticate_with_cookie() {
        let (_, token) = token_for("cookie@example.com");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}={}", SESSION_COOKIE_NAME, token))
                .unwrap(),
        );

        let session = authenticate(&headers, SECRET).unwrap();
        assert_eq!(session.email, "cookie@example.com");
    }

    #[test]
    fn test_authenticate_missing_session() {
        let headers = HeaderMap::new();
        assert!(matches!(
            authenticate(&headers, SECRET),
            Err(AuthError::MissingCredentials)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("issuedeck_session="));
        assert!(matches!(
            authenticate(&headers, SECRET),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_authenticate_invalid_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer nope"));

        assert!(matches!(
            authenticate(&headers, SECRET),
            Err(AuthError::InvalidSession(_))
        ));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc", 3600, true);
        assert!(cookie.starts_with("issuedeck_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.ends_with("; Secure"));

        let cleared = clear_session_cookie(false);
        assert!(cleared.contains("Max-Age=0"));
        assert!(!cleared.contains("Secure"));
    }
}
