/// Session tokens
///
/// A session is an HS256-signed JWT whose claims carry the user's id and
/// email. Handlers identify the caller by the email, so a session that
/// outlives its user row resolves to "user not found" rather than to
/// somebody else.
///
/// # Example
///
/// ```
/// use issuedeck_shared::auth::session::{create_session_token, validate_session_token, SessionClaims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-session-secret-that-is-at-least-32-bytes";
/// let claims = SessionClaims::new(Uuid::new_v4(), "user@example.com");
/// let token = create_session_token(&claims, secret)?;
///
/// let validated = validate_session_token(&token, secret)?;
/// assert_eq!(validated.email, "user@example.com");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim stamped on and required from every session token
pub const SESSION_ISSUER: &str = "issuedeck";

/// Default session lifetime
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 30;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    #[error("Invalid session token: {0}")]
    Invalid(String),

    #[error("Session has expired")]
    Expired,
}

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Email the session was issued for
    pub email: String,

    /// Issuer - always "issuedeck"
    pub iss: String,

    pub iat: i64,

    pub exp: i64,

    pub nbf: i64,
}

impl SessionClaims {
    /// Claims valid for [`DEFAULT_SESSION_TTL_HOURS`]
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self::with_expiration(user_id, email, Duration::hours(DEFAULT_SESSION_TTL_HOURS))
    }

    pub fn with_expiration(user_id: Uuid, email: impl Into<String>, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            email: email.into(),
            iss: SESSION_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
            nbf: now.timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

pub fn create_session_token(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|e| SessionError::CreateError(e.to_string()))
}

/// Verifies signature, issuer, expiry and not-before
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[SESSION_ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    let data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        _ => SessionError::Invalid(e.to_string()),
    })?;

    Ok(data.claims)
}
