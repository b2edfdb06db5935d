/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and length rules
/// - [`session`]: Signed session tokens carrying the user's email
/// - [`middleware`]: Session extraction from bearer header or cookie
/// - [`authorization`]: Project ownership checks for issues
///
/// # Example
///
/// ```no_run
/// use issuedeck_shared::auth::password::{hash_password, verify_password};
/// use issuedeck_shared::auth::session::{create_session_token, SessionClaims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = SessionClaims::new(Uuid::new_v4(), "user@example.com");
/// let token = create_session_token(&claims, "session-secret-key")?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod middleware;
pub mod password;
pub mod session;
