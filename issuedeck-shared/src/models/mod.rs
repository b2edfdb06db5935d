/// Database models for IssueDeck
///
/// # Models
///
/// - `user`: Accounts, resolved from the session email on every request
/// - `team`: Teams and their OWNER/MEMBER memberships
/// - `project`: Projects, including lazy default provisioning
/// - `issue`: Issues with filtering, priority ordering and soft deletion
///
/// # Example
///
/// ```no_run
/// use issuedeck_shared::models::user::{User, CreateUser};
/// use issuedeck_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     email: "user@example.com".to_string(),
///     name: Some("Jane Doe".to_string()),
///     password_hash: Some("$argon2id$...".to_string()),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod issue;
pub mod project;
pub mod team;
pub mod user;
