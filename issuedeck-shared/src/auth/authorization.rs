/// Ownership checks
///
/// IssueDeck's permission model is flat: the owner of a project is the only
/// user who may read or mutate that project's issues. Every check resolves
/// the resource first and only then compares owners, so a missing resource
/// is reported as not-found and a foreign one as forbidden.
///
/// # Example
///
/// ```no_run
/// use issuedeck_shared::auth::authorization::require_issue_owner;
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
/// # async fn example(pool: PgPool, issue_id: Uuid, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let issue = require_issue_owner(&pool, issue_id, user_id).await?;
/// println!("{} may edit {}", user_id, issue.title);
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{issue::Issue, project::Project};

#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    #[error("Issue not found")]
    IssueNotFound,

    #[error("Project not found")]
    ProjectNotFound,

    /// Caller doesn't own the resource
    #[error("Not authorized to access this resource")]
    NotOwner,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Fails with [`AuthzError::NotOwner`] unless `user_id` is `owner_id`
pub fn ensure_owner(owner_id: Uuid, user_id: Uuid) -> Result<(), AuthzError> {
    if owner_id != user_id {
        return Err(AuthzError::NotOwner);
    }
    Ok(())
}

/// Loads a live issue and checks that its project belongs to `user_id`
pub async fn require_issue_owner(
    pool: &PgPool,
    issue_id: Uuid,
    user_id: Uuid,
) -> Result<Issue, AuthzError> {
    let owned = Issue::find_live_with_owner(pool, issue_id)
        .await?
        .ok_or(AuthzError::IssueNotFound)?;

    ensure_owner(owned.project_owner_id, user_id).map_err(|e| {
        tracing::warn!(%issue_id, %user_id, "Rejected access to issue in foreign project");
        e
    })?;

    Ok(owned.issue)
}

/// Loads a project and checks that it belongs to `user_id`
pub async fn require_project_owner(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<Project, AuthzError> {
    let project = Project::find_by_id(pool, project_id)
        .await?
        .ok_or(AuthzError::ProjectNotFound)?;

    if !project.is_owned_by(user_id) {
        return Err(AuthzError::NotOwner);
    }

    Ok(project)
}
