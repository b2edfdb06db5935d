/// Project model and default provisioning
///
/// Projects group issues; the project's `owner_id` is the sole authority
/// over its issues.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     description TEXT,
///     team_id UUID NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     is_default BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// CREATE UNIQUE INDEX projects_one_default_per_owner ON projects(owner_id) WHERE is_default;
/// ```
///
/// # Default provisioning
///
/// The first time a user creates an issue without owning any project,
/// [`Project::ensure_default`] creates (or reuses) their team and a
/// "My Project" project inside a single transaction:
///
/// ```no_run
/// use issuedeck_shared::models::project::Project;
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let project = Project::ensure_default(&pool, user_id).await?;
/// assert_eq!(project.owner_id, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::team::Team;

pub const DEFAULT_PROJECT_NAME: &str = "My Project";
pub const DEFAULT_PROJECT_DESCRIPTION: &str = "Your first project";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub team_id: Uuid,

    /// Only the owner may read or mutate the project's issues
    pub owner_id: Uuid,

    pub is_default: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,

    pub description: Option<String>,

    pub team_id: Uuid,

    pub owner_id: Uuid,
}

const PROJECT_COLUMNS: &str =
    "id, name, description, team_id, owner_id, is_default, created_at, updated_at";

impl Project {
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (name, description, team_id, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(data.name)
        .bind(data.description)
        .bind(data.team_id)
        .bind(data.owner_id)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Returns the user's oldest owned project, if any
    pub async fn find_first_owned(
        pool: &PgPool,
        owner_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects
            WHERE owner_id = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#
        ))
        .bind(owner_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn list_owned(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects
            WHERE owner_id = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    /// Returns a project for the user, provisioning team and project if needed
    ///
    /// Team lookup-or-create and project creation run in one transaction, so
    /// a failure leaves neither behind. Inserts target the partial unique
    /// indexes with `ON CONFLICT DO NOTHING`, so two concurrent first-issue
    /// requests end up sharing one default team and one default project.
    pub async fn ensure_default(pool: &PgPool, owner_id: Uuid) -> Result<Self, sqlx::Error> {
        if let Some(project) = Self::find_first_owned(pool, owner_id).await? {
            return Ok(project);
        }

        tracing::info!(%owner_id, "No project found for user, provisioning default project");

        let mut tx = pool.begin().await?;
        let team = Team::ensure_default(&mut tx, owner_id).await?;
        let project = Self::insert_default(&mut tx, team.id, owner_id).await?;
        tx.commit().await?;

        Ok(project)
    }

    async fn insert_default(
        conn: &mut PgConnection,
        team_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let inserted = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (name, description, team_id, owner_id, is_default)
            VALUES ($1, $2, $3, $4, TRUE)
            ON CONFLICT (owner_id) WHERE is_default DO NOTHING
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(DEFAULT_PROJECT_NAME)
        .bind(DEFAULT_PROJECT_DESCRIPTION)
        .bind(team_id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;

        match inserted {
            Some(project) => {
                tracing::info!(project_id = %project.id, %owner_id, "Provisioned default project");
                Ok(project)
            }
            None => {
                sqlx::query_as::<_, Project>(&format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects WHERE owner_id = $1 AND is_default"
                ))
                .bind(owner_id)
                .fetch_one(&mut *conn)
                .await
            }
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_owned_by() {
        let owner = Uuid::new_v4();
        let project = Project {
            id: Uuid::new_v4(),
            name: DEFAULT_PROJECT_NAME.to_string(),
            description: Some(DEFAULT_PROJECT_DESCRIPTION.to_string()),
            team_id: Uuid::new_v4(),
            owner_id: owner,
            is_default: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(project.is_owned_by(owner));
        assert!(!project.is_owned_by(Uuid::new_v4()));
    }
}
