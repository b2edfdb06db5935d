/// Team model, memberships and database operations
///
/// A team is owned by the user who created it. The creator is always
/// inserted as an `OWNER` member in the same transaction as the team row.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE team_role AS ENUM ('OWNER', 'MEMBER');
///
/// CREATE TABLE teams (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     is_default BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// CREATE UNIQUE INDEX teams_one_default_per_owner ON teams(owner_id) WHERE is_default;
///
/// CREATE TABLE team_members (
///     team_id UUID NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role team_role NOT NULL DEFAULT 'MEMBER',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (team_id, user_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Name given to a team created by default provisioning
pub const DEFAULT_TEAM_NAME: &str = "Personal Team";

/// Role of a user within a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "team_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamRole {
    /// Created the team
    Owner,

    /// Added to the team
    Member,
}


#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,

    pub name: String,

    /// User who created the team
    pub owner_id: Uuid,

    /// Set for the team created by default provisioning
    pub is_default: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub team_id: Uuid,

    pub user_id: Uuid,

    pub role: TeamRole,

    pub created_at: DateTime<Utc>,
}

/// Aggregate counts attached to each listed team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCounts {
    pub members: i64,

    pub projects: i64,
}

/// Team listing item: the team plus its `_count` object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamWithCounts {
    #[serde(flatten)]
    pub team: Team,

    #[serde(rename = "_count")]
    pub count: TeamCounts,
}

#[derive(sqlx::FromRow)]
struct TeamCountRow {
    #[sqlx(flatten)]
    team: Team,
    member_count: i64,
    project_count: i64,
}

/// Input for creating a team
#[derive(Debug, Clone)]
pub struct CreateTeam {
    pub name: String,

    pub owner_id: Uuid,
}

const TEAM_COLUMNS: &str = "id, name, owner_id, is_default, created_at, updated_at";

impl Team {
    /// Creates a team and its OWNER membership atomically
    pub async fn create(pool: &PgPool, data: CreateTeam) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let team = sqlx::query_as::<_, Team>(&format!(
            r#"
            INSERT INTO teams (name, owner_id)
            VALUES ($1, $2)
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(&data.name)
        .bind(data.owner_id)
        .fetch_one(&mut *tx)
        .await?;

        TeamMember::add(&mut tx, team.id, data.owner_id, TeamRole::Owner).await?;

        tx.commit().await?;

        tracing::info!(team_id = %team.id, owner_id = %team.owner_id, "Team created");
        Ok(team)
    }

    /// Returns the team default provisioning should attach a project to
    ///
    /// Prefers the owner's default team, then their oldest owned team;
    /// inserts a new default "Personal Team" if they own none. Concurrent
    /// callers converge on one row through the partial unique index.
    pub(crate) async fn ensure_default(
        conn: &mut PgConnection,
        owner_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let existing = sqlx::query_as::<_, Team>(&format!(
            r#"
            SELECT {TEAM_COLUMNS}
            FROM teams
            WHERE owner_id = $1
            ORDER BY is_default DESC, created_at ASC
            LIMIT 1
            "#
        ))
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(team) = existing {
            return Ok(team);
        }

        let inserted = sqlx::query_as::<_, Team>(&format!(
            r#"
            INSERT INTO teams (name, owner_id, is_default)
            VALUES ($1, $2, TRUE)
            ON CONFLICT (owner_id) WHERE is_default DO NOTHING
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(DEFAULT_TEAM_NAME)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;

        let team = match inserted {
            Some(team) => {
                tracing::info!(team_id = %team.id, %owner_id, "Provisioned default team");
                team
            }
            None => {
                sqlx::query_as::<_, Team>(&format!(
                    "SELECT {TEAM_COLUMNS} FROM teams WHERE owner_id = $1 AND is_default"
                ))
                .bind(owner_id)
                .fetch_one(&mut *conn)
                .await?
            }
        };

        TeamMember::add(conn, team.id, owner_id, TeamRole::Owner).await?;

        Ok(team)
    }

    /// Lists every team the user is a member of, with member/project counts
    pub async fn list_for_member(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<TeamWithCounts>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TeamCountRow>(
            r#"
            SELECT t.id, t.name, t.owner_id, t.is_default, t.created_at, t.updated_at,
                   (SELECT COUNT(*) FROM team_members m WHERE m.team_id = t.id) AS member_count,
                   (SELECT COUNT(*) FROM projects p WHERE p.team_id = t.id) AS project_count
            FROM teams t
            WHERE EXISTS (
                SELECT 1 FROM team_members tm
                WHERE tm.team_id = t.id AND tm.user_id = $1
            )
            ORDER BY t.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| TeamWithCounts {
                team: row.team,
                count: TeamCounts {
                    members: row.member_count,
                    projects: row.project_count,
                },
            })
            .collect())
    }
}

impl TeamMember {
    /// Adds a membership, leaving an existing one untouched
    pub(crate) async fn add(
        conn: &mut PgConnection,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO team_members (team_id, user_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (team_id, user_id) DO NOTHING
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .bind(role)
        .execute(conn)
        .await?;

        Ok(())
    }

    pub async fn list_by_team(pool: &PgPool, team_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT team_id, user_id, role, created_at
            FROM team_members
            WHERE team_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(pool)
        .await
    }
}
