/// Issue model and database operations
///
/// Issues belong to a project and are visible only to the project's owner.
/// Deletion is soft: [`Issue::soft_delete`] stamps `deleted_at` and every
/// read path in this module ignores stamped rows, so a soft-deleted issue
/// behaves exactly like a missing one.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE issue_priority AS ENUM ('LOW', 'MEDIUM', 'HIGH');
///
/// CREATE TABLE issues (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     description TEXT,
///     status TEXT NOT NULL DEFAULT 'Backlog',
///     priority issue_priority NOT NULL DEFAULT 'MEDIUM',
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     creator_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     assignee_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     due_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     deleted_at TIMESTAMPTZ
/// );
/// ```
///
/// # Ordering
///
/// `createdAt`, `updatedAt` and `dueDate` ordering happens in SQL. Priority
/// ordering is done in memory with [`sort_by_priority`] after fetching in
/// newest-first order, so equal priorities stay newest-first.
///
/// # Example
///
/// ```no_run
/// use issuedeck_shared::models::issue::{Issue, IssueFilter, SortField, SortOrder};
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let filter = IssueFilter {
///     search: Some("login".to_string()),
///     sort_by: SortField::Priority,
///     sort_order: SortOrder::Desc,
///     ..Default::default()
/// };
///
/// let issues = Issue::list_for_owner(&pool, user_id, &filter).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Status given to issues created without one
pub const DEFAULT_STATUS: &str = "Backlog";

/// Issue priority
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "issue_priority", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }

    /// Ordering weight used by priority sorting: HIGH=3, MEDIUM=2, LOW=1
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown priority name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid priority '{0}': expected LOW, MEDIUM or HIGH")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// Listing sort key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    DueDate,
    /// Sorted in memory by [`Priority::rank`]
    Priority,
}

impl SortField {
    /// Parses a `sortBy` value; unknown keys fall back to `createdAt`
    pub fn parse(value: &str) -> Self {
        match value {
            "updatedAt" => SortField::UpdatedAt,
            "dueDate" => SortField::DueDate,
            "priority" => SortField::Priority,
            _ => SortField::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parses a `sortOrder` value; anything but `asc` means descending
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Which end of a due-date range a date-only value stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// Start of the day (00:00:00 UTC)
    Start,
    /// End of the day (23:59:59.999 UTC)
    End,
}

/// Parses an RFC 3339 timestamp or a `YYYY-MM-DD` date
///
/// Date-only values expand to the start or end of that UTC day so that an
/// inclusive `dueDateTo=2025-06-30` still matches issues due that afternoon.
pub fn parse_date_bound(value: &str, bound: DateBound) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let naive = match bound {
        DateBound::Start => date.and_hms_opt(0, 0, 0)?,
        DateBound::End => date.and_hms_milli_opt(23, 59, 59, 999)?,
    };

    Some(naive.and_utc())
}

/// Escapes `%`, `_` and `\` so user input matches literally inside ILIKE
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: Uuid,

    pub title: String,

    pub description: Option<String>,

    /// Free-form; the board offers "Backlog", "In Progress" and "Done"
    pub status: String,

    pub priority: Priority,

    pub project_id: Uuid,

    pub creator_id: Uuid,

    pub assignee_id: Option<Uuid>,

    pub due_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Public identity of an issue's assignee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssigneeSummary {
    pub id: Uuid,

    pub name: Option<String>,

    pub email: String,
}

/// Listing item: the issue plus its assignee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueListItem {
    #[serde(flatten)]
    pub issue: Issue,

    pub assignee: Option<AssigneeSummary>,
}

impl HasPriority for IssueListItem {
    fn priority(&self) -> Priority {
        self.issue.priority
    }
}

#[derive(sqlx::FromRow)]
struct IssueListRow {
    #[sqlx(flatten)]
    issue: Issue,
    assignee_name: Option<String>,
    assignee_email: Option<String>,
}

impl From<IssueListRow> for IssueListItem {
    fn from(row: IssueListRow) -> Self {
        let assignee = match (row.issue.assignee_id, row.assignee_email) {
            (Some(id), Some(email)) => Some(AssigneeSummary {
                id,
                name: row.assignee_name,
                email,
            }),
            _ => None,
        };

        IssueListItem {
            issue: row.issue,
            assignee,
        }
    }
}

/// A live issue together with the owner of its project
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OwnedIssue {
    #[sqlx(flatten)]
    pub issue: Issue,

    pub project_owner_id: Uuid,
}

/// Anything that can be ordered by priority
pub trait HasPriority {
    fn priority(&self) -> Priority;
}

impl HasPriority for Issue {
    fn priority(&self) -> Priority {
        self.priority
    }
}

/// Stable in-memory sort by [`Priority::rank`]
///
/// Items of equal rank keep their incoming order.
pub fn sort_by_priority<T: HasPriority>(items: &mut [T], order: SortOrder) {
    match order {
        SortOrder::Asc => items.sort_by_key(|item| item.priority().rank()),
        SortOrder::Desc => items.sort_by(|a, b| b.priority().rank().cmp(&a.priority().rank())),
    }
}

/// Listing filters and ordering; `None` fields don't filter
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    /// Case-insensitive title substring
    pub search: Option<String>,

    pub status: Option<String>,

    pub assignee_id: Option<Uuid>,

    pub priority: Option<Priority>,

    /// Only issues that have a due date
    pub has_due_date: bool,

    /// Inclusive lower bound on the due date
    pub due_date_from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on the due date
    pub due_date_to: Option<DateTime<Utc>>,

    pub sort_by: SortField,

    pub sort_order: SortOrder,
}

#[derive(Debug, Clone)]
pub struct CreateIssue {
    pub title: String,

    pub description: Option<String>,

    /// Defaults to "Backlog"
    pub status: Option<String>,

    /// Defaults to MEDIUM
    pub priority: Option<Priority>,

    pub project_id: Uuid,

    pub creator_id: Uuid,

    pub assignee_id: Option<Uuid>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update; `None` leaves a field unchanged
///
/// Nullable columns use `Option<Option<_>>`: `Some(None)` clears them.
#[derive(Debug, Clone, Default)]
pub struct UpdateIssue {
    pub title: Option<String>,

    pub description: Option<Option<String>>,

    pub status: Option<String>,

    pub priority: Option<Priority>,

    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateIssue {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

const ISSUE_COLUMNS: &str = "id, title, description, status, priority, project_id, creator_id, \
     assignee_id, due_date, created_at, updated_at, deleted_at";

const PREFIXED_ISSUE_COLUMNS: &str = "i.id, i.title, i.description, i.status, i.priority, \
     i.project_id, i.creator_id, i.assignee_id, i.due_date, i.created_at, i.updated_at, \
     i.deleted_at";

impl Issue {
    pub async fn create(pool: &PgPool, data: CreateIssue) -> Result<Self, sqlx::Error> {
        let issue = sqlx::query_as::<_, Issue>(&format!(
            r#"
            INSERT INTO issues (title, description, status, priority, project_id,
                                creator_id, assignee_id, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ISSUE_COLUMNS}
            "#
        ))
        .bind(data.title)
        .bind(data.description)
        .bind(data.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()))
        .bind(data.priority.unwrap_or_default())
        .bind(data.project_id)
        .bind(data.creator_id)
        .bind(data.assignee_id)
        .bind(data.due_date)
        .fetch_one(pool)
        .await?;

        tracing::debug!(issue_id = %issue.id, project_id = %issue.project_id, "Issue created");
        Ok(issue)
    }

    /// Loads a live (not soft-deleted) issue with its project's owner
    pub async fn find_live_with_owner(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<OwnedIssue>, sqlx::Error> {
        sqlx::query_as::<_, OwnedIssue>(&format!(
            r#"
            SELECT {PREFIXED_ISSUE_COLUMNS}, p.owner_id AS project_owner_id
            FROM issues i
            JOIN projects p ON p.id = i.project_id
            WHERE i.id = $1 AND i.deleted_at IS NULL
            "#
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists live issues in projects owned by `owner_id`
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        filter: &IssueFilter,
    ) -> Result<Vec<IssueListItem>, sqlx::Error> {
        let mut qb = Self::list_query(owner_id, filter);

        let rows: Vec<IssueListRow> = qb.build_query_as().fetch_all(pool).await?;
        let mut items: Vec<IssueListItem> = rows.into_iter().map(Into::into).collect();

        if filter.sort_by == SortField::Priority {
            sort_by_priority(&mut items, filter.sort_order);
        }

        Ok(items)
    }

    fn list_query(owner_id: Uuid, filter: &IssueFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PREFIXED_ISSUE_COLUMNS}, u.name AS assignee_name, u.email AS assignee_email \
             FROM issues i \
             JOIN projects p ON p.id = i.project_id \
             LEFT JOIN users u ON u.id = i.assignee_id \
             WHERE i.deleted_at IS NULL AND p.owner_id = "
        ));
        qb.push_bind(owner_id);

        if let Some(search) = &filter.search {
            qb.push(" AND i.title ILIKE ");
            qb.push_bind(format!("%{}%", escape_like(search)));
        }
        if let Some(status) = &filter.status {
            qb.push(" AND i.status = ");
            qb.push_bind(status.clone());
        }
        if let Some(assignee_id) = filter.assignee_id {
            qb.push(" AND i.assignee_id = ");
            qb.push_bind(assignee_id);
        }
        if let Some(priority) = filter.priority {
            qb.push(" AND i.priority = ");
            qb.push_bind(priority);
        }
        if filter.has_due_date {
            qb.push(" AND i.due_date IS NOT NULL");
        }
        if let Some(from) = filter.due_date_from {
            qb.push(" AND i.due_date >= ");
            qb.push_bind(from);
        }
        if let Some(to) = filter.due_date_to {
            qb.push(" AND i.due_date <= ");
            qb.push_bind(to);
        }

        let order = filter.sort_order.as_sql();
        match filter.sort_by {
            SortField::CreatedAt => qb.push(format!(" ORDER BY i.created_at {order}, i.id")),
            SortField::UpdatedAt => qb.push(format!(
                " ORDER BY i.updated_at {order}, i.created_at DESC, i.id"
            )),
            SortField::DueDate => qb.push(format!(
                " ORDER BY i.due_date {order} NULLS LAST, i.created_at DESC, i.id"
            )),
            // Reordered in memory; fetch newest first so ties stay newest first
            SortField::Priority => qb.push(" ORDER BY i.created_at DESC, i.id"),
        };

        qb
    }

    /// Most recent live issues in the owner's projects, newest first
    pub async fn recent_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Issue>(&format!(
            r#"
            SELECT {PREFIXED_ISSUE_COLUMNS}
            FROM issues i
            JOIN projects p ON p.id = i.project_id
            WHERE p.owner_id = $1 AND i.deleted_at IS NULL
            ORDER BY i.created_at DESC, i.id
            LIMIT $2
            "#
        ))
        .bind(owner_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Applies a partial update to a live issue
    ///
    /// Returns None if the issue doesn't exist or was soft-deleted.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateIssue,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE issues SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }

        query.push_str(&format!(
            " WHERE id = $1 AND deleted_at IS NULL RETURNING {ISSUE_COLUMNS}"
        ));

        let mut q = sqlx::query_as::<_, Issue>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }

        q.fetch_optional(pool).await
    }

    /// Stamps `deleted_at`; the row is never removed
    ///
    /// Returns None if the issue doesn't exist or was already deleted.
    pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Issue>(&format!(
            r#"
            UPDATE issues
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {ISSUE_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Loads an issue by id including soft-deleted rows
    pub async fn find_by_id_including_deleted(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Issue>(&format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn issue_with(priority: Priority, title: &str) -> Issue {
        Issue {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            status: DEFAULT_STATUS.to_string(),
            priority,
            project_id: Uuid::new_v4(),
            creator_id: Uuid::new_v4(),
            assignee_id: None,
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    fn priorities(issues: &[Issue]) -> Vec<Priority> {
        issues.iter().map(|i| i.priority).collect()
    }

    #[test]
    fn test_sort_by_priority_desc() {
        let mut issues = vec![
            issue_with(Priority::Low, "a"),
            issue_with(Priority::High, "b"),
            issue_with(Priority::Medium, "c"),
        ];

        sort_by_priority(&mut issues, SortOrder::Desc);
        assert_eq!(
            priorities(&issues),
            vec![Priority::High, Priority::Medium, Priority::Low]
        );
    }

    #[test]
    fn test_sort_by_priority_asc() {
        let mut issues = vec![
            issue_with(Priority::Low, "a"),
            issue_with(Priority::High, "b"),
            issue_with(Priority::Medium, "c"),
        ];

        sort_by_priority(&mut issues, SortOrder::Asc);
        assert_eq!(
            priorities(&issues),
            vec![Priority::Low, Priority::Medium, Priority::High]
        );
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let mut issues = vec![
            issue_with(Priority::High, "newest"),
            issue_with(Priority::Low, "x"),
            issue_with(Priority::High, "older"),
        ];

        sort_by_priority(&mut issues, SortOrder::Desc);
        let titles: Vec<&str> = issues.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "older", "x"]);
    }

    #[test]
    fn test_priority_parse_and_rank() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("URGENT".parse::<Priority>().is_err());
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"LOW\"");
    }

    #[test]
    fn test_sort_field_and_order_parse() {
        assert_eq!(SortField::parse("updatedAt"), SortField::UpdatedAt);
        assert_eq!(SortField::parse("dueDate"), SortField::DueDate);
        assert_eq!(SortField::parse("priority"), SortField::Priority);
        assert_eq!(SortField::parse("title"), SortField::CreatedAt);
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Desc);
    }

    #[test]
    fn test_parse_date_bound() {
        let start = parse_date_bound("2025-06-30", DateBound::Start).unwrap();
        assert_eq!((start.year(), start.month(), start.day()), (2025, 6, 30));
        assert_eq!(start.hour(), 0);

        let end = parse_date_bound("2025-06-30", DateBound::End).unwrap();
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));

        let exact = parse_date_bound("2025-06-30T12:30:00+02:00", DateBound::End).unwrap();
        assert_eq!(exact.hour(), 10);

        assert!(parse_date_bound("next tuesday", DateBound::Start).is_none());
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("fix bug"), "fix bug");
        assert_eq!(escape_like("100%_done\\"), "100\\%\\_done\\\\");
    }

    #[test]
    fn test_list_query_scopes_to_owner_and_live_rows() {
        let filter = IssueFilter {
            search: Some("crash".to_string()),
            status: Some("Done".to_string()),
            priority: Some(Priority::High),
            has_due_date: true,
            sort_by: SortField::DueDate,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };

        let qb = Issue::list_query(Uuid::new_v4(), &filter);
        let sql = qb.sql();

        assert!(sql.contains("i.deleted_at IS NULL"));
        assert!(sql.contains("p.owner_id = $1"));
        assert!(sql.contains("i.title ILIKE $2"));
        assert!(sql.contains("i.status = $3"));
        assert!(sql.contains("i.priority = $4"));
        assert!(sql.contains("i.due_date IS NOT NULL"));
        assert!(sql.contains("ORDER BY i.due_date ASC NULLS LAST"));
    }

    #[test]
    fn test_list_query_priority_fetches_newest_first() {
        let filter = IssueFilter {
            sort_by: SortField::Priority,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };

        let qb = Issue::list_query(Uuid::new_v4(), &filter);
        assert!(qb.sql().contains("ORDER BY i.created_at DESC"));
    }

    #[test]
    fn test_update_issue_is_empty() {
        assert!(UpdateIssue::default().is_empty());
        let update = UpdateIssue {
            description: Some(None),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_issue_wire_format() {
        let issue = issue_with(Priority::High, "Fix bug");
        let item = IssueListItem {
            assignee: Some(AssigneeSummary {
                id: issue.creator_id,
                name: Some("Ada".to_string()),
                email: "ada@example.com".to_string(),
            }),
            issue,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["title"], "Fix bug");
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["status"], "Backlog");
        assert!(json.get("projectId").is_some());
        assert!(json["deletedAt"].is_null());
        assert_eq!(json["assignee"]["email"], "ada@example.com");
    }
}
