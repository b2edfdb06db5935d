/// Issue endpoints
///
/// All four operations share one path and identify the issue in the body:
///
/// - `POST /api/issues` - create (provisions a default team and project for
///   a user's first issue)
/// - `GET /api/issues` - list with filters and sorting
/// - `PUT /api/issues` - partial update
/// - `DELETE /api/issues` - soft delete
///
/// Only issues in projects owned by the caller are visible. Soft-deleted
/// issues behave as if they didn't exist.

use super::current_user;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use issuedeck_shared::{
    auth::{authorization, middleware::SessionContext},
    models::{
        issue::{
            parse_date_bound, CreateIssue, DateBound, Issue, IssueFilter, IssueListItem,
            Priority, SortField, SortOrder, UpdateIssue,
        },
        project::Project,
    },
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Keeps an explicit `null` distinguishable from an absent field
///
/// Used with `#[serde(default)]`: absent -> `None`, `null` -> `Some(None)`.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Treats empty and whitespace-only values as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_uuid(field: &str, value: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| ApiError::invalid_field(field, format!("Invalid {}", field)))
}

fn parse_priority(value: &str) -> ApiResult<Priority> {
    value
        .parse::<Priority>()
        .map_err(|e| ApiError::invalid_field("priority", e.to_string()))
}

fn parse_due_date(field: &str, value: &str, bound: DateBound) -> ApiResult<DateTime<Utc>> {
    parse_date_bound(value, bound).ok_or_else(|| {
        ApiError::invalid_field(
            field,
            format!("Invalid {}: expected RFC 3339 or YYYY-MM-DD", field),
        )
    })
}

fn require_issue_id(id: Option<String>) -> ApiResult<Uuid> {
    let id = non_blank(id).ok_or_else(|| ApiError::invalid_field("id", "Issue ID is required"))?;
    parse_uuid("id", &id)
}

/// Reads `id` from an otherwise unchecked JSON body
fn issue_id_from_body(body: &Value) -> ApiResult<Uuid> {
    match body.get("id") {
        None | Some(Value::Null) => require_issue_id(None),
        Some(Value::String(id)) => require_issue_id(Some(id.clone())),
        Some(_) => Err(ApiError::invalid_field("id", "Invalid id")),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Defaults to "Backlog"
    #[serde(default)]
    pub status: Option<String>,

    /// LOW, MEDIUM or HIGH; defaults to MEDIUM
    #[serde(default)]
    pub priority: Option<String>,

    #[serde(default)]
    pub due_date: Option<String>,

    /// Target project; the caller's first project when absent
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Validated creation input, before the project is resolved
#[derive(Debug, PartialEq)]
struct NewIssue {
    title: String,
    description: Option<String>,
    status: Option<String>,
    priority: Option<Priority>,
    due_date: Option<DateTime<Utc>>,
    project_id: Option<Uuid>,
}

impl CreateIssueRequest {
    fn validate(self) -> ApiResult<NewIssue> {
        let title =
            non_blank(self.title).ok_or_else(|| ApiError::invalid_field("title", "Title is required"))?;

        let priority = non_blank(self.priority)
            .map(|p| parse_priority(&p))
            .transpose()?;

        let due_date = non_blank(self.due_date)
            .map(|d| parse_due_date("dueDate", &d, DateBound::Start))
            .transpose()?;

        let project_id = non_blank(self.project_id)
            .map(|id| parse_uuid("projectId", &id))
            .transpose()?;

        Ok(NewIssue {
            title,
            description: non_blank(self.description),
            status: non_blank(self.status),
            priority,
            due_date,
            project_id,
        })
    }
}

/// Query string for `GET /api/issues`; empty values count as absent
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIssuesQuery {
    pub search: Option<String>,

    pub status: Option<String>,

    pub assignee_id: Option<String>,

    pub priority: Option<String>,

    /// Only `true` filters
    pub has_due_date: Option<String>,

    pub due_date_from: Option<String>,

    pub due_date_to: Option<String>,

    /// createdAt | updatedAt | dueDate | priority
    pub sort_by: Option<String>,

    /// asc | desc
    pub sort_order: Option<String>,
}

impl TryFrom<ListIssuesQuery> for IssueFilter {
    type Error = ApiError;

    fn try_from(query: ListIssuesQuery) -> Result<Self, Self::Error> {
        Ok(IssueFilter {
            search: non_blank(query.search),
            status: non_blank(query.status),
            assignee_id: non_blank(query.assignee_id)
                .map(|id| parse_uuid("assigneeId", &id))
                .transpose()?,
            priority: non_blank(query.priority)
                .map(|p| parse_priority(&p))
                .transpose()?,
            has_due_date: non_blank(query.has_due_date)
                .is_some_and(|v| v.eq_ignore_ascii_case("true")),
            due_date_from: non_blank(query.due_date_from)
                .map(|d| parse_due_date("dueDateFrom", &d, DateBound::Start))
                .transpose()?,
            due_date_to: non_blank(query.due_date_to)
                .map(|d| parse_due_date("dueDateTo", &d, DateBound::End))
                .transpose()?,
            sort_by: non_blank(query.sort_by)
                .map(|s| SortField::parse(&s))
                .unwrap_or_default(),
            sort_order: non_blank(query.sort_order)
                .map(|s| SortOrder::parse(&s))
                .unwrap_or_default(),
        })
    }
}

/// Body of `PUT /api/issues`
///
/// Absent fields are left alone. `description` and `dueDate` are cleared by
/// `null` or an empty string. A `null` title, status or priority is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub priority: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<String>>,
}

impl UpdateIssueRequest {
    /// Field checks, run only after ownership is established
    fn into_update(self) -> ApiResult<UpdateIssue> {
        let title = match self.title {
            Some(title) => Some(
                non_blank(Some(title))
                    .ok_or_else(|| ApiError::invalid_field("title", "Title cannot be empty"))?,
            ),
            None => None,
        };

        let status = match self.status {
            Some(status) => Some(
                non_blank(Some(status))
                    .ok_or_else(|| ApiError::invalid_field("status", "Status cannot be empty"))?,
            ),
            None => None,
        };

        let priority = self.priority.map(|p| parse_priority(&p)).transpose()?;

        let description = self.description.map(non_blank);

        let due_date = match self.due_date {
            Some(value) => Some(
                non_blank(value)
                    .map(|d| parse_due_date("dueDate", &d, DateBound::Start))
                    .transpose()?,
            ),
            None => None,
        };

        Ok(UpdateIssue {
            title,
            description,
            status,
            priority,
            due_date,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteIssueRequest {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteIssueResponse {
    pub message: String,

    pub id: Uuid,
}

/// Create an issue
///
/// ```text
/// POST /api/issues
/// { "title": "Fix bug", "priority": "HIGH", "dueDate": "2025-07-01" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: title missing or blank, invalid priority, date or id
/// - `403 Forbidden`: `projectId` belongs to another user
/// - `404 Not Found`: session user or `projectId` doesn't exist
pub async fn create_issue(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    body: Result<Json<CreateIssueRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Issue>)> {
    let Json(req) = body?;
    let input = req.validate()?;

    let user = current_user(&state, &session).await?;

    let project = match input.project_id {
        Some(project_id) => {
            authorization::require_project_owner(&state.db, project_id, user.id).await?
        }
        None => Project::ensure_default(&state.db, user.id).await?,
    };

    let issue = Issue::create(
        &state.db,
        CreateIssue {
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            project_id: project.id,
            creator_id: user.id,
            assignee_id: Some(user.id),
            due_date: input.due_date,
        },
    )
    .await?;

    tracing::info!(issue_id = %issue.id, project_id = %project.id, user_id = %user.id, "Issue created");

    Ok((StatusCode::CREATED, Json(issue)))
}

/// List issues in the caller's projects
///
/// ```text
/// GET /api/issues?search=login&priority=HIGH&sortBy=priority&sortOrder=desc
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: invalid `assigneeId`, `priority` or date bound
pub async fn list_issues(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<ListIssuesQuery>,
) -> ApiResult<Json<Vec<IssueListItem>>> {
    let filter = IssueFilter::try_from(query)?;
    let user = current_user(&state, &session).await?;

    let issues = Issue::list_for_owner(&state.db, user.id, &filter).await?;

    tracing::debug!(user_id = %user.id, count = issues.len(), "Listed issues");

    Ok(Json(issues))
}

/// Update an issue
///
/// ```text
/// PUT /api/issues
/// { "id": "uuid", "status": "Done", "description": null }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing id, then (after ownership) invalid fields
/// - `403 Forbidden`: issue belongs to another user's project
/// - `404 Not Found`: issue absent or deleted
pub async fn update_issue(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Issue>> {
    let Json(raw) = body?;
    let issue_id = issue_id_from_body(&raw)?;

    let user = current_user(&state, &session).await?;
    let existing = authorization::require_issue_owner(&state.db, issue_id, user.id).await?;

    // Field shapes are only checked once the caller owns the issue
    let req: UpdateIssueRequest = serde_json::from_value(raw)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;
    let update = req.into_update()?;
    if update.is_empty() {
        return Ok(Json(existing));
    }

    let issue = Issue::update(&state.db, issue_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Issue not found".to_string()))?;

    tracing::info!(issue_id = %issue.id, user_id = %user.id, "Issue updated");

    Ok(Json(issue))
}

/// Soft-delete an issue
///
/// ```text
/// DELETE /api/issues
/// { "id": "uuid" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing or malformed id
/// - `403 Forbidden`: issue belongs to another user's project
/// - `404 Not Found`: issue absent or already deleted
pub async fn delete_issue(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    body: Result<Json<DeleteIssueRequest>, JsonRejection>,
) -> ApiResult<Json<DeleteIssueResponse>> {
    let Json(req) = body?;
    let issue_id = require_issue_id(req.id)?;

    let user = current_user(&state, &session).await?;
    authorization::require_issue_owner(&state.db, issue_id, user.id).await?;

    // A concurrent delete between the check and here also reads as absent
    let deleted = Issue::soft_delete(&state.db, issue_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Issue not found".to_string()))?;

    tracing::info!(issue_id = %deleted.id, user_id = %user.id, "Issue deleted");

    Ok(Json(DeleteIssueResponse {
        message: "Issue deleted successfully".to_string(),
        id: deleted.id,
    }))
}
