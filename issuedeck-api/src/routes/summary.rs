/// AI summary endpoint
///
/// ```text
/// POST /api/ai/summary
/// ```
///
/// ```json
/// { "summary": "Two high-priority bugs are blocking the release..." }
/// ```

use super::current_user;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use issuedeck_shared::{
    auth::middleware::SessionContext,
    models::issue::Issue,
    summary::{summarize_issues, SUMMARY_ISSUE_LIMIT},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Summarizes the caller's most recent issues
///
/// # Errors
///
/// - `404 Not Found`: session user no longer exists
/// - `500 Internal Server Error`: summaries not configured, or the
///   completion service failed (`upstream_error`)
pub async fn generate_summary(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Json<SummaryResponse>> {
    let summarizer = state.summarizer.clone().ok_or_else(|| {
        tracing::warn!("Summary requested but no completion client is configured");
        ApiError::UpstreamError("AI summary is not configured".to_string())
    })?;

    let user = current_user(&state, &session).await?;
    let issues = Issue::recent_for_owner(&state.db, user.id, SUMMARY_ISSUE_LIMIT).await?;

    tracing::debug!(user_id = %user.id, issues = issues.len(), "Generating summary");

    let summary = summarize_issues(&*summarizer, &issues).await?;

    Ok(Json(SummaryResponse { summary }))
}
