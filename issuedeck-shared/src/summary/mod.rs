/// AI summaries of a user's issues
///
/// Renders the most recent issues into a fixed prompt and forwards it to a
/// [`CompletionClient`]. An empty issue list short-circuits to a canned
/// message without touching the completion service.
///
/// # Example
///
/// ```no_run
/// use issuedeck_shared::summary::{summarize_issues, client::CompletionClient};
/// use issuedeck_shared::models::issue::Issue;
///
/// # async fn example(client: &dyn CompletionClient, issues: Vec<Issue>) -> Result<(), Box<dyn std::error::Error>> {
/// let summary = summarize_issues(client, &issues).await?;
/// println!("{}", summary);
/// # Ok(())
/// # }
/// ```

pub mod client;

use crate::models::issue::Issue;
use client::{CompletionClient, CompletionError, CompletionRequest};

/// Number of recent issues included in a summary
pub const SUMMARY_ISSUE_LIMIT: i64 = 20;

/// Reply used when the user has no issues at all
pub const NO_ISSUES_MESSAGE: &str =
    "You don't have any issues yet. Create some issues to get an AI summary!";

/// Reply used when the service returns no text
pub const EMPTY_SUMMARY_MESSAGE: &str = "Unable to generate summary.";

pub const SYSTEM_MESSAGE: &str = "You are a helpful project management assistant that provides concise, actionable summaries.";

pub const MAX_TOKENS: u32 = 200;

pub const TEMPERATURE: f32 = 0.7;

/// One numbered line per issue: `1. [Backlog] Title (Priority: HIGH) - description`
pub fn render_issue_lines(issues: &[Issue]) -> String {
    issues
        .iter()
        .enumerate()
        .map(|(idx, issue)| {
            let mut line = format!(
                "{}. [{}] {} (Priority: {})",
                idx + 1,
                issue.status,
                issue.title,
                issue.priority
            );
            if let Some(description) = issue.description.as_deref().filter(|d| !d.is_empty()) {
                line.push_str(" - ");
                line.push_str(description);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_prompt(issues: &[Issue]) -> String {
    format!(
        "You are a project management assistant. Analyze the following list of issues and provide a concise summary (2-3 sentences) highlighting:\n\
         1. Overall project status\n\
         2. Key priorities or blockers\n\
         3. Progress trends\n\
         \n\
         Issues:\n\
         {}\n\
         \n\
         Provide a friendly, actionable summary:",
        render_issue_lines(issues)
    )
}

/// Produces the summary text for a user's issues
///
/// # Errors
///
/// Propagates the completion client's error unchanged.
pub async fn summarize_issues(
    client: &dyn CompletionClient,
    issues: &[Issue],
) -> Result<String, CompletionError> {
    if issues.is_empty() {
        return Ok(NO_ISSUES_MESSAGE.to_string());
    }

    let request = CompletionRequest {
        system: SYSTEM_MESSAGE.to_string(),
        prompt: render_prompt(issues),
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    };

    let summary = client
        .complete(request)
        .await?
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| EMPTY_SUMMARY_MESSAGE.to_string());

    Ok(summary)
}
