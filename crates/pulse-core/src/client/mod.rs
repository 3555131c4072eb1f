//! Clients for the external services behind an answer.
//!
//! Each service sits behind a trait so the orchestrator can be driven by
//! in-memory fakes in tests:
//!
//! - [`IssueTracker`]: open issues assigned to a tracker account (Jira)
//! - [`SourceHost`]: push commits and pull requests for a host account (GitHub)
//! - [`Summarizer`]: prose summary of an activity bundle (OpenAI chat completions)

pub mod github;
pub mod jira;
pub mod openai;

pub use github::GitHubClient;
pub use jira::JiraClient;
pub use openai::OpenAiSummarizer;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{ActivityBundle, Commit, Intent, Issue, PullRequestLookup};

/// Issue tracker lookups
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Open issues assigned to `tracker_id`, most recently updated first.
    async fn fetch_issues(&self, tracker_id: &str) -> Result<Vec<Issue>>;
}

/// Source host lookups
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// Recent push events for `host_id`.
    async fn fetch_commits(&self, host_id: &str) -> Result<Vec<Commit>>;

    /// Pull requests authored by `host_id`.
    ///
    /// An unknown account yields [`PullRequestLookup::Unavailable`]; transport
    /// and auth failures are errors.
    async fn fetch_pull_requests(&self, host_id: &str) -> Result<PullRequestLookup>;
}

/// Natural-language summary generation
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        name: &str,
        activity: &ActivityBundle,
        intent: Intent,
    ) -> Result<String>;
}

/// Decode a successful JSON response or turn the status into an error
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    resp: reqwest::Response,
) -> Result<T> {
    let status = resp.status();
    debug!(service, status = %status, "Response received");

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::api(service, status.as_u16(), body));
    }

    resp.json()
        .await
        .map_err(|e| Error::decode(service, e.to_string()))
}

/// Strip trailing slashes so paths can be appended with `format!`
pub(crate) fn trim_base_url(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_base_url() {
        assert_eq!(trim_base_url("https://acme.atlassian.net/"), "https://acme.atlassian.net");
        assert_eq!(trim_base_url("https://api.github.com"), "https://api.github.com");
    }
}
