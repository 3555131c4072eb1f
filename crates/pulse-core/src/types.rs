//! Shared types for pulse-core.
//!
//! These types flow from the tracker clients through the orchestrator into
//! the summarizer prompt.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Query Types
// ─────────────────────────────────────────────────────────────────────────────

/// Category of information a question asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Issue tracker only
    Jira,
    /// Source host only (commits and pull requests)
    Github,
    /// Both trackers
    Both,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Jira => "jira",
            Intent::Github => "github",
            Intent::Both => "both",
        }
    }

    /// Whether the issue tracker section is relevant for this intent
    pub fn includes_issues(&self) -> bool {
        !matches!(self, Intent::Github)
    }

    /// Whether the source host sections are relevant for this intent
    pub fn includes_code(&self) -> bool {
        !matches!(self, Intent::Jira)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured form of a free-text question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub intent: Option<Intent>,
    pub name: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Identity Types
// ─────────────────────────────────────────────────────────────────────────────

/// Tracker-specific account identifiers for one team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Issue tracker assignee id (usually an email)
    #[serde(rename = "jira")]
    pub tracker_id: String,
    /// Source host username
    #[serde(rename = "github")]
    pub host_id: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Activity Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub updated: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub repo: String,
    pub commit_id: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub title: String,
    pub url: String,
    pub state: String,
    pub updated: String,
}

/// Outcome of a pull request lookup.
///
/// The source host reports an unknown account as a lookup failure rather
/// than a transport error, so it gets its own variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestLookup {
    Found(Vec<PullRequest>),
    Unavailable { reason: String },
}

/// Everything fetched for one summarization call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityBundle {
    pub issues: Vec<Issue>,
    pub commits: Vec<Commit>,
    pub pull_requests: Vec<PullRequest>,
}

impl ActivityBundle {
    /// Whether every list relevant to `intent` is empty
    pub fn is_empty_for(&self, intent: Intent) -> bool {
        let no_issues = !intent.includes_issues() || self.issues.is_empty();
        let no_code = !intent.includes_code()
            || (self.commits.is_empty() && self.pull_requests.is_empty());
        no_issues && no_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit() -> Commit {
        Commit {
            repo: "acme/api".to_string(),
            commit_id: "abc123".to_string(),
            timestamp: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_intent_sections() {
        assert!(Intent::Jira.includes_issues());
        assert!(!Intent::Jira.includes_code());
        assert!(!Intent::Github.includes_issues());
        assert!(Intent::Github.includes_code());
        assert!(Intent::Both.includes_issues());
        assert!(Intent::Both.includes_code());
    }

    #[test]
    fn test_bundle_empty_for_intent() {
        let bundle = ActivityBundle {
            commits: vec![commit()],
            ..Default::default()
        };

        assert!(bundle.is_empty_for(Intent::Jira));
        assert!(!bundle.is_empty_for(Intent::Github));
        assert!(!bundle.is_empty_for(Intent::Both));
        assert!(ActivityBundle::default().is_empty_for(Intent::Both));
    }

    #[test]
    fn test_commit_serializes_camel_case() {
        let json = serde_json::to_value(commit()).unwrap();
        assert_eq!(json["commitId"], "abc123");
    }
}
