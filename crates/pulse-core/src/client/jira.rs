//! Jira Cloud client.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{read_json, trim_base_url, IssueTracker};
use crate::error::{Error, Result};
use crate::types::Issue;

const SERVICE: &str = "Jira";

/// Fields requested for each issue
const ISSUE_FIELDS: &[&str] = &["summary", "status", "updated"];

/// Jira REST client using basic auth (account email + API token)
#[derive(Clone)]
pub struct JiraClient {
    base_url: String,
    auth_header: String,
    client: reqwest::Client,
}

impl JiraClient {
    /// Create a client for the given site, e.g. `https://acme.atlassian.net`
    pub fn new(base_url: impl Into<String>, email: &str, api_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(base_url, email, api_token, client))
    }

    /// Create a client sharing an existing HTTP client
    pub fn with_client(
        base_url: impl Into<String>,
        email: &str,
        api_token: &str,
        client: reqwest::Client,
    ) -> Self {
        let credentials = STANDARD.encode(format!("{}:{}", email, api_token));
        Self {
            base_url: trim_base_url(base_url),
            auth_header: format!("Basic {}", credentials),
            client,
        }
    }
}

/// JQL for unresolved issues assigned to an account, newest first
pub fn assigned_issues_jql(assignee: &str) -> String {
    format!(
        r#"assignee="{}" AND statusCategory != Done ORDER BY updated DESC"#,
        assignee.replace('"', "\\\"")
    )
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    jql: String,
    fields: &'a [&'a str],
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<RawIssue>,
}

#[derive(Deserialize)]
struct RawIssue {
    key: String,
    fields: RawFields,
}

#[derive(Deserialize)]
struct RawFields {
    #[serde(default)]
    summary: String,
    status: RawStatus,
    #[serde(default)]
    updated: String,
}

#[derive(Deserialize)]
struct RawStatus {
    name: String,
}

impl From<RawIssue> for Issue {
    fn from(raw: RawIssue) -> Self {
        Issue {
            key: raw.key,
            summary: raw.fields.summary,
            status: raw.fields.status.name,
            updated: raw.fields.updated,
        }
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn fetch_issues(&self, tracker_id: &str) -> Result<Vec<Issue>> {
        let url = format!("{}/rest/api/3/search/jql", self.base_url);
        let body = SearchRequest {
            jql: assigned_issues_jql(tracker_id),
            fields: ISSUE_FIELDS,
        };
        debug!(url = %url, jql = %body.jql, "Searching Jira issues");

        let resp = self
            .client
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let search: SearchResponse = read_json(SERVICE, resp).await?;
        Ok(search.issues.into_iter().map(Issue::from).collect())
    }
}
