//! GitHub REST client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{read_json, trim_base_url, SourceHost};
use crate::error::{Error, Result};
use crate::types::{Commit, PullRequest, PullRequestLookup};

const SERVICE: &str = "GitHub";

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("team-pulse/", env!("CARGO_PKG_VERSION"));

/// GitHub client authenticated with a personal access token
#[derive(Clone)]
pub struct GitHubClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl GitHubClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: trim_base_url(base_url),
            token: token.into(),
            client,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
    }
}

#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: String,
    repo: RawRepo,
    #[serde(default)]
    payload: RawPayload,
    created_at: String,
}

#[derive(Deserialize)]
struct RawRepo {
    name: String,
}

#[derive(Deserialize, Default)]
struct RawPayload {
    head: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RawPullRequest>,
}

#[derive(Deserialize)]
struct RawPullRequest {
    title: String,
    html_url: String,
    state: String,
    updated_at: String,
}

impl From<RawPullRequest> for PullRequest {
    fn from(raw: RawPullRequest) -> Self {
        PullRequest {
            title: raw.title,
            url: raw.html_url,
            state: raw.state,
            updated: raw.updated_at,
        }
    }
}

/// Keep push events only, one commit entry per push
fn push_commits(events: Vec<RawEvent>) -> Vec<Commit> {
    events
        .into_iter()
        .filter(|e| e.event_type == "PushEvent")
        .map(|e| Commit {
            repo: e.repo.name,
            commit_id: e.payload.head.unwrap_or_default(),
            timestamp: e.created_at,
        })
        .collect()
}

#[async_trait]
impl SourceHost for GitHubClient {
    async fn fetch_commits(&self, host_id: &str) -> Result<Vec<Commit>> {
        let url = format!("{}/users/{}/events", self.base_url, host_id);
        debug!(url = %url, "Fetching GitHub events");

        let resp = self.get(&url).send().await?;
        let events: Vec<RawEvent> = read_json(SERVICE, resp).await?;
        Ok(push_commits(events))
    }

    async fn fetch_pull_requests(&self, host_id: &str) -> Result<PullRequestLookup> {
        let url = format!("{}/search/issues", self.base_url);
        let query = format!("author:{} type:pr", host_id);
        debug!(url = %url, q = %query, "Searching GitHub pull requests");

        let resp = self.get(&url).query(&[("q", query.as_str())]).send().await?;

        match resp.status() {
            StatusCode::UNPROCESSABLE_ENTITY => {
                warn!(user = %host_id, "GitHub user not found or invalid query");
                Ok(PullRequestLookup::Unavailable {
                    reason: format!("Could not find GitHub user \"{}\".", host_id),
                })
            }
            StatusCode::NOT_FOUND => {
                warn!(user = %host_id, "GitHub user does not exist");
                Ok(PullRequestLookup::Unavailable {
                    reason: format!("GitHub user \"{}\" does not exist.", host_id),
                })
            }
            _ => {
                let search: SearchResponse = read_json(SERVICE, resp).await?;
                Ok(PullRequestLookup::Found(
                    search.items.into_iter().map(PullRequest::from).collect(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GitHubClient {
        GitHubClient::new(server.uri(), "test-token").unwrap()
    }

    #[tokio::test]
    async fn test_fetch_commits_keeps_push_events() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/testuser/events"))
            .and(header("Authorization", "token test-token"))
            .and(header("Accept", "application/vnd.github.v3+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "type": "PushEvent",
                    "repo": { "name": "test/repo" },
                    "payload": { "head": "abc123" },
                    "created_at": "2025-01-01T00:00:00Z"
                },
                {
                    "type": "PullRequestEvent",
                    "repo": { "name": "test/repo2" },
                    "payload": { "action": "opened" },
                    "created_at": "2025-01-02T00:00:00Z"
                },
                {
                    "type": "PushEvent",
                    "repo": { "name": "test/repo3" },
                    "payload": { "head": "ghi789" },
                    "created_at": "2025-01-03T00:00:00Z"
                }
            ])))
            .mount(&server)
            .await;

        let commits = client(&server).fetch_commits("testuser").await.unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(
            commits[0],
            Commit {
                repo: "test/repo".into(),
                commit_id: "abc123".into(),
                timestamp: "2025-01-01T00:00:00Z".into(),
            }
        );
        assert_eq!(commits[1].repo, "test/repo3");
    }

    #[tokio::test]
    async fn test_fetch_commits_without_push_events() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/testuser/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "type": "WatchEvent",
                    "repo": { "name": "test/repo" },
                    "payload": {},
                    "created_at": "2025-01-01T00:00:00Z"
                }
            ])))
            .mount(&server)
            .await;

        let commits = client(&server).fetch_commits("testuser").await.unwrap();
        assert!(commits.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_commits_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server).fetch_commits("testuser").await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_fetch_pull_requests() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("q", "author:testuser type:pr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {
                        "title": "Test PR",
                        "html_url": "https://github.com/test/repo/pull/1",
                        "state": "open",
                        "updated_at": "2025-01-01T00:00:00Z"
                    },
                    {
                        "title": "Another PR",
                        "html_url": "https://github.com/test/repo/pull/2",
                        "state": "closed",
                        "updated_at": "2025-01-02T00:00:00Z"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let lookup = client(&server).fetch_pull_requests("testuser").await.unwrap();

        let prs = match lookup {
            PullRequestLookup::Found(prs) => prs,
            other => panic!("expected pull requests, got {:?}", other),
        };
        assert_eq!(prs.len(), 2);
        assert_eq!(
            prs[0],
            PullRequest {
                title: "Test PR".into(),
                url: "https://github.com/test/repo/pull/1".into(),
                state: "open".into(),
                updated: "2025-01-01T00:00:00Z".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_pull_requests_unprocessable() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let lookup = client(&server).fetch_pull_requests("invaliduser").await.unwrap();
        match lookup {
            PullRequestLookup::Unavailable { reason } => {
                assert!(reason.contains("Could not find GitHub user"));
            }
            other => panic!("expected unavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_pull_requests_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let lookup = client(&server).fetch_pull_requests("nonexistent").await.unwrap();
        match lookup {
            PullRequestLookup::Unavailable { reason } => assert!(reason.contains("does not exist")),
            other => panic!("expected unavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_pull_requests_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .respond_with(ResponseTemplate::new(403).set_body_string("rate limit exceeded"))
            .mount(&server)
            .await;

        let err = client(&server).fetch_pull_requests("testuser").await.unwrap_err();
        assert!(err.to_string().contains("rate limit exceeded"));
    }
}
