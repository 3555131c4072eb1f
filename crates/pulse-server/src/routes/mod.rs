//! HTTP route modules.

pub mod ask;
pub mod health;
pub mod ui;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(ui::router())
        .merge(ask::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory collaborators for route tests.

    use async_trait::async_trait;
    use pulse_core::client::{IssueTracker, SourceHost, Summarizer};
    use pulse_core::types::{
        ActivityBundle, Commit, Identity, Intent, Issue, PullRequestLookup,
    };
    use pulse_core::{AskService, ResponseCache, Result, TeamDirectory};
    use std::sync::Arc;

    use crate::config::Config;
    use crate::state::AppState;

    pub struct StaticTracker(pub Vec<Issue>);

    #[async_trait]
    impl IssueTracker for StaticTracker {
        async fn fetch_issues(&self, _tracker_id: &str) -> Result<Vec<Issue>> {
            Ok(self.0.clone())
        }
    }

    pub struct EmptyHost;

    #[async_trait]
    impl SourceHost for EmptyHost {
        async fn fetch_commits(&self, _host_id: &str) -> Result<Vec<Commit>> {
            Ok(Vec::new())
        }

        async fn fetch_pull_requests(&self, _host_id: &str) -> Result<PullRequestLookup> {
            Ok(PullRequestLookup::Found(Vec::new()))
        }
    }

    pub struct EchoSummarizer;

    #[async_trait]
    impl Summarizer for EchoSummarizer {
        async fn summarize(
            &self,
            name: &str,
            activity: &ActivityBundle,
            intent: Intent,
        ) -> Result<String> {
            Ok(format!(
                "{} has {} issue(s) ({})",
                name,
                activity.issues.len(),
                intent
            ))
        }
    }

    pub fn issue() -> Issue {
        Issue {
            key: "PROJ-1".into(),
            summary: "Test Issue".into(),
            status: "In Progress".into(),
            updated: "2025-01-01T00:00:00Z".into(),
        }
    }

    pub fn test_state(issues: Vec<Issue>) -> Arc<AppState> {
        let directory = TeamDirectory::from_members([(
            "marvan",
            Identity {
                tracker_id: "marvan@example.com".into(),
                host_id: "mohammedmarvan".into(),
            },
        )]);

        let ask = AskService::new(
            Arc::new(directory),
            Arc::new(StaticTracker(issues)),
            Arc::new(EmptyHost),
            Arc::new(EchoSummarizer),
            Arc::new(ResponseCache::default()),
        );

        let config = Config::from_lookup(|key| match key {
            "JIRA_BASE_URL" => Some("http://jira.invalid".into()),
            "JIRA_EMAIL" | "JIRA_API_TOKEN" | "GITHUB_TOKEN" | "OPENAI_API_KEY" => {
                Some("test".into())
            }
            _ => None,
        })
        .expect("test config");

        AppState::new(config, ask)
    }
}
