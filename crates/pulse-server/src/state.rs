//! Application state.

use anyhow::Context;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use pulse_core::client::{GitHubClient, JiraClient, OpenAiSummarizer};
use pulse_core::{AskService, ResponseCache, TeamDirectory};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Question answering service
    pub ask: Arc<AskService>,
    /// Server start time
    pub start_time: Instant,
    /// Wall-clock start time reported by the health check
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, ask: AskService) -> Arc<Self> {
        Arc::new(Self {
            config: Arc::new(config),
            ask: Arc::new(ask),
            start_time: Instant::now(),
            started_at: Utc::now(),
        })
    }

    /// Wire the real Jira, GitHub and OpenAI clients from configuration
    pub fn from_config(config: Config) -> anyhow::Result<Arc<Self>> {
        let directory = TeamDirectory::load(&config.team_directory_path).with_context(|| {
            format!(
                "Failed to load team directory from {}",
                config.team_directory_path.display()
            )
        })?;
        info!(
            members = directory.len(),
            path = %config.team_directory_path.display(),
            "Team directory loaded"
        );

        let jira = JiraClient::new(
            config.jira_base_url.as_str(),
            &config.jira_email,
            &config.jira_api_token,
        )?;
        let github = GitHubClient::new(config.github_api_url.as_str(), config.github_token.as_str())?;
        let summarizer = OpenAiSummarizer::new(
            config.openai_api_url.as_str(),
            config.openai_api_key.as_str(),
            config.openai_model.as_str(),
        )?;

        let ask = AskService::new(
            Arc::new(directory),
            Arc::new(jira),
            Arc::new(github),
            Arc::new(summarizer),
            Arc::new(ResponseCache::new(config.cache_ttl)),
        );

        Ok(Self::new(config, ask))
    }
}
