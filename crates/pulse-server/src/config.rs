//! Server configuration.

use anyhow::{Context, anyhow};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use pulse_core::cache::DEFAULT_TTL;
use pulse_core::client::{github, openai};

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to listen on
    pub bind_address: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Jira site, e.g. https://acme.atlassian.net
    pub jira_base_url: String,
    /// Jira account email for basic auth
    pub jira_email: String,
    /// Jira API token
    pub jira_api_token: String,
    /// GitHub API base URL
    pub github_api_url: String,
    /// GitHub personal access token
    pub github_token: String,
    /// OpenAI-compatible API base URL
    pub openai_api_url: String,
    /// OpenAI API key
    pub openai_api_key: String,
    /// Chat model used for summaries
    pub openai_model: String,
    /// Team directory TOML file
    pub team_directory_path: PathBuf,
    /// Answer cache time-to-live
    pub cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Required: `JIRA_BASE_URL`, `JIRA_EMAIL`, `JIRA_API_TOKEN`,
    /// `GITHUB_TOKEN`, `OPENAI_API_KEY`.
    ///
    /// Optional: `PORT` (3000), `BIND_ADDRESS` (0.0.0.0), `GITHUB_API_URL`,
    /// `OPENAI_API_URL`, `OPENAI_MODEL`, `TEAM_DIRECTORY_PATH`
    /// (config/team.toml), `CACHE_TTL_SECS` (60).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| anyhow!("Missing required environment variable {}", key))
        };

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {}", v))?,
            None => 3000,
        };

        let bind_address = match get("BIND_ADDRESS") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("Invalid BIND_ADDRESS: {}", v))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let cache_ttl = match get("CACHE_TTL_SECS") {
            Some(v) => Duration::from_secs(
                v.trim()
                    .parse()
                    .with_context(|| format!("Invalid CACHE_TTL_SECS: {}", v))?,
            ),
            None => DEFAULT_TTL,
        };

        Ok(Self {
            bind_address,
            port,
            jira_base_url: required("JIRA_BASE_URL")?,
            jira_email: required("JIRA_EMAIL")?,
            jira_api_token: required("JIRA_API_TOKEN")?,
            github_api_url: get("GITHUB_API_URL")
                .unwrap_or_else(|| github::DEFAULT_API_URL.to_string()),
            github_token: required("GITHUB_TOKEN")?,
            openai_api_url: get("OPENAI_API_URL")
                .unwrap_or_else(|| openai::DEFAULT_API_URL.to_string()),
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| openai::DEFAULT_MODEL.to_string()),
            team_directory_path: get("TEAM_DIRECTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("config/team.toml")),
            cache_ttl,
        })
    }

    /// Socket address to bind
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}
