//! OpenAI chat-completions summarizer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{read_json, trim_base_url, Summarizer};
use crate::error::{Error, Result};
use crate::types::{ActivityBundle, Intent};

const SERVICE: &str = "OpenAI";

/// Public OpenAI API endpoint
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4o";

const USER_PROMPT: &str = "Generate a summary of the above activity.";

/// Summarizer backed by an OpenAI-compatible chat-completions API
#[derive(Clone)]
pub struct OpenAiSummarizer {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiSummarizer {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: trim_base_url(base_url),
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

/// Build the system instructions for one summary.
///
/// Only the sections relevant to `intent` are embedded; empty lists are shown
/// as `None`.
pub fn build_instructions(name: &str, activity: &ActivityBundle, intent: Intent) -> String {
    let mut lines = vec![
        "Summarize this team member's activity:".to_string(),
        format!("Name: {}", name),
        String::new(),
    ];

    if intent.includes_issues() {
        lines.push(format!("JIRA Issues: {}", section(&activity.issues)));
        lines.push(String::new());
    }

    if intent.includes_code() {
        lines.push(format!("GitHub Commits: {}", section(&activity.commits)));
        lines.push(format!("GitHub PRs: {}", section(&activity.pull_requests)));
        lines.push("After the summary, provide two separate bullet lists:".to_string());
        lines.push(" - One for commits (repo, message, timestamp)".to_string());
        lines.push(" - One for pull requests (title, repo, state, updated)".to_string());
        lines.push(String::new());
    }

    lines.push("Respond in a concise, neutral tone.".to_string());
    lines.push("Only summarize data that is included above.".to_string());
    lines.push("Do NOT comment on missing sections.".to_string());

    lines.join("\n")
}

fn section<T: Serialize>(items: &[T]) -> String {
    if items.is_empty() {
        return "None".to_string();
    }
    serde_json::to_string_pretty(items).unwrap_or_else(|_| "None".to_string())
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(
        &self,
        name: &str,
        activity: &ActivityBundle,
        intent: Intent,
    ) -> Result<String> {
        let instructions = build_instructions(name, activity, intent);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &instructions,
                },
                ChatMessage {
                    role: "user",
                    content: USER_PROMPT,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, model = %self.model, intent = %intent, "Requesting summary");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let completion: ChatResponse = read_json(SERVICE, resp).await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Summarizer("completion returned no content".into()))
    }
}
