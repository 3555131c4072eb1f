//! Question answering flow.
//!
//! ```text
//! question ─→ QueryParser ─→ TeamDirectory ─→ ResponseCache ─┬─ hit ─→ answer
//!                                                             └─ miss
//!                                                                 │
//!                       IssueTracker / SourceHost (concurrent) ←──┘
//!                                     │
//!                     empty? ─→ fixed "no activity" answer
//!                                     │
//!                    Summarizer ─→ ResponseCache.set ─→ answer
//! ```
//!
//! The service never fails: every error path resolves to a user-facing
//! string, and the underlying error is only logged.

pub mod messages;

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::cache::ResponseCache;
use crate::client::{IssueTracker, SourceHost, Summarizer};
use crate::directory::TeamDirectory;
use crate::error::Result;
use crate::parser::QueryParser;
use crate::types::{ActivityBundle, Identity, Intent, ParsedQuery, PullRequest, PullRequestLookup};

/// Answers questions about a team member's recent work
pub struct AskService {
    parser: QueryParser,
    directory: Arc<TeamDirectory>,
    tracker: Arc<dyn IssueTracker>,
    host: Arc<dyn SourceHost>,
    summarizer: Arc<dyn Summarizer>,
    cache: Arc<ResponseCache>,
}

impl AskService {
    /// Create a service; the parser vocabulary comes from the directory
    pub fn new(
        directory: Arc<TeamDirectory>,
        tracker: Arc<dyn IssueTracker>,
        host: Arc<dyn SourceHost>,
        summarizer: Arc<dyn Summarizer>,
        cache: Arc<ResponseCache>,
    ) -> Self {
        Self {
            parser: QueryParser::new(directory.names()),
            directory,
            tracker,
            host,
            summarizer,
            cache,
        }
    }

    pub fn directory(&self) -> &TeamDirectory {
        &self.directory
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Answer a free-text question
    pub async fn handle(&self, query: &str) -> String {
        info!(query = %query, "Received query");
        let parsed = self.parser.parse(query);
        self.answer(parsed).await
    }

    /// Answer an already parsed question
    pub async fn answer(&self, parsed: ParsedQuery) -> String {
        let Some(name) = parsed.name else {
            warn!("Name could not be extracted");
            return messages::NO_NAME.to_string();
        };

        let Some(identity) = self.directory.resolve(&name) else {
            warn!(name = %name, "No mapping found");
            return messages::unknown_member(&name);
        };

        let Some(intent) = parsed.intent else {
            warn!(name = %name, "No intent keyword found");
            return messages::unrecognized_intent(&name);
        };

        let cache_key = ResponseCache::key(intent, &name);
        if let Some(cached) = self.cache.get(&cache_key) {
            info!(name = %name, intent = %intent, "Serving cached answer");
            return cached;
        }

        let activity = match self.fetch(identity, intent, &name).await {
            Ok(activity) => activity,
            Err(e) => {
                error!(name = %name, intent = %intent, error = %e, "Error fetching data");
                return messages::FETCH_FAILED.to_string();
            }
        };

        if activity.is_empty_for(intent) {
            info!(name = %name, intent = %intent, "No activity found");
            return messages::no_activity(intent, &name);
        }

        match self.summarizer.summarize(&name, &activity, intent).await {
            Ok(answer) => {
                info!(name = %name, intent = %intent, "Generated response");
                self.cache.set(cache_key, answer.clone());
                answer
            }
            Err(e) => {
                error!(name = %name, intent = %intent, error = %e, "Error generating summary");
                messages::FETCH_FAILED.to_string()
            }
        }
    }

    /// Fetch the lists relevant to `intent`, concurrently where there are several.
    ///
    /// The first failure aborts the whole fetch.
    async fn fetch(&self, identity: &Identity, intent: Intent, name: &str) -> Result<ActivityBundle> {
        match intent {
            Intent::Jira => Ok(ActivityBundle {
                issues: self.tracker.fetch_issues(&identity.tracker_id).await?,
                ..Default::default()
            }),
            Intent::Github => {
                let (commits, lookup) = tokio::try_join!(
                    self.host.fetch_commits(&identity.host_id),
                    self.host.fetch_pull_requests(&identity.host_id)
                )?;
                Ok(ActivityBundle {
                    issues: Vec::new(),
                    commits,
                    pull_requests: pull_requests_or_empty(lookup, name),
                })
            }
            Intent::Both => {
                let (issues, commits, lookup) = tokio::try_join!(
                    self.tracker.fetch_issues(&identity.tracker_id),
                    self.host.fetch_commits(&identity.host_id),
                    self.host.fetch_pull_requests(&identity.host_id)
                )?;
                Ok(ActivityBundle {
                    issues,
                    commits,
                    pull_requests: pull_requests_or_empty(lookup, name),
                })
            }
        }
    }
}

/// An unavailable lookup counts as no pull requests
fn pull_requests_or_empty(lookup: PullRequestLookup, name: &str) -> Vec<PullRequest> {
    match lookup {
        PullRequestLookup::Found(prs) => prs,
        PullRequestLookup::Unavailable { reason } => {
            warn!(name = %name, reason = %reason, "Pull request lookup unavailable");
            Vec::new()
        }
    }
}
