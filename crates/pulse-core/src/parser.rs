//! Question parsing.
//!
//! Turns a free-text question into an `(intent, name)` pair using an ordered
//! keyword rule table and a closed vocabulary of team member names. When no
//! team member is mentioned, a capitalization heuristic picks a likely person
//! name instead. The heuristic is best-effort and only covers simple cases.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{Intent, ParsedQuery};

/// Keyword set mapped to an intent
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

/// Rules in priority order; the first rule with a matching keyword wins.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Jira,
        keywords: &["issue", "ticket", "working on"],
    },
    IntentRule {
        intent: Intent::Github,
        keywords: &["commit", "pull request", "pr"],
    },
    IntentRule {
        intent: Intent::Both,
        keywords: &["activity", "activities"],
    },
];

/// Keywords this short must match as whole words (plus a plural `s`)
const MAX_SHORT_KEYWORD_LEN: usize = 2;

/// Longest multi-word name considered by the fallback heuristic
const MAX_NAME_WORDS: usize = 3;

/// Capitalized words that are never person names
const STOP_WORDS: &[&str] = &[
    // greetings and fillers
    "hello", "hi", "hey", "thanks", "thank", "please", "ok", "okay", "yes", "no",
    // question words and sentence starters
    "what", "whats", "who", "whom", "whose", "which", "when", "where", "why", "how",
    "is", "are", "was", "were", "do", "does", "did", "has", "have", "had", "can",
    "could", "would", "should", "will", "tell", "show", "give", "list", "get",
    "find", "fetch", "summarize", "summarise", "describe", "let", "me", "my", "i",
    "the", "a", "an", "any", "all", "for", "from", "about", "on", "in", "of", "to",
    "and", "or", "by", "with", "this", "that", "these", "those", "there", "recent",
    "recently", "latest", "last", "current", "currently", "today", "yesterday",
    "week", "month", "team", "member", "he", "she", "they", "his", "her", "their",
    "you", "your", "we", "our", "it", "its",
    // tracker vocabulary
    "jira", "github", "git", "issue", "issues", "ticket", "tickets", "commit",
    "commits", "pull", "request", "requests", "pr", "prs", "activity",
    "activities", "working", "work", "repo", "repos", "repository", "project",
    "projects", "sprint", "board",
    // calendar words
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december",
];

static POSSESSIVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:'|’)s\b").expect("Invalid regex"));

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}'’-]*").expect("Invalid regex"));

/// Parses questions against a fixed team vocabulary
pub struct QueryParser {
    rules: Vec<(Regex, Intent)>,
    /// Team names split into lowercase words, longest first
    vocabulary: Vec<Vec<String>>,
}

impl QueryParser {
    /// Create a parser that recognizes the given team member names
    pub fn new<I, S>(team_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary: Vec<Vec<String>> = team_names
            .into_iter()
            .map(|name| {
                name.as_ref()
                    .split_whitespace()
                    .map(str::to_lowercase)
                    .collect::<Vec<_>>()
            })
            .filter(|words| !words.is_empty())
            .collect();
        vocabulary.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        vocabulary.dedup();

        Self {
            rules: INTENT_RULES.iter().map(|rule| (rule_pattern(rule), rule.intent)).collect(),
            vocabulary,
        }
    }

    /// Parse a question into its intent and the person it is about
    pub fn parse(&self, text: &str) -> ParsedQuery {
        ParsedQuery {
            intent: self.detect_intent(text),
            name: self.extract_name(text),
        }
    }

    /// First rule whose keywords appear in the text
    pub fn detect_intent(&self, text: &str) -> Option<Intent> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(&lower))
            .map(|(_, intent)| *intent)
    }

    /// Team member mentioned in the text, else a likely person name
    pub fn extract_name(&self, text: &str) -> Option<String> {
        let cleaned = POSSESSIVE_PATTERN.replace_all(text, "");
        let words: Vec<&str> = WORD_PATTERN.find_iter(&cleaned).map(|m| m.as_str()).collect();

        self.match_team_member(&words)
            .or_else(|| detect_person(&words))
    }

    fn match_team_member(&self, words: &[&str]) -> Option<String> {
        let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

        for start in 0..words.len() {
            for name in &self.vocabulary {
                let end = start + name.len();
                if end <= words.len() && lowered[start..end] == name[..] {
                    return Some(words[start..end].join(" "));
                }
            }
        }
        None
    }
}

/// Compile a rule's keywords into one word-bounded pattern.
///
/// Keywords match as word prefixes, so inflected forms ("committing",
/// "ticketing") count. Short keywords only take a plural `s` so they do not
/// fire inside longer words. Multi-word keywords tolerate any whitespace
/// between words.
fn rule_pattern(rule: &IntentRule) -> Regex {
    let alternatives: Vec<String> = rule.keywords.iter().map(|k| keyword_pattern(k)).collect();

    Regex::new(&format!(r"\b(?:{})", alternatives.join("|"))).expect("Invalid keyword regex")
}

fn keyword_pattern(keyword: &str) -> String {
    let body = keyword
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    if keyword.chars().count() <= MAX_SHORT_KEYWORD_LEN {
        format!(r"{}s?\b", body)
    } else {
        format!(r"{}\w*", body)
    }
}

/// First run of capitalized words that are not stop words
fn detect_person(words: &[&str]) -> Option<String> {
    let mut run: Vec<&str> = Vec::new();

    for word in words {
        if is_name_candidate(word) {
            run.push(word);
            if run.len() == MAX_NAME_WORDS {
                break;
            }
        } else if !run.is_empty() {
            break;
        }
    }

    if run.is_empty() {
        None
    } else {
        Some(run.join(" "))
    }
}

fn is_name_candidate(word: &str) -> bool {
    let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
    let has_letters = word.chars().filter(|c| c.is_alphabetic()).count() >= 2;
    let lower = word.to_lowercase();
    let lower = lower.trim_end_matches(['\'', '’']);

    starts_upper && has_letters && !STOP_WORDS.contains(&lower)
}
