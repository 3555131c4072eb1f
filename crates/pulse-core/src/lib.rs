//! pulse-core - Core library for Team Pulse
//!
//! Answers questions about a team member's recent work:
//!
//! - **parser**: Keyword intent detection and name extraction
//! - **directory**: Display name to tracker identity lookup
//! - **cache**: Short-lived answer cache
//! - **client**: Jira, GitHub and OpenAI clients behind traits
//! - **orchestrator**: The question answering flow

pub mod cache;
pub mod client;
pub mod directory;
pub mod error;
pub mod orchestrator;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use cache::ResponseCache;
pub use directory::TeamDirectory;
pub use error::{Error, Result};
pub use orchestrator::AskService;
pub use parser::QueryParser;
