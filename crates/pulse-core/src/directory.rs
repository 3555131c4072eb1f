//! Static team directory.
//!
//! Maps lowercase display names to tracker identities. Loaded once at startup
//! from a TOML file:
//!
//! ```toml
//! [members.marvan]
//! jira = "marvan@example.com"
//! github = "mohammedmarvan"
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Identity;

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    members: BTreeMap<String, Identity>,
}

/// Read-only lookup from display name to identity
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    members: BTreeMap<String, Identity>,
}

impl TeamDirectory {
    /// Build a directory from name/identity pairs
    pub fn from_members<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = (S, Identity)>,
        S: AsRef<str>,
    {
        Self {
            members: members
                .into_iter()
                .map(|(name, identity)| (normalize(name.as_ref()), identity))
                .collect(),
        }
    }

    /// Parse a directory from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: DirectoryFile = toml::from_str(content)?;

        let mut directory = Self::default();
        for (name, identity) in file.members {
            let key = normalize(&name);
            if key.is_empty() {
                return Err(Error::Directory("member name must not be blank".into()));
            }
            if directory.members.insert(key.clone(), identity).is_some() {
                return Err(Error::Directory(format!("duplicate member: {}", key)));
            }
        }
        Ok(directory)
    }

    /// Load a directory from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Directory(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Look up an identity by display name, ignoring case
    pub fn resolve(&self, name: &str) -> Option<&Identity> {
        self.members.get(&normalize(name))
    }

    /// Lowercase names of all known members
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
