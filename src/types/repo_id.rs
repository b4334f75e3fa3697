use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Canonical key of a repository in the override store.
///
/// The directory service hands out numeric ids; the store keys everything by
/// the decimal string form. Path segments coming from HTTP are kept verbatim,
/// so `RepoId::from(42)` and `"42".parse::<RepoId>()` are the same key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoId(String);

impl RepoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for RepoId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoIdParseError {
    #[error("repository id is empty")]
    Empty,
    #[error("repository id has surrounding whitespace")]
    Whitespace,
}

impl FromStr for RepoId {
    type Err = RepoIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(RepoIdParseError::Empty);
        }
        if s.trim() != s {
            return Err(RepoIdParseError::Whitespace);
        }
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_parsed_ids_are_the_same_key() {
        let from_upstream = RepoId::from(42u64);
        let from_path: RepoId = "42".parse().unwrap();
        assert_eq!(from_upstream, from_path);
        assert_eq!(from_upstream.as_str(), "42");
    }

    #[test]
    fn parse_keeps_non_numeric_ids_opaque() {
        let id: RepoId = "repo-abc".parse().unwrap();
        assert_eq!(id.to_string(), "repo-abc");
    }

    #[test]
    fn parse_rejects_empty_and_padded_ids() {
        assert_eq!("".parse::<RepoId>(), Err(RepoIdParseError::Empty));
        assert_eq!(" 42".parse::<RepoId>(), Err(RepoIdParseError::Whitespace));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&RepoId::from(7u64)).unwrap();
        assert_eq!(json, "\"7\"");
    }
}
