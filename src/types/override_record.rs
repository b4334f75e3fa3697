use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::RepoId;

/// A locally owned description that replaces the native one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRecord {
    pub text: String,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub updated_at: DateTime<Utc>,
}

impl OverrideRecord {
    /// Builds a record for `text` as it is about to be written: trimmed and
    /// stamped with the current time at millisecond precision.
    pub fn now(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            updated_at: Utc::now().trunc_subsecs(3),
        }
    }
}

/// Result of an override lookup. An empty `text` is still `Present`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Override {
    Present(OverrideRecord),
    Absent,
}

impl Override {
    pub fn text(&self) -> Option<&str> {
        match self {
            Override::Present(record) => Some(record.text.as_str()),
            Override::Absent => None,
        }
    }
}

impl From<Option<OverrideRecord>> for Override {
    fn from(record: Option<OverrideRecord>) -> Self {
        match record {
            Some(record) => Override::Present(record),
            None => Override::Absent,
        }
    }
}

/// Full snapshot of the store, and the on-disk document shape.
pub type Overrides = BTreeMap<RepoId, OverrideRecord>;
