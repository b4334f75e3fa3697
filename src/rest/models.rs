use serde::{Deserialize, Serialize};

use crate::types::OverrideRecord;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub user: Option<String>,
    #[serde(default)]
    pub meta: bool,
}

/// `text` is `null` when no override exists, which is not the same as `""`.
#[derive(Serialize, Deserialize)]
pub struct DescriptionResponse {
    pub text: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct UpdateDescriptionResponse {
    pub ok: bool,
    pub description: OverrideRecord,
}

#[derive(Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
