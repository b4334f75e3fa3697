use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder used when neither an override nor a native description exists.
pub const NO_DESCRIPTION: &str = "No description";

/// One upstream repository combined with at most one override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergedEntry {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: String,
    #[serde(rename = "isCustomDescription")]
    pub is_custom_description: bool,
    pub html_url: String,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub updated_at: DateTime<Utc>,
    pub topics: Vec<String>,
    /// Only serialized when the caller asked for override metadata.
    #[serde(
        rename = "descriptionUpdatedAt",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::timestamp::option::serialize"
    )]
    pub description_updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_timestamp_is_written_with_millis() {
        let entry = MergedEntry {
            id: 1,
            name: "demo".into(),
            full_name: "octocat/demo".into(),
            description: "A demo".into(),
            is_custom_description: true,
            html_url: "https://github.com/octocat/demo".into(),
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            updated_at: "2024-05-01T12:00:00Z".parse().unwrap(),
            topics: Vec::new(),
            description_updated_at: Some("2024-05-02T08:30:00Z".parse().unwrap()),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["descriptionUpdatedAt"], "2024-05-02T08:30:00.000Z");

        let hidden = MergedEntry {
            description_updated_at: None,
            ..entry
        };
        let json = serde_json::to_value(&hidden).unwrap();
        assert!(json.get("descriptionUpdatedAt").is_none());
    }
}
