use std::sync::Arc;

use thiserror::Error;

use crate::directory::{FetchError, RepositoryDirectory};
use crate::merge::merge;
use crate::storage::OverrideStore;
use crate::types::{MergedEntry, Override, OverrideRecord, Overrides, RepoId};

pub const DEFAULT_MAX_DESCRIPTION_LEN: usize = 1024;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Directory(#[from] FetchError),

    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

/// Sequences the directory, the override store and the merge step.
#[derive(Clone)]
pub struct Overlay {
    directory: Arc<dyn RepositoryDirectory>,
    store: Arc<dyn OverrideStore>,
    default_owner: String,
    max_description_len: usize,
}

impl Overlay {
    pub fn new(
        directory: Arc<dyn RepositoryDirectory>,
        store: Arc<dyn OverrideStore>,
        default_owner: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            store,
            default_owner: default_owner.into(),
            max_description_len: DEFAULT_MAX_DESCRIPTION_LEN,
        }
    }

    pub fn with_max_description_len(mut self, max: usize) -> Self {
        self.max_description_len = max;
        self
    }

    pub fn default_owner(&self) -> &str {
        &self.default_owner
    }

    /// Blank or missing owners fall back to the configured default.
    pub fn resolve_owner<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .map(str::trim)
            .filter(|owner| !owner.is_empty())
            .unwrap_or(self.default_owner.as_str())
    }

    /// Merged listing for `owner`. Override timestamps are only kept when
    /// `with_meta` is set.
    pub async fn list(
        &self,
        owner: Option<&str>,
        with_meta: bool,
    ) -> Result<Vec<MergedEntry>, OverlayError> {
        let owner = self.resolve_owner(owner);
        let repos = self.directory.fetch(owner).await?;
        let overrides = self.store.all()?;

        let mut merged = merge(repos, &overrides);
        if !with_meta {
            for entry in &mut merged {
                entry.description_updated_at = None;
            }
        }
        Ok(merged)
    }

    pub fn read(&self, id: &RepoId) -> Result<Override, OverlayError> {
        Ok(self.store.get(id)?)
    }

    pub fn write(&self, id: &RepoId, text: &str) -> Result<OverrideRecord, OverlayError> {
        self.validate_text(text)?;
        Ok(self.store.put(id, text)?)
    }

    pub fn remove(&self, id: &RepoId) -> Result<(), OverlayError> {
        Ok(self.store.delete(id)?)
    }

    pub fn overrides(&self) -> Result<Overrides, OverlayError> {
        Ok(self.store.all()?)
    }

    pub fn validate_text(&self, text: &str) -> Result<(), OverlayError> {
        let trimmed = text.trim();
        let len = trimmed.chars().count();
        if len > self.max_description_len {
            return Err(OverlayError::Validation(format!(
                "\"text\" must be at most {} characters, got {}",
                self.max_description_len, len
            )));
        }
        if trimmed
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
        {
            return Err(OverlayError::Validation(
                "\"text\" must not contain control characters".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonFileStore;
    use crate::types::{Repository, NO_DESCRIPTION};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingDirectory {
        repos: Vec<Repository>,
        owners: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RepositoryDirectory for RecordingDirectory {
        async fn fetch(&self, owner: &str) -> Result<Vec<Repository>, FetchError> {
            self.owners.lock().unwrap().push(owner.to_string());
            Ok(self.repos.clone())
        }
    }

    fn repo(id: u64) -> Repository {
        Repository {
            id,
            name: "demo".into(),
            full_name: "octocat/demo".into(),
            description: None,
            html_url: "https://github.com/octocat/demo".into(),
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            updated_at: "2024-05-01T12:00:00Z".parse().unwrap(),
            topics: Vec::new(),
        }
    }

    fn overlay(dir: &tempfile::TempDir, directory: Arc<RecordingDirectory>) -> Overlay {
        let store = Arc::new(JsonFileStore::new(dir.path().join("descriptions.json")));
        Overlay::new(directory, store, "profile").with_max_description_len(10)
    }

    #[test]
    fn resolve_owner_falls_back_on_blank() {
        let dir = tempfile::tempdir().unwrap();
        let overlay = overlay(&dir, Arc::default());
        assert_eq!(overlay.resolve_owner(None), "profile");
        assert_eq!(overlay.resolve_owner(Some("  ")), "profile");
        assert_eq!(overlay.resolve_owner(Some("octocat")), "octocat");
    }

    #[tokio::test]
    async fn list_uses_default_owner_and_hides_meta() {
        let dir = tempfile::tempdir().unwrap();
        let directory = Arc::new(RecordingDirectory {
            repos: vec![repo(42)],
            ..Default::default()
        });
        let overlay = overlay(&dir, directory.clone());
        overlay.write(&RepoId::from(42u64), "A demo").unwrap();

        let plain = overlay.list(None, false).await.unwrap();
        assert_eq!(plain[0].description, "A demo");
        assert_eq!(plain[0].description_updated_at, None);

        let with_meta = overlay.list(Some("octocat"), true).await.unwrap();
        assert!(with_meta[0].description_updated_at.is_some());

        assert_eq!(*directory.owners.lock().unwrap(), vec!["profile", "octocat"]);
    }

    #[tokio::test]
    async fn removed_override_reverts_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let directory = Arc::new(RecordingDirectory {
            repos: vec![repo(42)],
            ..Default::default()
        });
        let overlay = overlay(&dir, directory);
        let id = RepoId::from(42u64);

        overlay.write(&id, "A demo").unwrap();
        overlay.remove(&id).unwrap();

        let merged = overlay.list(None, false).await.unwrap();
        assert_eq!(merged[0].description, NO_DESCRIPTION);
        assert!(!merged[0].is_custom_description);
    }

    #[test]
    fn write_rejects_long_text_without_touching_store() {
        let dir = tempfile::tempdir().unwrap();
        let overlay = overlay(&dir, Arc::default());
        let id = RepoId::from(1u64);

        let err = overlay.write(&id, "this is far too long").unwrap_err();
        assert!(matches!(err, OverlayError::Validation(_)));
        assert_eq!(overlay.read(&id).unwrap(), Override::Absent);
    }

    #[test]
    fn length_is_measured_after_trimming() {
        let dir = tempfile::tempdir().unwrap();
        let overlay = overlay(&dir, Arc::default());
        let record = overlay.write(&RepoId::from(1u64), "     0123456789     ").unwrap();
        assert_eq!(record.text, "0123456789");
    }

    #[test]
    fn write_rejects_control_characters() {
        let dir = tempfile::tempdir().unwrap();
        let overlay = overlay(&dir, Arc::default());
        let err = overlay.write(&RepoId::from(1u64), "a\u{7}b").unwrap_err();
        assert!(matches!(err, OverlayError::Validation(_)));
        assert!(overlay.write(&RepoId::from(1u64), "a\nb").is_ok());
    }
}
