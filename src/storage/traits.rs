use crate::types::{Override, OverrideRecord, Overrides, RepoId};

/// Durable mapping from repository id to override record.
///
/// Every call goes to durable storage; implementations keep no cache.
pub trait OverrideStore: Send + Sync {
    fn get(&self, id: &RepoId) -> anyhow::Result<Override>;

    /// Trims `text`, stamps it, replaces any previous record for `id` and
    /// persists before returning the stored record.
    fn put(&self, id: &RepoId, text: &str) -> anyhow::Result<OverrideRecord>;

    /// Removing an id without an override is a no-op.
    fn delete(&self, id: &RepoId) -> anyhow::Result<()>;

    fn all(&self) -> anyhow::Result<Overrides>;
}
