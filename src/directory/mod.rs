mod error;
mod github;

pub use error::FetchError;
pub use github::GitHubDirectory;

use async_trait::async_trait;

use crate::types::Repository;

/// Number of repositories requested in the single listing call.
pub const PAGE_SIZE: u8 = 100;

/// Read-only source of an owner's repositories, most recently updated first.
#[async_trait]
pub trait RepositoryDirectory: Send + Sync {
    /// Makes exactly one attempt; retrying is up to the caller.
    async fn fetch(&self, owner: &str) -> Result<Vec<Repository>, FetchError>;
}
