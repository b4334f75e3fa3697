mod merged_entry;
mod override_record;
mod repo_id;
mod repository;
pub mod timestamp;

pub use merged_entry::{MergedEntry, NO_DESCRIPTION};
pub use override_record::{Override, OverrideRecord, Overrides};
pub use repo_id::{RepoId, RepoIdParseError};
pub use repository::Repository;
