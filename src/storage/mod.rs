pub mod file;
pub mod sqlite;
pub mod traits;

pub use file::JsonFileStore;
pub use sqlite::SqliteStore;
pub use traits::OverrideStore;

use clap::ValueEnum;

/// Which backend holds the overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Json,
    Sqlite,
}

impl StoreKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            StoreKind::Json => "descriptions.json",
            StoreKind::Sqlite => "overrides.sqlite",
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Json => write!(f, "json"),
            StoreKind::Sqlite => write!(f, "sqlite"),
        }
    }
}
