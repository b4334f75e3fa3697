use std::sync::Arc;

use crate::context;
use crate::directory::GitHubDirectory;
use crate::overlay::Overlay;
use crate::storage::{self, JsonFileStore, OverrideStore, SqliteStore, StoreKind};
use anyhow::{Context, Result};

pub fn init_data_dir(ctx: &context::Context) -> Result<()> {
    std::fs::create_dir_all(&ctx.data_dir)?;
    Ok(())
}

pub fn init_store(ctx: &context::Context) -> Result<Arc<dyn OverrideStore>> {
    let path = ctx.store_path();
    let store: Arc<dyn storage::OverrideStore> = match ctx.store {
        StoreKind::Json => {
            let json = JsonFileStore::new(&path);
            if ctx.reset {
                json.reset_all().context("resetting override document")?;
            }
            json.init().context("initializing override document")?;
            Arc::new(json)
        }
        StoreKind::Sqlite => {
            let sqlite = SqliteStore::new(&path);
            if ctx.reset {
                sqlite.reset_all().context("resetting storage")?;
            }
            sqlite.init().context("initializing storage")?;
            Arc::new(sqlite)
        }
    };
    Ok(store)
}

pub fn build_directory(ctx: &context::Context) -> Result<GitHubDirectory> {
    let directory = GitHubDirectory::new(ctx.github_api_url.clone(), ctx.upstream_timeout)
        .context("failed to create GitHub client")?
        .with_token(ctx.github_token.clone());
    Ok(directory)
}

pub fn build_overlay(ctx: &context::Context, store: Arc<dyn OverrideStore>) -> Result<Overlay> {
    let directory = build_directory(ctx)?;
    Ok(Overlay::new(Arc::new(directory), store, ctx.default_owner.clone())
        .with_max_description_len(ctx.max_description_len))
}
