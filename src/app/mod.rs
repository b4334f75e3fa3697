mod wiring;

use crate::{cli, context, overlay::Overlay, rest};
use anyhow::{Context as AnyhowContext, Result};
use tokio_util::sync::CancellationToken;

pub struct App {
    pub ctx: context::Context,
    pub overlay: Overlay,
}

impl App {
    pub fn from_cli() -> Result<(Self, cli::Cli)> {
        let cli = crate::cli::parse();
        let ctx = context::Context::from_cli(&cli);

        crate::tracing::init(ctx.log_file.as_deref());
        log::info!("🚀 Starting repo-overlay");
        log::info!("👤 Default owner: {}", ctx.default_owner);
        log::info!("🔗 GitHub API URL: {}", ctx.github_api_url);
        log::info!("🗄️ Store: {} at {}", ctx.store, ctx.store_path().display());

        Self::from_context(ctx).map(|app| (app, cli))
    }

    pub fn from_context(ctx: context::Context) -> Result<Self> {
        wiring::init_data_dir(&ctx).context("initializing data dir")?;
        let store = wiring::init_store(&ctx)?;
        let overlay = wiring::build_overlay(&ctx, store)?;
        Ok(Self { ctx, overlay })
    }
}

pub async fn run_daemon(app: App) -> Result<()> {
    log::info!("⏱️ Upstream timeout: {:?}", app.ctx.upstream_timeout);
    log::info!("📏 Max description length: {}", app.ctx.max_description_len);
    if let Some(path) = app.ctx.log_file.as_deref() {
        log::info!("📝 Log file: {}", path.to_string_lossy());
    }

    let shutdown = CancellationToken::new();

    let api_addr = app.ctx.api_listen;
    let state = rest::AppState::new(app.overlay.clone());
    let rest_shutdown = shutdown.clone();

    let mut rest_handle = tokio::spawn(async move { rest::serve(api_addr, state, rest_shutdown).await });

    let served = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
            None
        }
        res = &mut rest_handle => Some(res),
    };

    shutdown.cancel();
    let result = match served {
        Some(res) => res,
        None => rest_handle.await,
    };

    match result {
        Ok(Ok(())) => {
            log::info!("✅ Shutdown complete");
            Ok(())
        }
        Ok(Err(e)) => {
            log::error!("REST server error: {:#}", e);
            Err(e)
        }
        Err(e) => {
            log::error!("REST task failed: {}", e);
            Err(e.into())
        }
    }
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    if let Some(cmd) = &cli.cmd {
        // one-shot command mode
        cmd.run(&app.overlay)?;
        return Ok(());
    }

    run_daemon(app).await
}
