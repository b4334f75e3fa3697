use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::overlay::Overlay;

mod error;
mod handlers;
pub mod models;

pub use error::{ApiError, OWNER_NOT_FOUND};
use handlers::{
    delete_description, get_description, health, list_repos, not_found, put_description,
};

#[derive(Clone)]
pub struct AppState {
    pub overlay: Overlay,
    pub started_at: std::time::SystemTime,
}

impl AppState {
    pub fn new(overlay: Overlay) -> Self {
        Self {
            overlay,
            started_at: std::time::SystemTime::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/repos", get(list_repos))
        .route(
            "/api/repos/:id/description",
            get(get_description)
                .put(put_description)
                .delete(delete_description),
        )
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("🌐 API running on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
