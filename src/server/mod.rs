//! HTTP adapter
//!
//! Exposes crawling over HTTP: `GET /sitemap?site=<URL>&workers=<N>` runs a
//! crawl and returns the JSON site map. Every other path is served from the
//! configured static directory, if any.

mod handlers;

pub use handlers::{get_site_map, ApiError, AppState};

use crate::config::Config;
use crate::SiteMapError;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Builds the application router
pub fn router(config: Config) -> Router {
    let static_dir = config.server.static_dir.clone();
    let state = AppState {
        config: Arc::new(config),
    };

    let mut app = Router::new().route("/sitemap", get(get_site_map));

    if let Some(dir) = static_dir {
        tracing::debug!("Serving static files from {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Serves the router on an already bound listener until the task is cancelled
pub async fn serve_on(listener: TcpListener, config: Config) -> Result<(), SiteMapError> {
    axum::serve(listener, router(config)).await?;
    Ok(())
}

/// Binds `0.0.0.0:<server.port>` and serves forever
pub async fn serve(config: Config) -> Result<(), SiteMapError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Starting server on port {}", config.server.port);
    serve_on(listener, config).await
}
