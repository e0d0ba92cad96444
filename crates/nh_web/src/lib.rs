use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod presenter;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/languages", get(handlers::list_languages))
        .route("/api/news", get(handlers::get_news))
        .route("/api/cache/clear", post(handlers::clear_cache))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Serve until Ctrl+C.
pub async fn serve(state: AppState, addr: SocketAddr) -> nh_core::Result<()> {
    let app = create_app(state);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🌐 News hub listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
            }
        })
        .await?;
    Ok(())
}

pub mod prelude {
    pub use nh_core::{Category, Language, NewsDigest, Result, Error};
    pub use crate::AppState;
}
