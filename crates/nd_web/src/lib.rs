use axum::{
    routing::{get, post},
    Router,
};
use nd_core::Result;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/articles", get(handlers::list_articles))
        .route("/api/articles/:id", get(handlers::get_article))
        .route("/api/articles/:id/analysis", get(handlers::get_article_analysis))
        .route("/api/facets", get(handlers::get_facets))
        .route("/api/tiers", get(handlers::list_tiers))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/dashboard/actions", post(handlers::post_action))
        .route("/api/timeline", get(handlers::get_timeline))
        .route("/api/analytics/:metric", get(handlers::get_analytics))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use nd_core::{Article, Result, Error};
    pub use crate::{create_app, serve, AppState};
}
