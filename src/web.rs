use anyhow::{Context, Result};
use axum::Router;
use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{self, AppState};

/// Build the full application: the API router with the CORS layer the
/// browser frontend depends on.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    api::router(state).layer(cors)
}

pub async fn run(port: u16, state: AppState) -> Result<()> {
    let app = app(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    tracing::info!("TripVaults API running at http://localhost:{}", port);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
