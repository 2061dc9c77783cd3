//! HTTP surface.
//!
//! - `GET /health`
//! - `GET /api/cities`
//! - `GET /api/aqi/current?city=<name>`

mod handlers;

use crate::api::AirQualityProvider;
use crate::service::AqiService;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Upper bound on a whole request; above the provider timeout times the query count.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn router<P: AirQualityProvider>(service: Arc<AqiService<P>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/cities", get(handlers::cities::<P>))
        .route("/api/aqi/current", get(handlers::current_aqi::<P>))
        .with_state(service)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serves until Ctrl-C.
pub async fn serve<P: AirQualityProvider>(
    service: Arc<AqiService<P>>,
    addr: SocketAddr,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("AQI API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutting down gracefully");
        })
        .await
}
