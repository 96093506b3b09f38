//! Static fixture server: the public directory mounted under the base path.

use axum::{Router, middleware, routing::get};
use std::{io, sync::Arc};
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::handlers::serve_static;
use crate::middleware::log_requests;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(get(serve_static))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Serve until the listener fails
pub async fn run(listener: TcpListener, state: Arc<AppState>) -> io::Result<()> {
    info!("Serving {:?} under {}", state.public_dir, state.base_path);
    if let Ok(addr) = listener.local_addr() {
        info!("Server running on: http://{}{}", addr, state.base_path);
    }
    axum::serve(listener, router(state)).await
}
