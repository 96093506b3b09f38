//! Request logging middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use nanoid::nanoid;
use std::time::Instant;
use tracing::info;

use crate::colors::request_tag;

/// Tags each request with a short ID and start time, and logs its arrival
///
/// Handlers pick both up from request extensions to log the response with
/// the same colored tag and the elapsed time.
pub async fn log_requests(mut req: Request<Body>, next: Next) -> Response {
    let id = nanoid!(5);

    req.extensions_mut().insert(id.clone());
    req.extensions_mut().insert(Instant::now());

    info!("{} → {} {}", request_tag(&id), req.method(), req.uri().path());
    next.run(req).await
}
