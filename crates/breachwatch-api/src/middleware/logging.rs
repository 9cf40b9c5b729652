use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::session::USER_ID_HEADER;

/// Request logging middleware
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let authenticated = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.trim().is_empty());
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        authenticated,
        duration_ms = %start.elapsed().as_millis(),
        "Request processed"
    );

    response
}
