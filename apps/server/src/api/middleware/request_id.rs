//! Request ID middleware

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::request_context::RequestContext;

/// Request ID middleware
///
/// Creates a root span for each HTTP request and:
/// - Generates a server request ID
/// - Echoes the client's `X-Request-Id` in `X-Correlation-Id` when it
///   differs from the server-assigned one
/// - Attaches the request ID to all log lines emitted inside the request
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let client_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let server_id = Uuid::new_v4().to_string();

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        http.method = %method,
        http.route = %path,
        request_id = %server_id,
    );

    // Make request ID available to inner middleware/handlers.
    let mut req = req;
    req.extensions_mut().insert(RequestContext {
        request_id: server_id.clone(),
    });

    let mut response = async {
        tracing::debug!("Incoming request");
        next.run(req).await
    }
    .instrument(span)
    .await;

    let status = response.status();
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = duration.as_millis() as u64,
        request_id = %server_id,
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&server_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    if let Some(client_id) = client_id {
        if client_id != server_id {
            if let Ok(value) = HeaderValue::from_str(&client_id) {
                response.headers_mut().insert("x-correlation-id", value);
            }
        }
    }

    response
}
