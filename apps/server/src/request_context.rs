//! Per-request context shared via request extensions

/// Context attached to each request by the request-ID middleware.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}
