use http::{Extensions, HeaderMap, Method, Uri};

/// Canonical request context passed through the skiff plugin pipeline
#[derive(Debug)]
pub struct RequestCtx {
    /// HTTP method (immutable)
    pub method: Method,

    /// Original URI as received from the client (immutable, for logging/debugging)
    pub original_uri: Uri,

    /// Path used to resolve a file on disk (mutable by plugins)
    pub route_path: String,

    /// Headers (mutable by plugins)
    pub headers: HeaderMap,

    /// Request-scoped typed extensions (NOT logged by default).
    pub extensions: Extensions,
}

impl RequestCtx {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        let route_path = uri.path().to_string();

        Self {
            method,
            original_uri: uri,
            route_path,
            headers,
            extensions: Extensions::new(),
        }
    }
}
