//! CORS middleware configuration.

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Create a CORS layer for the single allowed frontend origin.
///
/// The session cookie only reaches the API when credentials are allowed,
/// which requires an explicit origin. An empty or unparsable origin falls
/// back to a permissive policy without credentials.
pub fn create_cors_layer(origin: &str) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    match origin.parse::<HeaderValue>() {
        Ok(origin) if !origin.is_empty() => CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE, ACCEPT])
            .allow_credentials(true)
            .allow_origin(origin),
        _ => {
            tracing::warn!("No valid CORS origin configured; allowing any origin without credentials");
            CorsLayer::new()
                .allow_methods(methods)
                .allow_headers(Any)
                .allow_origin(Any)
        }
    }
}
