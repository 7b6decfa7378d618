use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;

use crate::error::{Error, Result};

/// Credentialed CORS for the configured frontend. Cookies forbid wildcard
/// origins, so the origin is pinned and methods/headers are listed explicitly.
pub fn frontend_cors(origin: &str) -> Result<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|_| Error::Config(format!("Invalid FRONTEND_ORIGIN: {}", origin)))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
