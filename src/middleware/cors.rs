use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Any origin, the five CRUD verbs plus preflight, JSON and bearer headers.
pub fn api_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
