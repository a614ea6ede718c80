use tower_http::cors::{Any, CorsLayer};

/// Every origin, method and header is allowed on every route.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}
