// Server module - assembles the HTTP application around AppState

use axum::Router;
use axum::http::HeaderValue;
use std::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api_docs::ApiDoc;
use crate::infrastructure::AppState;

/// Build the full application router: API under `/api`, Swagger UI, CORS and
/// request tracing
pub fn build_router(state: AppState, cors_allowed_origins: &[String]) -> Router {
    let api_router = api::api_router(state);

    let mut origins = Vec::new();
    for origin in cors_allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(v) => origins.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Find an available port starting from the preferred port
pub fn find_available_port(preferred_port: u16) -> Option<u16> {
    // Try preferred port first
    if TcpListener::bind(("0.0.0.0", preferred_port)).is_ok() {
        return Some(preferred_port);
    }

    // Scan next 100 ports
    (preferred_port.saturating_add(1)..=preferred_port.saturating_add(100))
        .find(|&port| TcpListener::bind(("0.0.0.0", port)).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_available_port_at_top_of_range() {
        // Hold the highest port so the scan has to look past it
        let _busy = TcpListener::bind(("0.0.0.0", u16::MAX));

        let port = find_available_port(u16::MAX);
        assert!(port.is_none() || port == Some(u16::MAX));
    }
}
