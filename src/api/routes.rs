use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::AppState;
use super::{audits, health};

/// Headers browsers may send cross-origin, advertised on every response
const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// V1 API routes
///
/// ## Audits (Session Required)
/// - POST   /analyze-url - Fetch, analyze and store an audit for `{ "url": ... }`
/// - GET    /audits - List the caller's audits, newest first (`?limit=`)
/// - GET    /audits/{audit_id} - Get one audit
/// - DELETE /audits/{audit_id} - Delete one audit
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze-url", post(audits::analyze_url))
        .route("/audits", get(audits::list_audits))
        .route(
            "/audits/{audit_id}",
            get(audits::get_audit).delete(audits::delete_audit),
        )
}

/// Permissive CORS: any origin, explicit header list. Pre-flight `OPTIONS`
/// requests are answered here with a bare 200.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

/// Full application router with state and middleware applied
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ping", get(health::ping))
        // API v1
        .nest("/v1", v1_routes())
        // State and middleware
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
