pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use certd_cache::Coordinator;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use self::handlers::*;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<Coordinator>,
}

/// Build the router. CORS is open to any origin.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(get_root))
        .route("/healthz", get(get_healthz))
        .route("/cert", get(get_cert_without_domain))
        .route("/cert/", get(get_cert_without_domain))
        .route("/cert/{*domain}", get(get_cert))
        .route("/v1/status", get(get_status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
