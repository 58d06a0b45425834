//! Lodestone API Server
//!
//! REST API for generating loot lists from resource hubs, plus the listing
//! endpoint the public generator uses to populate its hub picker.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use lodestone_store::AnyStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;

pub use config::{Config, ServerSettings};
pub use error::{ApiError, ApiFailure, ErrorResponse};

// =============================================================================
// App State
// =============================================================================

pub struct AppState {
    pub store: AnyStore,
}

impl AppState {
    pub fn new(store: impl Into<AnyStore>) -> Self {
        Self {
            store: store.into(),
        }
    }
}

// =============================================================================
// OpenAPI Schema
// =============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lodestone API",
        description = "Loot list generation for Lodestone resource hubs",
        version = "0.3.1",
        license(name = "BSD-2-Clause"),
    ),
    paths(api::health, api::list_hubs, api::generate),
    components(schemas(
        api::HealthResponse,
        api::HubResponse,
        api::GenerateRequest,
        api::GenerateResponse,
        api::GeneratedItemResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;

/// OPTIONS handler returns OpenAPI schema for API discovery
async fn options_schema() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(api::health))
        .route("/api/lodestone/hubs", get(api::list_hubs))
        .route("/api/lodestone/generate", post(api::generate))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state)
        .layer(cors);

    Router::new()
        .route("/", axum::routing::options(options_schema))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
}
