//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the ticket service and store selection
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and query strings
//! - `errors.rs`: consistent error responses
//! - `openapi.rs`: generated OpenAPI document

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use flightres_infra::CorsOrigins;

pub mod dto;
pub mod errors;
pub mod openapi;
pub mod routes;
pub mod services;

pub use services::{build_services, TicketService, TicketServiceError};

/// Build the full HTTP router around an already-wired ticket service.
pub fn build_app(services: TicketService, cors: &CorsOrigins) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .route(openapi::API_DOCS_PATH, get(openapi::api_docs))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors)),
        )
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        tracing::warn!(%origin, "ignoring unparseable CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(values))
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE])
        }
    }
}
