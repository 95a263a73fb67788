use axum::Router;

pub mod system;
pub mod tickets;

/// Base path for every ticket endpoint.
pub const TICKETS_BASE_PATH: &str = "/api/tickets";

/// Router for all ticket endpoints.
pub fn router() -> Router {
    Router::new().nest(TICKETS_BASE_PATH, tickets::router())
}
