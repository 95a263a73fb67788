use axum::Json;
use utoipa::OpenApi;

use flightres_core::Ticket;

use crate::app::{dto, routes::tickets};

/// Where the generated document is served.
pub const API_DOCS_PATH: &str = "/v3/api-docs";

/// OpenAPI documentation for the ticket API
#[derive(OpenApi)]
#[openapi(
    info(title = "Flight reservation API"),
    paths(
        tickets::create_ticket,
        tickets::list_tickets,
        tickets::tickets_by_date,
        tickets::tickets_by_destination,
        tickets::tickets_by_kickoff,
        tickets::delete_ticket,
    ),
    components(schemas(Ticket, dto::CreateTicketRequest)),
    tags(
        (name = "tickets", description = "Flight ticket booking and lookup")
    )
)]
pub struct ApiDoc;

pub async fn api_docs() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
