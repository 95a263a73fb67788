use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};

use flightres_core::{Ticket, TicketDraft, TicketId};

use crate::app::{dto, errors};
use crate::app::services::TicketService;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_ticket).get(list_tickets))
        .route("/by-date", get(tickets_by_date))
        .route("/by-destination", get(tickets_by_destination))
        .route("/by-kickoff", get(tickets_by_kickoff))
        .route("/:id", delete(delete_ticket))
}

/// Store a new ticket; the response carries the assigned id.
#[utoipa::path(
    post,
    path = "/api/tickets",
    operation_id = "createTicket",
    tag = "tickets",
    request_body = dto::CreateTicketRequest,
    responses(
        (status = 200, description = "Ticket created", body = Ticket),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_ticket(
    Extension(services): Extension<Arc<TicketService>>,
    Json(body): Json<dto::CreateTicketRequest>,
) -> axum::response::Response {
    match services.save_ticket(TicketDraft::from(body)).await {
        Ok(ticket) => (StatusCode::OK, Json(ticket)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/tickets",
    operation_id = "getAllTickets",
    tag = "tickets",
    responses(
        (status = 200, description = "Every stored ticket", body = [Ticket]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_tickets(
    Extension(services): Extension<Arc<TicketService>>,
) -> axum::response::Response {
    match services.get_all_tickets().await {
        Ok(tickets) => (StatusCode::OK, Json(tickets)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/tickets/by-date",
    operation_id = "getByDate",
    tag = "tickets",
    params(dto::ByDateQuery),
    responses(
        (status = 200, description = "Tickets booked on the date", body = [Ticket]),
        (status = 400, description = "Missing or malformed date")
    )
)]
pub async fn tickets_by_date(
    Extension(services): Extension<Arc<TicketService>>,
    Query(query): Query<dto::ByDateQuery>,
) -> axum::response::Response {
    match services.get_tickets_by_booking_date(query.date).await {
        Ok(tickets) => (StatusCode::OK, Json(tickets)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/tickets/by-destination",
    operation_id = "getByDestination",
    tag = "tickets",
    params(dto::ByDestinationQuery),
    responses(
        (status = 200, description = "Tickets whose destination contains the text", body = [Ticket]),
        (status = 400, description = "Missing destination")
    )
)]
pub async fn tickets_by_destination(
    Extension(services): Extension<Arc<TicketService>>,
    Query(query): Query<dto::ByDestinationQuery>,
) -> axum::response::Response {
    match services.get_tickets_by_destination(&query.destination).await {
        Ok(tickets) => (StatusCode::OK, Json(tickets)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/tickets/by-kickoff",
    operation_id = "getByKickoff",
    tag = "tickets",
    params(dto::ByKickoffQuery),
    responses(
        (status = 200, description = "Tickets whose departure point contains the text", body = [Ticket]),
        (status = 400, description = "Missing kickoff")
    )
)]
pub async fn tickets_by_kickoff(
    Extension(services): Extension<Arc<TicketService>>,
    Query(query): Query<dto::ByKickoffQuery>,
) -> axum::response::Response {
    match services.get_tickets_by_kickoff(&query.kickoff).await {
        Ok(tickets) => (StatusCode::OK, Json(tickets)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    operation_id = "deleteTicket",
    tag = "tickets",
    params(("id" = i64, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "Ticket deleted"),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "No ticket with that id")
    )
)]
pub async fn delete_ticket(
    Extension(services): Extension<Arc<TicketService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TicketId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid ticket id"),
    };

    match services.delete_ticket(id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
