use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::app::services::TicketServiceError;

/// Map a service failure to an HTTP response.
///
/// A missing ticket is a 404 rather than a generic server error.
pub fn service_error_to_response(err: TicketServiceError) -> axum::response::Response {
    match err {
        TicketServiceError::NotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        TicketServiceError::Store(e) => {
            tracing::error!(error = %e, "ticket store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
