use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use flightres_core::TicketDraft;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/tickets`.
///
/// Every member is optional and unvalidated; missing or `null` members are
/// stored as absent. No `id` member: a client-supplied id is dropped during
/// deserialization and the store assigns a fresh one.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    pub passenger_name: Option<String>,
    pub destination: Option<String>,
    pub kickoff: Option<String>,
    pub booking_date: Option<NaiveDate>,
}

impl From<CreateTicketRequest> for TicketDraft {
    fn from(body: CreateTicketRequest) -> Self {
        TicketDraft {
            passenger_name: body.passenger_name,
            destination: body.destination,
            kickoff: body.kickoff,
            booking_date: body.booking_date,
        }
    }
}

// -------------------------
// Query strings
// -------------------------

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ByDateQuery {
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ByDestinationQuery {
    /// Case-insensitive substring of the destination.
    pub destination: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ByKickoffQuery {
    /// Case-insensitive substring of the departure point.
    pub kickoff: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_ignores_client_id() {
        let body: CreateTicketRequest = serde_json::from_value(serde_json::json!({
            "id": 77,
            "passengerName": "John Doe",
            "destination": "Paris",
            "kickoff": "Douala",
            "bookingDate": "2025-07-08",
        }))
        .unwrap();

        let draft = TicketDraft::from(body);
        assert_eq!(draft.passenger_name.as_deref(), Some("John Doe"));
        assert_eq!(draft.booking_date, NaiveDate::from_ymd_opt(2025, 7, 8));
    }

    #[test]
    fn create_request_accepts_missing_and_null_members() {
        let body: CreateTicketRequest = serde_json::from_value(serde_json::json!({
            "destination": "Paris",
            "bookingDate": null,
        }))
        .unwrap();

        let draft = TicketDraft::from(body);
        assert_eq!(
            draft,
            TicketDraft {
                destination: Some("Paris".to_string()),
                ..TicketDraft::default()
            }
        );
    }

    #[test]
    fn create_request_rejects_non_iso_date() {
        let res = serde_json::from_value::<CreateTicketRequest>(serde_json::json!({
            "passengerName": "John Doe",
            "bookingDate": "08/07/2025",
        }));
        assert!(res.is_err());
    }
}
