use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{Entity, TicketId};

/// A flight booking for one passenger.
///
/// Every field besides `id` is optional, free text and unvalidated;
/// `booking_date` is a calendar date without time or timezone, serialized as
/// `YYYY-MM-DD`. Absent fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[schema(value_type = i64)]
    id: TicketId,
    passenger_name: Option<String>,
    destination: Option<String>,
    kickoff: Option<String>,
    booking_date: Option<NaiveDate>,
}

impl Ticket {
    pub fn new(
        id: TicketId,
        passenger_name: Option<String>,
        destination: Option<String>,
        kickoff: Option<String>,
        booking_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            passenger_name,
            destination,
            kickoff,
            booking_date,
        }
    }

    pub fn id_typed(&self) -> TicketId {
        self.id
    }

    pub fn passenger_name(&self) -> Option<&str> {
        self.passenger_name.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// Departure point.
    pub fn kickoff(&self) -> Option<&str> {
        self.kickoff.as_deref()
    }

    pub fn booking_date(&self) -> Option<NaiveDate> {
        self.booking_date
    }
}

impl Entity for Ticket {
    type Id = TicketId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A ticket that has not been stored yet (no identifier).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDraft {
    pub passenger_name: Option<String>,
    pub destination: Option<String>,
    pub kickoff: Option<String>,
    pub booking_date: Option<NaiveDate>,
}

impl TicketDraft {
    /// A draft with every field present.
    pub fn new(
        passenger_name: impl Into<String>,
        destination: impl Into<String>,
        kickoff: impl Into<String>,
        booking_date: NaiveDate,
    ) -> Self {
        Self {
            passenger_name: Some(passenger_name.into()),
            destination: Some(destination.into()),
            kickoff: Some(kickoff.into()),
            booking_date: Some(booking_date),
        }
    }

    /// Attach the store-assigned identifier.
    pub fn into_ticket(self, id: TicketId) -> Ticket {
        Ticket {
            id,
            passenger_name: self.passenger_name,
            destination: self.destination,
            kickoff: self.kickoff,
            booking_date: self.booking_date,
        }
    }
}
