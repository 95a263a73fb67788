use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use flightres_core::{Ticket, TicketDraft, TicketId};

/// Ticket store error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Driver, connectivity or constraint failure reported by the database.
    #[error("database error: {0}")]
    Database(String),

    /// A stored row could not be decoded into a `Ticket`.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// The in-memory store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Persistence operations over ticket records.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Insert a new ticket; the store assigns and returns its id.
    async fn save(&self, draft: TicketDraft) -> Result<Ticket, StoreError>;

    /// All stored tickets.
    async fn find_all(&self) -> Result<Vec<Ticket>, StoreError>;

    /// Tickets whose booking date equals `date` exactly.
    async fn find_by_booking_date(&self, date: NaiveDate) -> Result<Vec<Ticket>, StoreError>;

    /// Tickets whose destination contains `text`, ignoring case.
    ///
    /// Empty `text` matches every ticket.
    async fn find_by_destination_containing_ignore_case(
        &self,
        text: &str,
    ) -> Result<Vec<Ticket>, StoreError>;

    /// Tickets whose kickoff contains `text`, ignoring case.
    ///
    /// Empty `text` matches every ticket.
    async fn find_by_kickoff_containing_ignore_case(
        &self,
        text: &str,
    ) -> Result<Vec<Ticket>, StoreError>;

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, StoreError>;

    /// Remove the row identified by the ticket's id.
    async fn delete(&self, ticket: &Ticket) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> TicketStore for Arc<S>
where
    S: TicketStore + ?Sized,
{
    async fn save(&self, draft: TicketDraft) -> Result<Ticket, StoreError> {
        (**self).save(draft).await
    }

    async fn find_all(&self) -> Result<Vec<Ticket>, StoreError> {
        (**self).find_all().await
    }

    async fn find_by_booking_date(&self, date: NaiveDate) -> Result<Vec<Ticket>, StoreError> {
        (**self).find_by_booking_date(date).await
    }

    async fn find_by_destination_containing_ignore_case(
        &self,
        text: &str,
    ) -> Result<Vec<Ticket>, StoreError> {
        (**self).find_by_destination_containing_ignore_case(text).await
    }

    async fn find_by_kickoff_containing_ignore_case(
        &self,
        text: &str,
    ) -> Result<Vec<Ticket>, StoreError> {
        (**self).find_by_kickoff_containing_ignore_case(text).await
    }

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn delete(&self, ticket: &Ticket) -> Result<(), StoreError> {
        (**self).delete(ticket).await
    }
}
