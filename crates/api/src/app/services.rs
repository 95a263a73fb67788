//! Service layer: one method per store operation, plus the not-found check on delete.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use flightres_core::{Ticket, TicketDraft, TicketId};
use flightres_infra::{AppConfig, InMemoryTicketStore, PostgresTicketStore, StoreError, TicketStore};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketServiceError {
    #[error("ticket not found with id: {0}")]
    NotFound(TicketId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ticket operations exposed to the HTTP layer.
#[derive(Clone)]
pub struct TicketService {
    store: Arc<dyn TicketStore>,
}

impl TicketService {
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTicketStore::new()))
    }

    pub async fn save_ticket(&self, draft: TicketDraft) -> Result<Ticket, TicketServiceError> {
        let ticket = self.store.save(draft).await?;
        tracing::info!(ticket_id = %ticket.id_typed(), "ticket created");
        Ok(ticket)
    }

    pub async fn get_all_tickets(&self) -> Result<Vec<Ticket>, TicketServiceError> {
        let tickets = self.store.find_all().await?;
        tracing::debug!(count = tickets.len(), "listed all tickets");
        Ok(tickets)
    }

    pub async fn get_tickets_by_booking_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Ticket>, TicketServiceError> {
        let tickets = self.store.find_by_booking_date(date).await?;
        tracing::debug!(%date, count = tickets.len(), "tickets by booking date");
        Ok(tickets)
    }

    pub async fn get_tickets_by_destination(
        &self,
        destination: &str,
    ) -> Result<Vec<Ticket>, TicketServiceError> {
        let tickets = self
            .store
            .find_by_destination_containing_ignore_case(destination)
            .await?;
        tracing::debug!(destination, count = tickets.len(), "tickets by destination");
        Ok(tickets)
    }

    pub async fn get_tickets_by_kickoff(
        &self,
        kickoff: &str,
    ) -> Result<Vec<Ticket>, TicketServiceError> {
        let tickets = self
            .store
            .find_by_kickoff_containing_ignore_case(kickoff)
            .await?;
        tracing::debug!(kickoff, count = tickets.len(), "tickets by kickoff");
        Ok(tickets)
    }

    pub async fn delete_ticket(&self, id: TicketId) -> Result<(), TicketServiceError> {
        let ticket = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TicketServiceError::NotFound(id))?;
        self.store.delete(&ticket).await?;
        tracing::info!(ticket_id = %id, "ticket deleted");
        Ok(())
    }
}

/// Wire the ticket service for `config`: Postgres when a database is
/// configured, in-memory otherwise.
pub async fn build_services(config: &AppConfig) -> Result<TicketService, StoreError> {
    match &config.database {
        Some(db) => {
            let store = PostgresTicketStore::connect(db).await?;
            store.ensure_schema().await?;
            tracing::info!("using postgres ticket store");
            Ok(TicketService::new(Arc::new(store)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory ticket store (data is lost on restart)");
            Ok(TicketService::in_memory())
        }
    }
}
