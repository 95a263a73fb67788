//! `flightres-core` — domain building blocks for flight ticket records.
//!
//! This crate contains **pure domain** types (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod ticket;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::TicketId;
pub use ticket::{Ticket, TicketDraft};
