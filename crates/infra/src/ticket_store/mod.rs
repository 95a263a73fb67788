//! Ticket persistence boundary.
//!
//! One handwritten query per lookup the service needs; no naming-convention
//! magic. Every list operation returns tickets in ascending id order.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryTicketStore;
pub use postgres::PostgresTicketStore;
pub use r#trait::{StoreError, TicketStore};
