//! Infrastructure layer: ticket persistence and configuration.

pub mod config;
pub mod ticket_store;

pub use config::{AppConfig, ConfigError, CorsOrigins, DatabaseConfig};
pub use ticket_store::{InMemoryTicketStore, PostgresTicketStore, StoreError, TicketStore};
