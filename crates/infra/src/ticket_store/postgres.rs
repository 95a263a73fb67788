//! Postgres-backed ticket store.
//!
//! Tickets live in a single `tickets` table keyed by a `BIGSERIAL` id. The table
//! is created on startup by [`PostgresTicketStore::ensure_schema`].
//!
//! ## Substring queries
//!
//! The `*_containing_ignore_case` lookups use `ILIKE` with the user text
//! escaped (`\`, `%`, `_`), so the text is always matched literally.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | `ColumnDecode` / `ColumnNotFound` | `Corrupt` |
//! | anything else | `Database` |

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Row};
use tracing::instrument;

use flightres_core::{Ticket, TicketDraft, TicketId};

use super::r#trait::{StoreError, TicketStore};
use crate::config::DatabaseConfig;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tickets (
    id             BIGSERIAL PRIMARY KEY,
    passenger_name TEXT,
    destination    TEXT,
    kickoff        TEXT,
    booking_date   DATE
)
"#;

// Tables created before the ticket fields became optional.
const RELAX_NOT_NULL: &str = r#"
ALTER TABLE tickets
    ALTER COLUMN passenger_name DROP NOT NULL,
    ALTER COLUMN destination DROP NOT NULL,
    ALTER COLUMN kickoff DROP NOT NULL,
    ALTER COLUMN booking_date DROP NOT NULL
"#;

const SELECT_COLUMNS: &str = "SELECT id, passenger_name, destination, kickoff, booking_date FROM tickets";

/// Postgres-backed ticket store.
///
/// `Send + Sync`; share it behind an `Arc`. Each operation runs in the
/// pool's implicit per-statement transaction.
#[derive(Debug, Clone)]
pub struct PostgresTicketStore {
    pool: Arc<PgPool>,
}

impl PostgresTicketStore {
    /// Create a new PostgresTicketStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a connection pool for `config`.
    #[instrument(skip(config), fields(max_connections = config.max_connections), err)]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `tickets` table if it does not exist yet; every column but
    /// `id` is nullable.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in [SCHEMA, RELAX_NOT_NULL] {
            sqlx::query(statement)
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        }
        Ok(())
    }

    async fn fetch_where(
        &self,
        operation: &str,
        predicate: &str,
        bind: Bind<'_>,
    ) -> Result<Vec<Ticket>, StoreError> {
        let sql = format!("{SELECT_COLUMNS} WHERE {predicate} ORDER BY id");
        let query = sqlx::query(&sql);
        let query = match bind {
            Bind::Date(date) => query.bind(date),
            Bind::Text(text) => query.bind(text),
        };

        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
        rows.iter().map(row_to_ticket).collect()
    }
}

enum Bind<'a> {
    Date(NaiveDate),
    Text(&'a str),
}

/// Escape `text` for use inside `ILIKE '%' || $1 || '%' ESCAPE '\'`.
fn like_pattern(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn row_to_ticket(row: &PgRow) -> Result<Ticket, StoreError> {
    let decode = |e: sqlx::Error| StoreError::Corrupt(e.to_string());

    Ok(Ticket::new(
        TicketId::new(row.try_get::<i64, _>("id").map_err(decode)?),
        row.try_get::<Option<String>, _>("passenger_name").map_err(decode)?,
        row.try_get::<Option<String>, _>("destination").map_err(decode)?,
        row.try_get::<Option<String>, _>("kickoff").map_err(decode)?,
        row.try_get::<Option<NaiveDate>, _>("booking_date").map_err(decode)?,
    ))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Corrupt(format!("{operation}: {err}"))
        }
        sqlx::Error::Database(db_err) => {
            StoreError::Database(format!("database error in {operation}: {}", db_err.message()))
        }
        other => StoreError::Database(format!("{operation}: {other}")),
    }
}

#[async_trait]
impl TicketStore for PostgresTicketStore {
    #[instrument(skip(self, draft), err)]
    async fn save(&self, draft: TicketDraft) -> Result<Ticket, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO tickets (passenger_name, destination, kickoff, booking_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, passenger_name, destination, kickoff, booking_date
            "#,
        )
        .bind(&draft.passenger_name)
        .bind(&draft.destination)
        .bind(&draft.kickoff)
        .bind(draft.booking_date)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save", e))?;

        row_to_ticket(&row)
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<Ticket>, StoreError> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY id");
        let rows = sqlx::query(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_all", e))?;
        rows.iter().map(row_to_ticket).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_by_booking_date(&self, date: NaiveDate) -> Result<Vec<Ticket>, StoreError> {
        self.fetch_where("find_by_booking_date", "booking_date = $1", Bind::Date(date))
            .await
    }

    #[instrument(skip(self), err)]
    async fn find_by_destination_containing_ignore_case(
        &self,
        text: &str,
    ) -> Result<Vec<Ticket>, StoreError> {
        let pattern = like_pattern(text);
        self.fetch_where(
            "find_by_destination",
            r"destination ILIKE '%' || $1 || '%' ESCAPE '\'",
            Bind::Text(&pattern),
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn find_by_kickoff_containing_ignore_case(
        &self,
        text: &str,
    ) -> Result<Vec<Ticket>, StoreError> {
        let pattern = like_pattern(text);
        self.fetch_where(
            "find_by_kickoff",
            r"kickoff ILIKE '%' || $1 || '%' ESCAPE '\'",
            Bind::Text(&pattern),
        )
        .await
    }

    #[instrument(skip(self), fields(ticket_id = %id), err)]
    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, StoreError> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_id", e))?;
        row.as_ref().map(row_to_ticket).transpose()
    }

    #[instrument(skip(self, ticket), fields(ticket_id = %ticket.id_typed()), err)]
    async fn delete(&self, ticket: &Ticket) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(ticket.id_typed().get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("par"), "par");
        assert_eq!(like_pattern("100%"), r"100\%");
        assert_eq!(like_pattern("a_b"), r"a\_b");
        assert_eq!(like_pattern(r"c:\x"), r"c:\\x");
        assert_eq!(like_pattern(""), "");
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Requires a reachable Postgres; run with `DATABASE_URL=... cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn postgres_round_trip() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let store = PostgresTicketStore::connect(&DatabaseConfig {
            url,
            max_connections: 2,
        })
        .await
        .unwrap();
        store.ensure_schema().await.unwrap();

        let saved = store
            .save(TicketDraft::new("John Doe", "Paris_100%", "Douala", date(2025, 7, 8)))
            .await
            .unwrap();

        let hits = store
            .find_by_destination_containing_ignore_case("_100%")
            .await
            .unwrap();
        assert!(hits.iter().any(|t| t.id_typed() == saved.id_typed()));

        let misses = store
            .find_by_destination_containing_ignore_case("x100%")
            .await
            .unwrap();
        assert!(misses.iter().all(|t| t.id_typed() != saved.id_typed()));

        let by_kickoff = store
            .find_by_kickoff_containing_ignore_case("douala")
            .await
            .unwrap();
        assert!(by_kickoff.iter().any(|t| t.id_typed() == saved.id_typed()));

        let partial = store
            .save(TicketDraft {
                kickoff: Some("Douala".to_string()),
                ..TicketDraft::default()
            })
            .await
            .unwrap();
        let loaded = store.find_by_id(partial.id_typed()).await.unwrap().unwrap();
        assert_eq!(loaded.destination(), None);
        assert_eq!(loaded.booking_date(), None);

        store.delete(&saved).await.unwrap();
        store.delete(&partial).await.unwrap();
        assert_eq!(store.find_by_id(saved.id_typed()).await.unwrap(), None);
    }
}
