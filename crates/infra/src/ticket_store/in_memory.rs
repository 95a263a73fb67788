//! In-memory ticket store for tests/dev.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;

use flightres_core::{Ticket, TicketDraft, TicketId};

use super::r#trait::{StoreError, TicketStore};

#[derive(Debug)]
struct Inner {
    rows: BTreeMap<TicketId, Ticket>,
    next_id: i64,
}

/// In-memory ticket store.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryTicketStore {
    inner: RwLock<Inner>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn insert(&self, draft: TicketDraft) -> Result<Ticket, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let id = TicketId::new(inner.next_id);
        inner.next_id += 1;

        let ticket = draft.into_ticket(id);
        inner.rows.insert(id, ticket.clone());
        Ok(ticket)
    }

    fn select<F>(&self, predicate: F) -> Result<Vec<Ticket>, StoreError>
    where
        F: Fn(&Ticket) -> bool,
    {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner
            .rows
            .values()
            .filter(|t| predicate(*t))
            .cloned()
            .collect())
    }

    fn get(&self, id: TicketId) -> Result<Option<Ticket>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.rows.get(&id).cloned())
    }

    fn remove(&self, id: TicketId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        inner.rows.remove(&id);
        Ok(())
    }
}

impl Default for InMemoryTicketStore {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Absent values never match, like SQL NULL under `ILIKE`.
fn field_contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| contains_ignore_case(value, needle))
}

#[async_trait]
impl TicketStore for InMemoryTicketStore {
    async fn save(&self, draft: TicketDraft) -> Result<Ticket, StoreError> {
        self.insert(draft)
    }

    async fn find_all(&self) -> Result<Vec<Ticket>, StoreError> {
        self.select(|_| true)
    }

    async fn find_by_booking_date(&self, date: NaiveDate) -> Result<Vec<Ticket>, StoreError> {
        self.select(|t| t.booking_date() == Some(date))
    }

    async fn find_by_destination_containing_ignore_case(
        &self,
        text: &str,
    ) -> Result<Vec<Ticket>, StoreError> {
        self.select(|t| field_contains(t.destination(), text))
    }

    async fn find_by_kickoff_containing_ignore_case(
        &self,
        text: &str,
    ) -> Result<Vec<Ticket>, StoreError> {
        self.select(|t| field_contains(t.kickoff(), text))
    }

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, StoreError> {
        self.get(id)
    }

    async fn delete(&self, ticket: &Ticket) -> Result<(), StoreError> {
        self.remove(ticket.id_typed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(name: &str, destination: &str, kickoff: &str, booking_date: NaiveDate) -> TicketDraft {
        TicketDraft::new(name, destination, kickoff, booking_date)
    }

    #[tokio::test]
    async fn save_assigns_fresh_ids() {
        let store = InMemoryTicketStore::new();

        let a = store
            .save(draft("John Doe", "Paris", "Douala", date(2025, 7, 8)))
            .await
            .unwrap();
        let b = store
            .save(draft("Jane Roe", "Rome", "Lagos", date(2025, 7, 9)))
            .await
            .unwrap();

        assert_eq!(a.id_typed(), TicketId::new(1));
        assert_eq!(b.id_typed(), TicketId::new(2));
        assert_eq!(a.passenger_name(), Some("John Doe"));
        assert_eq!(a.destination(), Some("Paris"));
        assert_eq!(a.kickoff(), Some("Douala"));
        assert_eq!(a.booking_date(), Some(date(2025, 7, 8)));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryTicketStore::new();
        let first = store
            .save(draft("A", "Paris", "Douala", date(2025, 1, 1)))
            .await
            .unwrap();
        store.delete(&first).await.unwrap();

        let second = store
            .save(draft("B", "Paris", "Douala", date(2025, 1, 1)))
            .await
            .unwrap();
        assert_ne!(first.id_typed(), second.id_typed());
    }

    #[tokio::test]
    async fn destination_match_is_case_insensitive_substring() {
        let store = InMemoryTicketStore::new();
        store
            .save(draft("John Doe", "Paris", "Douala", date(2025, 7, 8)))
            .await
            .unwrap();
        store
            .save(draft("Jane Roe", "Rome", "Lagos", date(2025, 7, 8)))
            .await
            .unwrap();

        let hits = store
            .find_by_destination_containing_ignore_case("par")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].passenger_name(), Some("John Doe"));

        let misses = store
            .find_by_destination_containing_ignore_case("tokyo")
            .await
            .unwrap();
        assert!(misses.is_empty());

        let all = store
            .find_by_destination_containing_ignore_case("")
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn kickoff_match_is_case_insensitive_substring() {
        let store = InMemoryTicketStore::new();
        store
            .save(draft("John Doe", "Paris", "Douala", date(2025, 7, 8)))
            .await
            .unwrap();

        let hits = store
            .find_by_kickoff_containing_ignore_case("OUAL")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(store
            .find_by_kickoff_containing_ignore_case("paris")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn booking_date_match_is_exact() {
        let store = InMemoryTicketStore::new();
        let hit = store
            .save(draft("A", "Paris", "Douala", date(2025, 7, 8)))
            .await
            .unwrap();
        store
            .save(draft("B", "Paris", "Douala", date(2025, 7, 9)))
            .await
            .unwrap();

        let found = store.find_by_booking_date(date(2025, 7, 8)).await.unwrap();
        assert_eq!(found, vec![hit]);
        assert!(store
            .find_by_booking_date(date(2024, 7, 8))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn find_all_is_ordered_and_repeatable() {
        let store = InMemoryTicketStore::new();
        for name in ["C", "A", "B"] {
            store
                .save(draft(name, "Paris", "Douala", date(2025, 7, 8)))
                .await
                .unwrap();
        }

        let first = store.find_all().await.unwrap();
        let second = store.find_all().await.unwrap();
        assert_eq!(first, second);

        let names: Vec<_> = first.iter().filter_map(|t| t.passenger_name()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn delete_removes_only_that_ticket() {
        let store = InMemoryTicketStore::new();
        let keep = store
            .save(draft("Keep", "Paris", "Douala", date(2025, 7, 8)))
            .await
            .unwrap();
        let gone = store
            .save(draft("Gone", "Rome", "Lagos", date(2025, 7, 8)))
            .await
            .unwrap();

        store.delete(&gone).await.unwrap();

        assert_eq!(store.find_by_id(gone.id_typed()).await.unwrap(), None);
        assert_eq!(store.find_all().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn absent_fields_never_match_filters() {
        let store = InMemoryTicketStore::new();
        let partial = store
            .save(TicketDraft {
                destination: Some("Paris".to_string()),
                ..TicketDraft::default()
            })
            .await
            .unwrap();
        assert_eq!(partial.passenger_name(), None);

        assert_eq!(
            store.find_by_destination_containing_ignore_case("").await.unwrap(),
            vec![partial.clone()]
        );
        assert!(store
            .find_by_kickoff_containing_ignore_case("")
            .await
            .unwrap()
            .is_empty());
        assert!(store
            .find_by_booking_date(date(2025, 7, 8))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(store.find_all().await.unwrap(), vec![partial]);
    }

    proptest! {
        #[test]
        fn contains_ignore_case_finds_recased_needle(
            prefix in "[a-zA-Z0-9 ]{0,8}",
            needle in "[a-zA-Z0-9 ]{0,8}",
            suffix in "[a-zA-Z0-9 ]{0,8}",
            upper in any::<bool>(),
        ) {
            let haystack = format!("{prefix}{needle}{suffix}");
            let query = if upper { needle.to_uppercase() } else { needle.to_lowercase() };
            prop_assert!(contains_ignore_case(&haystack, &query));
        }
    }
}
