//! In-process greeting store.
//!
//! Mirrors the PostgreSQL store's ordering rules (newest `created_at`, then
//! highest id) without a database. Availability can be toggled to simulate a
//! severed connection.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::greetings::Greeting;
use crate::schema::SEED_MESSAGE;
use crate::store::GreetingStore;

struct Inner {
    rows: RwLock<Vec<Greeting>>,
    next_id: AtomicI32,
    available: AtomicBool,
}

/// Thread-safe, cloneable in-memory greeting log. All clones share rows.
#[derive(Clone)]
pub struct MemoryGreetingStore {
    inner: Arc<Inner>,
}

impl MemoryGreetingStore {
    /// Create an empty, available store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                rows: RwLock::new(Vec::new()),
                next_id: AtomicI32::new(1),
                available: AtomicBool::new(true),
            }),
        }
    }

    /// Create a store holding one row with the seed greeting.
    pub fn seeded() -> Self {
        let store = Self::new();
        store.insert(SEED_MESSAGE);
        store
    }

    /// Append a greeting stamped with the current time.
    pub fn insert(&self, message: &str) -> Greeting {
        let greeting = Greeting {
            id: self.inner.next_id.fetch_add(1, Ordering::SeqCst),
            message: message.to_string(),
            created_at: Some(chrono::Utc::now().naive_utc()),
        };
        self.inner.rows.write().push(greeting.clone());
        greeting
    }

    /// Simulate the backing store going away or coming back.
    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.inner.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The row the PostgreSQL query would return as current.
    pub fn latest(&self) -> Option<Greeting> {
        self.inner
            .rows
            .read()
            .iter()
            .max_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)))
            .cloned()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.inner.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }
}

impl Default for MemoryGreetingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryGreetingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGreetingStore")
            .field("rows", &self.len())
            .field("available", &self.inner.available.load(Ordering::SeqCst))
            .finish()
    }
}

#[async_trait]
impl GreetingStore for MemoryGreetingStore {
    async fn current_greeting(&self) -> Result<String, StoreError> {
        self.check_available()?;
        self.latest()
            .map(|greeting| greeting.message)
            .ok_or(StoreError::Empty)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_reports_empty() {
        let store = MemoryGreetingStore::new();
        assert!(store.is_empty());
        let err = store.current_greeting().await.unwrap_err();
        assert!(matches!(err, StoreError::Empty));
    }

    #[tokio::test]
    async fn seeded_store_returns_seed_message() {
        let store = MemoryGreetingStore::seeded();
        assert_eq!(store.len(), 1);
        assert_eq!(store.current_greeting().await.unwrap(), SEED_MESSAGE);
    }

    #[tokio::test]
    async fn newest_insert_wins() {
        let store = MemoryGreetingStore::seeded();
        store.insert("second");
        let third = store.insert("third");
        assert_eq!(store.current_greeting().await.unwrap(), "third");
        assert_eq!(store.latest().unwrap().id, third.id);
    }

    #[tokio::test]
    async fn clones_share_rows() {
        let store = MemoryGreetingStore::new();
        let clone = store.clone();
        clone.insert("shared");
        assert_eq!(store.current_greeting().await.unwrap(), "shared");
    }

    #[tokio::test]
    async fn outage_fails_ping_and_reads() {
        let store = MemoryGreetingStore::seeded();
        store.ping().await.unwrap();

        store.set_available(false);
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable)));
        assert!(matches!(
            store.current_greeting().await,
            Err(StoreError::Unavailable)
        ));

        store.set_available(true);
        store.ping().await.unwrap();
    }

    #[test]
    fn ids_increase_monotonically() {
        let store = MemoryGreetingStore::new();
        let a = store.insert("a");
        let b = store.insert("b");
        assert!(b.id > a.id);
        assert!(b.created_at >= a.created_at);
    }
}
