//! The `GreetingStore` seam between the HTTP surface and persistence.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::greetings;

/// Read access to the current greeting plus a liveness probe.
///
/// Implementations must be cheap to share across request handlers.
#[async_trait]
pub trait GreetingStore: Send + Sync {
    /// Message of the most recently created greeting.
    async fn current_greeting(&self) -> Result<String, StoreError>;

    /// Confirm the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// PostgreSQL-backed store over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgGreetingStore {
    pool: PgPool,
}

impl PgGreetingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl GreetingStore for PgGreetingStore {
    async fn current_greeting(&self) -> Result<String, StoreError> {
        greetings::current(&self.pool).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        greetings::ping(&self.pool).await.map_err(StoreError::Database)
    }
}
