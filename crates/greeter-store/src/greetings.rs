//! Greeting persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `greetings` table.
//! The table is append-only; nothing here updates or deletes rows.

use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::error::StoreError;

/// A row of the `greetings` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Greeting {
    pub id: i32,
    pub message: String,
    /// Defaults to the insertion time; nullable at the schema level.
    pub created_at: Option<NaiveDateTime>,
}

/// Return the message of the most recently created greeting.
///
/// Returns [`StoreError::Empty`] when the table has no rows.
pub async fn current(pool: &PgPool) -> Result<String, StoreError> {
    sqlx::query_scalar::<_, String>(
        "SELECT message FROM greetings ORDER BY created_at DESC, id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::Empty)
}

/// Fetch the full record of the most recently created greeting.
pub async fn latest(pool: &PgPool) -> Result<Option<Greeting>, sqlx::Error> {
    sqlx::query_as::<_, Greeting>(
        "SELECT id, message, created_at FROM greetings
         ORDER BY created_at DESC, id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await
}

/// Append a greeting, returning the stored row.
pub async fn insert(pool: &PgPool, message: &str) -> Result<Greeting, sqlx::Error> {
    sqlx::query_as::<_, Greeting>(
        "INSERT INTO greetings (message) VALUES ($1) RETURNING id, message, created_at",
    )
    .bind(message)
    .fetch_one(pool)
    .await
}

/// Number of stored greetings.
pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM greetings")
        .fetch_one(pool)
        .await
}

/// Round-trip a trivial query to confirm the store is reachable.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
