//! Schema bootstrap for the greeting table.
//!
//! Table creation is idempotent. Seeding follows [`SeedPolicy`]: under the
//! default policy a row is appended on every startup, so the table grows by
//! one row per restart and the newest seed becomes the current greeting.

use sqlx::PgPool;

use crate::config::SeedPolicy;
use crate::error::StoreError;

/// Greeting inserted by the seed step.
pub const SEED_MESSAGE: &str = "Hello World from K3s!";

const CREATE_GREETINGS_TABLE: &str = "CREATE TABLE IF NOT EXISTS greetings (
    id SERIAL PRIMARY KEY,
    message TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const SEED_ALWAYS: &str = "INSERT INTO greetings (message) VALUES ($1)";

const SEED_IF_EMPTY: &str = "INSERT INTO greetings (message)
    SELECT $1 WHERE NOT EXISTS (SELECT 1 FROM greetings)";

/// Create the greeting table if absent, then seed it according to `policy`.
///
/// Returns the number of rows the seed step inserted (0 or 1).
pub async fn bootstrap(pool: &PgPool, policy: SeedPolicy) -> Result<u64, StoreError> {
    sqlx::query(CREATE_GREETINGS_TABLE)
        .execute(pool)
        .await
        .map_err(StoreError::Schema)?;

    let statement = match policy {
        SeedPolicy::Always => SEED_ALWAYS,
        SeedPolicy::IfEmpty => SEED_IF_EMPTY,
        SeedPolicy::Never => {
            tracing::info!("greeting seed disabled");
            return Ok(0);
        }
    };

    let inserted = sqlx::query(statement)
        .bind(SEED_MESSAGE)
        .execute(pool)
        .await
        .map_err(StoreError::Seed)?
        .rows_affected();

    tracing::info!(policy = policy.as_str(), inserted, "greeting table bootstrapped");
    Ok(inserted)
}
