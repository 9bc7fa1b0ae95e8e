//! Store error type.

use thiserror::Error;

/// Errors raised while opening, bootstrapping, or reading the greeting store.
///
/// The first three variants are startup-tier: the entrypoint treats them as
/// fatal. The rest surface during request handling.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Liveness probe against a freshly opened pool failed.
    #[error("database liveness probe failed: {0}")]
    Ping(#[source] sqlx::Error),

    /// `CREATE TABLE IF NOT EXISTS` failed.
    #[error("schema bootstrap failed: {0}")]
    Schema(#[source] sqlx::Error),

    /// Seeding the greeting table failed.
    #[error("greeting seed failed: {0}")]
    Seed(#[source] sqlx::Error),

    /// Any other query failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The greeting table holds no rows.
    #[error("no greeting has been stored")]
    Empty,

    /// The store is unreachable (in-memory store outage).
    #[error("store unavailable")]
    Unavailable,
}

impl StoreError {
    /// Whether this error can only occur during startup.
    pub fn is_startup(&self) -> bool {
        matches!(self, Self::Ping(_) | Self::Schema(_) | Self::Seed(_))
    }
}
