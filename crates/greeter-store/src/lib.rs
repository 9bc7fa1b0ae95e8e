//! # greeter-store — Greeting Persistence
//!
//! PostgreSQL persistence for the greeter service via SQLx.
//!
//! ## Data Model
//!
//! One append-only table:
//!
//! ```text
//! greetings (
//!     id         SERIAL PRIMARY KEY,
//!     message    TEXT NOT NULL,
//!     created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
//! )
//! ```
//!
//! The current greeting is the row with the newest `created_at`.
//!
//! ## Modules
//!
//! - [`config`] — environment-driven connection and pool parameters
//! - [`pool`] — pool setup, liveness probe, schema bootstrap
//! - [`greetings`] — queries against the `greetings` table
//! - [`store`] — the [`GreetingStore`] trait used by the HTTP layer
//! - [`memory`] — in-process [`GreetingStore`] for tests and embedding

pub mod config;
pub mod error;
pub mod greetings;
pub mod memory;
pub mod pool;
pub mod schema;
pub mod store;

pub use config::{ConfigError, DatabaseConfig, PoolSettings, SeedPolicy};
pub use error::StoreError;
pub use greetings::Greeting;
pub use memory::MemoryGreetingStore;
pub use pool::initialize;
pub use schema::SEED_MESSAGE;
pub use store::{GreetingStore, PgGreetingStore};
