//! # Application State
//!
//! Configuration resolved at startup and the shared state passed to every
//! route handler via the `State` extractor.
//!
//! Variables read here (database variables are documented in
//! [`greeter_store::config`]):
//! - `APP_VERSION` (default: `v0.0.0`)
//! - `PORT` (default: `3000`)

use std::net::SocketAddr;
use std::sync::Arc;

use greeter_store::config::{parse_port, resolve_with};
use greeter_store::{ConfigError, DatabaseConfig, GreetingStore};

/// Version reported when `APP_VERSION` is unset.
pub const DEFAULT_VERSION: &str = "v0.0.0";
/// Listen port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub version: String,
    pub port: u16,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let version = resolve_with(&lookup, "APP_VERSION", DEFAULT_VERSION);
        let port = parse_port(
            "PORT",
            &resolve_with(&lookup, "PORT", &DEFAULT_PORT.to_string()),
        )?;
        let database = DatabaseConfig::from_lookup(&lookup)?;
        Ok(Self {
            version,
            port,
            database,
        })
    }

    /// Address the listener binds: all interfaces on the configured port.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            port: DEFAULT_PORT,
            database: DatabaseConfig::default(),
        }
    }
}

/// Shared application state. Cheap to clone; all clones share one store.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn GreetingStore>,
}

impl AppState {
    pub fn new(store: impl GreetingStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<dyn GreetingStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn GreetingStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
