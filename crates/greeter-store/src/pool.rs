//! Connection pool setup.
//!
//! ## Startup Sequence
//!
//! 1. **Build options** from [`DatabaseConfig`]; unset fields keep the
//!    driver defaults, except SSL mode which defaults to `require`.
//! 2. **Open the pool** with max open and lifetime bounds. No
//!    connection is made yet.
//! 3. **Liveness probe**. The first real round-trip.
//! 4. **Schema bootstrap** and seed.
//!
//! Each step depends on the previous one succeeding. There is no retry.

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};

use crate::config::{DatabaseConfig, PoolSettings, SeedPolicy};
use crate::error::StoreError;
use crate::{greetings, schema};

/// Translate resolved parameters into driver connect options.
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let mut options = PgConnectOptions::new();
    if let Some(host) = &config.host {
        options = options.host(host);
    }
    if let Some(port) = config.port {
        options = options.port(port);
    }
    if let Some(user) = &config.user {
        options = options.username(user);
    }
    if let Some(password) = &config.password {
        options = options.password(password);
    }
    if let Some(database) = &config.database {
        options = options.database(database);
    }
    let mode = config.ssl_mode.clone().unwrap_or(PgSslMode::Require);
    options.ssl_mode(mode)
}

/// Pool bounds. No idle floor is set, so an unused pool drains to zero
/// connections as lifetimes expire.
pub fn pool_options(settings: &PoolSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_open)
        .min_connections(0)
        .max_lifetime(settings.max_lifetime)
        .acquire_timeout(settings.acquire_timeout)
}

/// Open, probe, and bootstrap the greeting store.
pub async fn initialize(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    tracing::info!(
        descriptor = %config.descriptor(),
        max_open = config.pool.max_open,
        max_idle_advisory = config.pool.idle_cap(),
        max_lifetime_secs = config.pool.max_lifetime.as_secs(),
        "opening database pool"
    );
    initialize_with(connect_options(config), &config.pool, config.seed).await
}

/// [`initialize`] over explicit connect options.
pub async fn initialize_with(
    options: PgConnectOptions,
    settings: &PoolSettings,
    seed: SeedPolicy,
) -> Result<PgPool, StoreError> {
    let pool = pool_options(settings).connect_lazy_with(options);

    if let Err(e) = greetings::ping(&pool).await {
        pool.close().await;
        return Err(StoreError::Ping(e));
    }
    tracing::info!("Connected to PostgreSQL");

    if let Err(e) = schema::bootstrap(&pool, seed).await {
        pool.close().await;
        return Err(e);
    }

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::{ssl_mode_name, DEFAULT_MAX_OPEN_CONNS};

    #[test]
    fn pool_options_apply_defaults() {
        let options = pool_options(&PoolSettings::default());
        assert_eq!(options.get_max_connections(), 10);
        assert_eq!(options.get_min_connections(), 0);
        assert_eq!(options.get_max_lifetime(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn idle_setting_never_pins_connections_open() {
        let options = pool_options(&PoolSettings {
            max_open: 2,
            max_idle: 9,
            ..PoolSettings::default()
        });
        assert_eq!(options.get_max_connections(), 2);
        assert_eq!(options.get_min_connections(), 0);
    }

    #[test]
    fn malformed_max_open_yields_default_pool_size() {
        let config = DatabaseConfig::from_lookup(|key| {
            (key == "POSTGRES_MAX_OPEN_CONNS").then(|| "abc".to_string())
        })
        .unwrap();
        let options = pool_options(&config.pool);
        assert_eq!(options.get_max_connections(), DEFAULT_MAX_OPEN_CONNS);
    }

    #[test]
    fn connect_options_apply_overrides() {
        let config = DatabaseConfig {
            host: Some("db.internal".to_string()),
            port: Some(6543),
            user: Some("greeter".to_string()),
            password: Some("secret".to_string()),
            database: Some("greetings".to_string()),
            ssl_mode: Some(sqlx::postgres::PgSslMode::Disable),
            ..DatabaseConfig::default()
        };
        let options = connect_options(&config);
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "greeter");
        assert_eq!(options.get_database(), Some("greetings"));
        assert_eq!(ssl_mode_name(&options.get_ssl_mode()), "disable");
    }

    #[test]
    fn unset_ssl_mode_requires_tls() {
        let options = connect_options(&DatabaseConfig::default());
        assert_eq!(ssl_mode_name(&options.get_ssl_mode()), "require");
    }

    #[tokio::test]
    async fn unreachable_store_fails_liveness_probe() {
        let options = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("nobody")
            .database("nothing");
        let settings = PoolSettings {
            max_idle: 0,
            acquire_timeout: Duration::from_millis(500),
            ..PoolSettings::default()
        };
        let err = initialize_with(options, &settings, SeedPolicy::Always)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Ping(_)), "got: {err:?}");
        assert!(err.is_startup());
    }
}
