//! Database configuration resolved from the process environment.
//!
//! Every parameter is optional. Connection parameters that are unset fall
//! through to the driver's own defaults (`PG*` variables, then
//! `localhost:5432`). Pool sizes fall back to compiled-in defaults whenever
//! the variable is absent, empty, or not a positive integer.
//!
//! Variables:
//! - `POSTGRES_HOST`, `POSTGRES_PORT`, `POSTGRES_USER`, `POSTGRES_PASSWORD`,
//!   `POSTGRES_DB`, `POSTGRES_SSL_MODE`
//! - `POSTGRES_MAX_OPEN_CONNS` (default: 10)
//! - `POSTGRES_MAX_IDLE_CONNS` (default: 5)
//! - `GREETING_SEED` (`always` | `if-empty` | `never`, default: `always`)

use std::time::Duration;

use sqlx::postgres::PgSslMode;

/// Default upper bound on open connections.
pub const DEFAULT_MAX_OPEN_CONNS: u32 = 10;
/// Default cap on idle connections. Advisory: logged, not enforced.
pub const DEFAULT_MAX_IDLE_CONNS: u32 = 5;
/// Fixed maximum lifetime of a pooled connection.
pub const MAX_CONN_LIFETIME: Duration = Duration::from_secs(5 * 60);
/// How long a checkout waits for a free connection before failing.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Read `name` from the process environment, substituting `default` when
/// the variable is absent or empty.
pub fn resolve(name: &str, default: &str) -> String {
    resolve_with(|key| std::env::var(key).ok(), name, default)
}

/// Same as [`resolve`], over an arbitrary lookup function.
pub fn resolve_with<F>(lookup: F, name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn resolve_optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.is_empty())
}

/// Parse a positive connection count, falling back to `default` on anything
/// else. Malformed values are never a startup failure.
pub fn parse_count(var: &str, raw: Option<&str>, default: u32) -> u32 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
            tracing::warn!(var, value = raw, default, "ignoring invalid connection count");
            default
        }
    }
}

/// How the greeting table is seeded during schema bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Insert the seed greeting on every startup. The table grows by one
    /// row per restart.
    #[default]
    Always,
    /// Insert the seed greeting only when the table holds no rows.
    IfEmpty,
    /// Never insert; the table is created but left as found.
    Never,
}

impl SeedPolicy {
    /// Parse a policy name. Unknown names yield [`SeedPolicy::Always`].
    pub fn parse_lossy(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "if-empty" => Self::IfEmpty,
            "never" => Self::Never,
            "always" => Self::Always,
            other => {
                tracing::warn!(value = other, "unknown GREETING_SEED, seeding on every startup");
                Self::Always
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::IfEmpty => "if-empty",
            Self::Never => "never",
        }
    }
}

/// Pool bounds applied when the pool is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_open: u32,
    pub max_idle: u32,
    pub max_lifetime: Duration,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_open: DEFAULT_MAX_OPEN_CONNS,
            max_idle: DEFAULT_MAX_IDLE_CONNS,
            max_lifetime: MAX_CONN_LIFETIME,
            acquire_timeout: ACQUIRE_TIMEOUT,
        }
    }
}

impl PoolSettings {
    /// Configured idle cap, never above `max_open`. sqlx has no idle cap,
    /// so this is reported at startup but not applied to the pool.
    pub fn idle_cap(&self) -> u32 {
        self.max_idle.min(self.max_open)
    }
}

/// Connection and pool parameters for the greeting store.
///
/// Custom `Debug` implementation redacts the password.
#[derive(Clone, Default)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub ssl_mode: Option<PgSslMode>,
    pub pool: PoolSettings,
    pub seed: SeedPolicy,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("database", &self.database)
            .field("ssl_mode", &self.ssl_mode.as_ref().map(ssl_mode_name))
            .field("pool", &self.pool)
            .field("seed", &self.seed)
            .finish()
    }
}

impl DatabaseConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = resolve_optional(&lookup, "POSTGRES_PORT")
            .map(|raw| parse_port("POSTGRES_PORT", &raw))
            .transpose()?;
        let ssl_mode = resolve_optional(&lookup, "POSTGRES_SSL_MODE")
            .map(|raw| parse_ssl_mode(&raw))
            .transpose()?;

        let pool = PoolSettings {
            max_open: parse_count(
                "POSTGRES_MAX_OPEN_CONNS",
                resolve_optional(&lookup, "POSTGRES_MAX_OPEN_CONNS").as_deref(),
                DEFAULT_MAX_OPEN_CONNS,
            ),
            max_idle: parse_count(
                "POSTGRES_MAX_IDLE_CONNS",
                resolve_optional(&lookup, "POSTGRES_MAX_IDLE_CONNS").as_deref(),
                DEFAULT_MAX_IDLE_CONNS,
            ),
            ..PoolSettings::default()
        };

        Ok(Self {
            host: resolve_optional(&lookup, "POSTGRES_HOST"),
            port,
            user: resolve_optional(&lookup, "POSTGRES_USER"),
            password: resolve_optional(&lookup, "POSTGRES_PASSWORD"),
            database: resolve_optional(&lookup, "POSTGRES_DB"),
            ssl_mode,
            pool,
            seed: SeedPolicy::parse_lossy(&resolve_with(&lookup, "GREETING_SEED", "always")),
        })
    }

    /// Render the `key=value` connection descriptor with the password masked.
    pub fn descriptor(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode={}",
            self.host.as_deref().unwrap_or_default(),
            self.port.map(|p| p.to_string()).unwrap_or_default(),
            self.user.as_deref().unwrap_or_default(),
            if self.password.is_some() { "***" } else { "" },
            self.database.as_deref().unwrap_or_default(),
            self.ssl_mode.as_ref().map(ssl_mode_name).unwrap_or("require"),
        )
    }
}

/// Parse a TCP port number from the named variable.
pub fn parse_port(var: &str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidPort {
        var: var.to_string(),
        value: raw.to_string(),
    })
}

fn parse_ssl_mode(raw: &str) -> Result<PgSslMode, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSslMode(raw.to_string()))
}

/// Canonical libpq name of an SSL mode.
pub fn ssl_mode_name(mode: &PgSslMode) -> &'static str {
    match mode {
        PgSslMode::Disable => "disable",
        PgSslMode::Allow => "allow",
        PgSslMode::Prefer => "prefer",
        PgSslMode::Require => "require",
        PgSslMode::VerifyCa => "verify-ca",
        PgSslMode::VerifyFull => "verify-full",
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid port for {var}: {value:?}")]
    InvalidPort { var: String, value: String },
    #[error("unsupported POSTGRES_SSL_MODE: {0:?}")]
    InvalidSslMode(String),
}
