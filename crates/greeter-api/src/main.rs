//! # greeter-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the greeter service.
//! Binds to configurable port (default 3000).

use greeter_api::state::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;

    greeter_api::bootstrap::run(config).await.map_err(|e| {
        tracing::error!("Fatal: {e}");
        e
    })?;

    Ok(())
}

/// `RUST_LOG` sets the filter (default `info`); `LOG_FORMAT=json` emits
/// JSON lines instead of human-readable output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
