use std::env;

use tracing_subscriber::{EnvFilter, prelude::*};

use crate::core::error::{TradingClockError, TradingClockResult};

const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialize logging based on environment configuration
///
/// Logging stays off unless `RUST_LOG` or `LOG_LEVEL` is set. Output goes to
/// stderr because stdout carries the MCP stdio transport.
///
/// # Environment Variables
/// - `RUST_LOG`: Full filter directives (e.g. `mcp_server_trading_clock=debug`)
/// - `LOG_LEVEL`: Plain level used when `RUST_LOG` is absent or invalid
pub fn init_logging() -> TradingClockResult<()> {
    let rust_log = env::var("RUST_LOG").ok();
    let log_level = env::var("LOG_LEVEL").ok();

    let Some((env_filter, filter)) = select_filter(rust_log.as_deref(), log_level.as_deref())
    else {
        return Ok(());
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| TradingClockError::LoggingInitialization(e.to_string()))?;

    tracing::info!("Logging initialized with filter: {}", filter);
    Ok(())
}

/// Pick the filter to install and the directive string it was built from
///
/// `RUST_LOG` wins when it parses; otherwise `LOG_LEVEL` is used, then
/// `info`. Returns `None` when neither variable is set.
fn select_filter(rust_log: Option<&str>, log_level: Option<&str>) -> Option<(EnvFilter, String)> {
    if let Some(directives) = rust_log {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return Some((filter, directives.to_string()));
        }
    }

    match (rust_log, log_level) {
        (None, None) => None,
        (_, Some(level)) => Some((EnvFilter::new(level), level.to_string())),
        (Some(_), None) => Some((
            EnvFilter::new(DEFAULT_LOG_LEVEL),
            DEFAULT_LOG_LEVEL.to_string(),
        )),
    }
}
