use clap::Parser;

use crate::config::Config;
use crate::core::error::TradingClockResult;
use crate::core::utils::{detect_local_timezone, parse_timezone};

/// Trading Clock MCP Server
///
/// Emulates the server clock of a trading terminal: UTC+2 in winter, UTC+3
/// from the second Sunday of March to the first Sunday of November (02:00 UTC).
///
/// ## Development
/// ```bash
/// npx @modelcontextprotocol/inspector cargo run --bin mcp-server-trading-clock
/// ```
///
/// ## Configuration
/// Add to your MCP client configuration:
/// ```json
/// {
///   "mcpServers": {
///     "trading-clock": {
///       "command": "mcp-server-trading-clock",
///       "args": ["--local-timezone", "Europe/London"],
///       "env": {
///         "RUST_LOG": "info"
///       }
///     }
///   }
/// }
/// ```
///
/// ## Environment Variables
/// - `TRADING_CLOCK_LOCAL_TIMEZONE`: Same as `--local-timezone`
/// - `RUST_LOG` / `LOG_LEVEL`: Controls logging verbosity
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-server-trading-clock")]
#[command(about = "An MCP server emulating a trading platform's server clock")]
#[command(version)]
#[command(
    long_about = "A Model Context Protocol (MCP) server that reports the time of a trading platform server \nrunning at UTC+2, or UTC+3 during its fixed DST window, and converts server timestamps to local time."
)]
pub struct Cli {
    /// IANA timezone used when converting server timestamps to local time.
    ///
    /// Defaults to the host's timezone, or UTC if it cannot be detected.
    #[arg(
        long,
        value_name = "TIMEZONE",
        env = "TRADING_CLOCK_LOCAL_TIMEZONE",
        help = "IANA timezone for local-time conversion (e.g. Europe/London)"
    )]
    pub local_timezone: Option<String>,
}

impl Cli {
    /// Parse CLI arguments and convert to configuration
    pub fn parse_config() -> TradingClockResult<Config> {
        Self::parse().into_config()
    }

    pub fn into_config(self) -> TradingClockResult<Config> {
        let local_timezone = match self.local_timezone.as_deref() {
            Some(name) => {
                tracing::info!(timezone = name, "Using configured local timezone");
                parse_timezone(name)?
            }
            None => detect_local_timezone(),
        };
        Ok(Config::new(local_timezone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TradingClockError;

    #[test]
    fn test_explicit_timezone() {
        let cli = Cli::try_parse_from(["mcp-server-trading-clock", "--local-timezone", "Asia/Tokyo"])
            .unwrap();
        let config = cli.into_config().unwrap();

        assert_eq!(*config.local_timezone(), chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn test_invalid_timezone() {
        let cli = Cli {
            local_timezone: Some("Mars/Olympus_Mons".to_string()),
        };

        assert!(matches!(
            cli.into_config(),
            Err(TradingClockError::InvalidTimezone { .. })
        ));
    }

    #[test]
    fn test_detected_timezone() {
        let cli = Cli {
            local_timezone: None,
        };

        assert!(cli.into_config().is_ok());
    }
}
