use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::core::error::{TradingClockError, TradingClockResult};

// Constants for format strings
pub const SERVER_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
pub const LOCAL_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";
pub const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
pub const DAY_FORMAT: &str = "%A";

/// Available resource URIs for the Trading Clock MCP Server
pub const AVAILABLE_RESOURCES: &[&str] = &["clock://status", "clock://help"];

/// Parse an offset-qualified ISO 8601 timestamp into a UTC instant
///
/// # Arguments
///
/// * `timestamp` - RFC 3339 timestamp with an explicit offset; surrounding
///   whitespace is ignored
///
/// # Returns
///
/// The absolute instant in UTC, or `InvalidTimestamp` if the input does not
/// parse or lacks an offset
pub fn parse_timestamp(timestamp: &str) -> TradingClockResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TradingClockError::InvalidTimestamp {
            timestamp: timestamp.to_string(),
        })
}

/// Parse an IANA timezone name
///
/// # Arguments
///
/// * `timezone_name` - IANA name such as `Europe/London`
///
/// # Returns
///
/// The matching timezone, or `InvalidTimezone` for unknown names
pub fn parse_timezone(timezone_name: &str) -> TradingClockResult<Tz> {
    Tz::from_str(timezone_name.trim()).map_err(|_| TradingClockError::InvalidTimezone {
        timezone: timezone_name.to_string(),
    })
}

/// Detect the host's timezone, falling back to UTC
///
/// # Returns
///
/// The host's IANA timezone, or UTC (with a warning) when it cannot be
/// detected or parsed
pub fn detect_local_timezone() -> Tz {
    timezone_or_utc(iana_time_zone::get_timezone())
}

/// Turn a timezone detection result into a timezone
///
/// # Arguments
///
/// * `detected` - Zone name reported by the host, or the detection error
///
/// # Returns
///
/// The parsed timezone, or UTC with a logged warning
pub fn timezone_or_utc<E: Display>(detected: Result<String, E>) -> Tz {
    match detected {
        Ok(tz_name) => match tz_name.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!("Could not parse timezone '{}', defaulting to UTC", tz_name);
                chrono_tz::UTC
            }
        },
        Err(e) => {
            tracing::warn!("Could not detect system timezone ({}), defaulting to UTC", e);
            chrono_tz::UTC
        }
    }
}

/// Format a UTC instant with millisecond precision and a `Z` suffix
///
/// # Arguments
///
/// * `instant` - The instant to format
///
/// # Returns
///
/// A string such as `2025-03-09T02:00:00.000Z`
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format(UTC_FORMAT).to_string()
}
