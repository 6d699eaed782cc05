use chrono::{DateTime, Datelike, Utc};
use rmcp::schemars;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{
    dst::{DstWindow, ServerOffset},
    render::{render_with_offset, server_local},
    utils::{DAY_FORMAT, format_utc},
};

/// Helper function to deserialize and trim strings
fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Helper function to deserialize optional strings, treating blanks as absent
fn deserialize_trimmed_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Server time at a given instant
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ServerTimeResult {
    /// Server wall-clock time, ISO 8601 with offset (e.g. 2025-07-01T03:00:00.000+03:00)
    pub timestamp: String,
    /// The same instant in UTC
    pub utc: String,
    /// Server offset from UTC in hours (2 or 3)
    pub offset_hours: i64,
    /// Whether the server is on summer time
    pub is_dst: bool,
    /// Day of the week on the server
    pub day_of_week: String,
    /// Start of this year's DST window (UTC)
    pub dst_window_start: Option<String>,
    /// End of this year's DST window (UTC)
    pub dst_window_end: Option<String>,
}

impl ServerTimeResult {
    /// Create a ServerTimeResult from a UTC instant
    pub fn from_instant(instant: DateTime<Utc>) -> ServerTimeResult {
        let offset = ServerOffset::resolve(instant);
        let local = server_local(instant, offset).unwrap_or_else(|| instant.naive_utc());
        let window = DstWindow::for_year(instant.year());

        ServerTimeResult {
            timestamp: render_with_offset(instant, offset),
            utc: format_utc(instant),
            offset_hours: offset.hours(),
            is_dst: offset.is_dst(),
            day_of_week: local.format(DAY_FORMAT).to_string(),
            dst_window_start: window.map(|w| format_utc(w.start)),
            dst_window_end: window.map(|w| format_utc(w.end)),
        }
    }
}

/// Server timestamp converted to the observer's local time
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LocalTimeResult {
    /// Server timestamp as given
    pub server_timestamp: String,
    /// Absolute instant recovered from the timestamp (UTC)
    pub utc: String,
    /// IANA name of the observer's timezone
    pub local_timezone: String,
    /// Display-ready local time
    pub local_time: String,
}

/// DST window of a calendar year
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DstWindowResult {
    /// Calendar year
    pub year: i32,
    /// Window start (UTC, inclusive)
    pub start: String,
    /// Window end (UTC, exclusive)
    pub end: String,
    /// Length of the window in hours
    pub duration_hours: i64,
}

impl DstWindowResult {
    pub fn from_window(year: i32, window: &DstWindow) -> DstWindowResult {
        DstWindowResult {
            year,
            start: format_utc(window.start),
            end: format_utc(window.end),
            duration_hours: window.duration().num_hours(),
        }
    }
}

/// Request to get the server time
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetServerTimeRequest {
    /// Optional ISO 8601 instant with offset to evaluate instead of now
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    pub at: Option<String>,
}

/// Request to convert a server timestamp to local time
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertToUserLocalRequest {
    /// Server timestamp, e.g. '2025-07-01T03:00:00.000+03:00'
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub timestamp: String,
}

/// Request to get the DST window of a year
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDstWindowRequest {
    /// Calendar year (e.g. 2025)
    pub year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_server_time_result_from_instant() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 23, 30, 0).unwrap();
        let result = ServerTimeResult::from_instant(instant);

        assert_eq!(result.timestamp, "2025-01-02T01:30:00.000+02:00");
        assert_eq!(result.utc, "2025-01-01T23:30:00.000Z");
        assert_eq!(result.offset_hours, 2);
        assert!(!result.is_dst);
        assert_eq!(result.day_of_week, "Thursday");
        assert_eq!(
            result.dst_window_start.as_deref(),
            Some("2025-03-09T02:00:00.000Z")
        );
        assert_eq!(
            result.dst_window_end.as_deref(),
            Some("2025-11-02T02:00:00.000Z")
        );
    }

    #[test]
    fn test_server_time_result_serialization() {
        let instant = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        let result = ServerTimeResult::from_instant(instant);

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"offset_hours\":3"));
        assert!(json.contains("\"is_dst\":true"));
        assert!(json.contains("Tuesday"));
    }

    #[test]
    fn test_server_time_result_at_end_of_range() {
        let result = ServerTimeResult::from_instant(DateTime::<Utc>::MAX_UTC);

        assert!(result.timestamp.ends_with("+00:00"));
        assert!(!result.day_of_week.is_empty());
    }

    #[test]
    fn test_dst_window_result() {
        let window = DstWindow::for_year(2025).unwrap();
        let result = DstWindowResult::from_window(2025, &window);

        assert_eq!(result.start, "2025-03-09T02:00:00.000Z");
        assert_eq!(result.end, "2025-11-02T02:00:00.000Z");
        // 238 days
        assert_eq!(result.duration_hours, 238 * 24);
    }

    #[test]
    fn test_request_trimming() {
        let json = r#"{"timestamp": "   2025-07-01T03:00:00.000+03:00   "}"#;
        let request: ConvertToUserLocalRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.timestamp, "2025-07-01T03:00:00.000+03:00");

        let json = r#"{"at": "  2025-07-01T00:00:00Z "}"#;
        let request: GetServerTimeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.at.as_deref(), Some("2025-07-01T00:00:00Z"));

        let request: GetServerTimeRequest = serde_json::from_str(r#"{"at": "  "}"#).unwrap();
        assert!(request.at.is_none());

        let request: GetServerTimeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.at.is_none());
    }
}
