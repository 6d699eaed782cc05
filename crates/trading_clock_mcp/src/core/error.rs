use rmcp::serde_json::json;

use crate::core::utils::AVAILABLE_RESOURCES;

// Error codes
const ERROR_INVALID_TIMESTAMP: &str = "invalid_timestamp";
const ERROR_INVALID_TIMEZONE: &str = "invalid_timezone";
const ERROR_YEAR_OUT_OF_RANGE: &str = "year_out_of_range";
const ERROR_RESOURCE_NOT_FOUND: &str = "resource_not_found";
const ERROR_LOGGING_INITIALIZATION: &str = "logging_initialization";

/// Custom error types for better error handling
#[derive(Debug, thiserror::Error)]
pub enum TradingClockError {
    #[error("Invalid timestamp: {timestamp}. Expected an ISO 8601 timestamp with a UTC offset")]
    InvalidTimestamp { timestamp: String },
    #[error("Invalid timezone: {timezone}")]
    InvalidTimezone { timezone: String },
    #[error("Year out of supported range: {year}")]
    YearOutOfRange { year: i32 },
    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
}

impl From<TradingClockError> for McpError {
    fn from(err: TradingClockError) -> Self {
        match err {
            TradingClockError::InvalidTimestamp { timestamp } => McpError::invalid_params(
                ERROR_INVALID_TIMESTAMP,
                Some(json!({
                    "timestamp": timestamp,
                    "example": "2025-07-01T03:00:00.000+03:00"
                })),
            ),
            TradingClockError::InvalidTimezone { timezone } => McpError::invalid_params(
                ERROR_INVALID_TIMEZONE,
                Some(json!({"timezone": timezone})),
            ),
            TradingClockError::YearOutOfRange { year } => {
                McpError::invalid_params(ERROR_YEAR_OUT_OF_RANGE, Some(json!({"year": year})))
            }
            TradingClockError::ResourceNotFound { uri } => McpError::resource_not_found(
                ERROR_RESOURCE_NOT_FOUND,
                Some(json!({
                    "uri": uri,
                    "available_resources": AVAILABLE_RESOURCES
                })),
            ),
            TradingClockError::LoggingInitialization(message) => McpError::internal_error(
                ERROR_LOGGING_INITIALIZATION,
                Some(json!({"message": message})),
            ),
        }
    }
}

pub type McpError = rmcp::ErrorData;
pub type TradingClockResult<T> = Result<T, TradingClockError>;
pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::TradingClockError;
    use crate::core::error::McpError;

    #[test]
    fn test_error_conversion() {
        let error = TradingClockError::InvalidTimestamp {
            timestamp: "not-a-timestamp".to_string(),
        };
        let mcp_error: McpError = error.into();

        assert!(mcp_error.to_string().contains("invalid_timestamp"));
    }

    #[test]
    fn test_resource_not_found_lists_resources() {
        let error = TradingClockError::ResourceNotFound {
            uri: "clock://missing".to_string(),
        };
        let mcp_error: McpError = error.into();

        assert!(mcp_error.to_string().contains("resource_not_found"));
        let data = mcp_error.data.unwrap();
        assert_eq!(data["uri"], "clock://missing");
        assert!(data["available_resources"].is_array());
    }

    #[test]
    fn test_error_display() {
        let error = TradingClockError::YearOutOfRange { year: 300_000 };
        assert_eq!(error.to_string(), "Year out of supported range: 300000");
    }
}
