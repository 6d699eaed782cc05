use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::core::{
    dst::ServerOffset,
    error::TradingClockResult,
    utils::{LOCAL_DISPLAY_FORMAT, SERVER_DATETIME_FORMAT, parse_timestamp},
};

const UTC_SUFFIX: &str = "+00:00";

/// Renders an absolute instant for a human observer.
///
/// Keeps locale and host specifics out of the offset logic.
pub trait LocalRenderer: Send + Sync {
    /// Name of the zone the renderer displays in
    fn zone_name(&self) -> String;

    fn render(&self, instant: DateTime<Utc>) -> String;
}

impl LocalRenderer for Tz {
    fn zone_name(&self) -> String {
        self.name().to_string()
    }

    fn render(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(self)
            .format(LOCAL_DISPLAY_FORMAT)
            .to_string()
    }
}

/// Render `instant` as server time: `YYYY-MM-DDTHH:mm:ss.sss+HH:00`.
///
/// Calendar fields are shifted by the resolved offset, so hour overflow
/// rolls the date forward across month and year ends. Only years 0000-9999
/// produce RFC 3339; others render as `+10000`/`-0001` style years.
pub fn render_server_timestamp(instant: DateTime<Utc>) -> String {
    let offset = ServerOffset::resolve(instant);
    render_with_offset(instant, offset)
}

/// Server wall-clock fields for `instant`, `None` past the end of chrono's range
pub(crate) fn server_local(instant: DateTime<Utc>, offset: ServerOffset) -> Option<NaiveDateTime> {
    instant.naive_utc().checked_add_signed(offset.as_delta())
}

pub(crate) fn render_with_offset(instant: DateTime<Utc>, offset: ServerOffset) -> String {
    match server_local(instant, offset) {
        Some(local) => format!("{}{}", local.format(SERVER_DATETIME_FORMAT), offset.suffix()),
        // Unshiftable instants keep their UTC fields under a matching label
        None => format!(
            "{}{}",
            instant.naive_utc().format(SERVER_DATETIME_FORMAT),
            UTC_SUFFIX
        ),
    }
}

/// Convert a server timestamp into the observer's local time.
///
/// Fails with `InvalidTimestamp` when the input is not an offset-qualified
/// ISO 8601 timestamp.
pub fn convert_to_user_local(
    server_timestamp: &str,
    renderer: &dyn LocalRenderer,
) -> TradingClockResult<String> {
    let instant = parse_timestamp(server_timestamp)?;
    Ok(renderer.render(instant))
}
