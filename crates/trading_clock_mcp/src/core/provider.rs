use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::core::{
    clock::{Clock, SystemClock},
    dst::DstWindow,
    error::{TradingClockError, TradingClockResult},
    models::{DstWindowResult, LocalTimeResult, ServerTimeResult},
    render::{self, LocalRenderer},
    utils::{format_utc, parse_timestamp},
};

/// Trading clock implementation
#[derive(Clone)]
pub struct TradingClock {
    clock: Arc<dyn Clock>,
    renderer: Arc<dyn LocalRenderer>,
}

impl TradingClock {
    /// Trading clock reading the system clock and displaying in `local_timezone`
    pub fn new(local_timezone: Tz) -> Self {
        Self::with_parts(Arc::new(SystemClock), Arc::new(local_timezone))
    }

    pub fn with_parts(clock: Arc<dyn Clock>, renderer: Arc<dyn LocalRenderer>) -> Self {
        Self { clock, renderer }
    }

    pub fn local_timezone_name(&self) -> String {
        self.renderer.zone_name()
    }

    /// Current server time as `YYYY-MM-DDTHH:mm:ss.sss+HH:00`
    pub fn server_time_iso(&self) -> String {
        render::render_server_timestamp(self.clock.now())
    }

    pub fn server_time(&self) -> ServerTimeResult {
        self.server_time_at(self.clock.now())
    }

    pub fn server_time_at(&self, instant: DateTime<Utc>) -> ServerTimeResult {
        let result = ServerTimeResult::from_instant(instant);
        tracing::debug!(
            instant = %instant,
            offset_hours = result.offset_hours,
            "Resolved server offset"
        );
        result
    }

    /// Server time for an optional ISO 8601 instant, defaulting to now
    pub fn server_time_for(&self, at: Option<&str>) -> TradingClockResult<ServerTimeResult> {
        match at {
            Some(at) => Ok(self.server_time_at(parse_timestamp(at)?)),
            None => Ok(self.server_time()),
        }
    }

    pub fn convert_to_user_local(
        &self,
        server_timestamp: &str,
    ) -> TradingClockResult<LocalTimeResult> {
        let instant = parse_timestamp(server_timestamp)?;
        let local_time = self.renderer.render(instant);

        Ok(LocalTimeResult {
            server_timestamp: server_timestamp.trim().to_string(),
            utc: format_utc(instant),
            local_timezone: self.local_timezone_name(),
            local_time,
        })
    }

    pub fn dst_window(&self, year: i32) -> TradingClockResult<DstWindowResult> {
        let window = DstWindow::for_year(year).ok_or(TradingClockError::YearOutOfRange { year })?;
        Ok(DstWindowResult::from_window(year, &window))
    }
}

impl Default for TradingClock {
    fn default() -> Self {
        Self::new(chrono_tz::UTC)
    }
}
