use chrono::{DateTime, Datelike, Days, NaiveDate, TimeDelta, Utc};

/// Hour of day (UTC) at which both DST transitions happen
pub const TRANSITION_HOUR_UTC: u32 = 2;

/// Interval `[start, end)` during which the server runs on summer time.
///
/// Starts on the second Sunday of March and ends on the first Sunday of
/// November, both at 02:00 UTC. A window is only valid for the year it was
/// built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DstWindow {
    /// Build the window for `year`.
    ///
    /// Returns `None` only when the year is outside the range chrono can
    /// represent.
    pub fn for_year(year: i32) -> Option<Self> {
        let second_sunday_of_march = first_sunday(year, 3)?.checked_add_days(Days::new(7))?;
        let first_sunday_of_november = first_sunday(year, 11)?;

        Some(Self {
            start: at_transition_hour(second_sunday_of_march)?,
            end: at_transition_hour(first_sunday_of_november)?,
        })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

fn first_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let weekday = first_of_month.weekday().num_days_from_sunday();
    first_of_month.checked_add_days(Days::new(u64::from((7 - weekday) % 7)))
}

fn at_transition_hour(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(TRANSITION_HOUR_UTC, 0, 0)
        .map(|naive| naive.and_utc())
}

/// Offset of the server clock from UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerOffset {
    /// UTC+2
    Winter,
    /// UTC+3
    Summer,
}

impl ServerOffset {
    /// Resolve the offset in effect at `instant`.
    ///
    /// Only the window of the instant's own UTC year is consulted.
    pub fn resolve(instant: DateTime<Utc>) -> Self {
        match DstWindow::for_year(instant.year()) {
            Some(window) if window.contains(instant) => ServerOffset::Summer,
            _ => ServerOffset::Winter,
        }
    }

    pub const fn hours(self) -> i64 {
        match self {
            ServerOffset::Winter => 2,
            ServerOffset::Summer => 3,
        }
    }

    pub const fn is_dst(self) -> bool {
        matches!(self, ServerOffset::Summer)
    }

    pub fn as_delta(self) -> TimeDelta {
        TimeDelta::hours(self.hours())
    }

    /// Offset rendered as `+HH:00`
    pub fn suffix(self) -> String {
        format!("{:+03}:00", self.hours())
    }
}
