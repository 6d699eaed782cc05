use std::sync::Arc;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use mcp_server_trading_clock::core::{
    clock::{FixedClock, SystemClock},
    dst::{DstWindow, ServerOffset},
    provider::TradingClock,
    render::{convert_to_user_local, render_server_timestamp},
};

fn at(instant: DateTime<Utc>) -> TradingClock {
    TradingClock::with_parts(Arc::new(FixedClock(instant)), Arc::new(chrono_tz::UTC))
}

#[test]
fn test_winter_rollover_into_next_day() {
    let clock = at(Utc.with_ymd_and_hms(2025, 1, 1, 23, 30, 0).unwrap());
    assert_eq!(clock.server_time_iso(), "2025-01-02T01:30:00.000+02:00");
}

#[test]
fn test_summer_time_without_rollover() {
    let clock = at(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
    assert_eq!(clock.server_time_iso(), "2025-07-01T03:00:00.000+03:00");
}

#[test]
fn test_spring_transition_is_millisecond_exact() {
    let start = DstWindow::for_year(2025).unwrap().start;
    let before = start - TimeDelta::milliseconds(1);

    assert_eq!(ServerOffset::resolve(before), ServerOffset::Winter);
    assert_eq!(ServerOffset::resolve(start), ServerOffset::Summer);
    assert_eq!(at(before).server_time_iso(), "2025-03-09T03:59:59.999+02:00");
    assert_eq!(at(start).server_time_iso(), "2025-03-09T05:00:00.000+03:00");
}

#[test]
fn test_autumn_transition_is_millisecond_exact() {
    let end = DstWindow::for_year(2025).unwrap().end;
    let before = end - TimeDelta::milliseconds(1);

    assert_eq!(at(before).server_time_iso(), "2025-11-02T04:59:59.999+03:00");
    assert_eq!(at(end).server_time_iso(), "2025-11-02T04:00:00.000+02:00");
}

#[test]
fn test_system_clock_round_trip() {
    let clock = TradingClock::with_parts(Arc::new(SystemClock), Arc::new(chrono_tz::UTC));
    let captured = Utc::now();
    let rendered = clock.server_time_iso();

    let recovered = DateTime::parse_from_rfc3339(&rendered)
        .unwrap()
        .with_timezone(&Utc);
    assert!((recovered - captured).num_milliseconds().abs() < 1000);
}

#[test]
fn test_server_timestamp_to_local_time() {
    let instant = Utc.with_ymd_and_hms(2025, 12, 24, 18, 0, 0).unwrap();
    let server = render_server_timestamp(instant);
    assert_eq!(server, "2025-12-24T20:00:00.000+02:00");

    let local = convert_to_user_local(&server, &chrono_tz::Europe::Berlin).unwrap();
    assert_eq!(local, "2025-12-24 19:00:00 CET");
}

#[test]
fn test_malformed_timestamp_is_detectable() {
    assert!(convert_to_user_local("not-a-timestamp", &chrono_tz::UTC).is_err());
    assert!(at(Utc::now()).convert_to_user_local("not-a-timestamp").is_err());
}

#[test]
fn test_late_march_2025_is_summer_time() {
    let before = Utc.with_ymd_and_hms(2025, 3, 30, 1, 59, 59).unwrap();
    let after = Utc.with_ymd_and_hms(2025, 3, 30, 2, 0, 0).unwrap();

    assert_eq!(ServerOffset::resolve(before), ServerOffset::Summer);
    assert_eq!(ServerOffset::resolve(after), ServerOffset::Summer);
    assert_eq!(at(before).server_time_iso(), "2025-03-30T04:59:59.000+03:00");
    assert_eq!(at(after).server_time_iso(), "2025-03-30T05:00:00.000+03:00");
}
