//! Time utilities for yarnstats
//!
//! All persisted timestamps are whole seconds since the Unix epoch. The
//! resource manager reports times in milliseconds; conversion helpers live
//! here so the truncation rule is applied in one place.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `YARNSTATS_MOCK_TIME` environment variable can be set
//! to override the system time. This is useful for exercising the retention
//! horizon and the `lastpoll_ago` variable without waiting.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 14:30:00`)
//!
//! Example:
//! ```bash
//! YARNSTATS_MOCK_TIME="2025-12-25 14:30:00" yarnappstats print localVars lastpoll_ago
//! ```

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::sync::OnceLock;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "YARNSTATS_MOCK_TIME";

/// Format accepted by [`MOCK_TIME_ENV_VAR`]
pub const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Offset between mock time and real time, computed once per process.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

#[allow(clippy::disallowed_methods)] // Internal implementation that wraps Local::now()
fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                match parse_local_datetime(&mock_time_str) {
                    Some(mock_dt) => {
                        let offset = mock_dt.signed_duration_since(Local::now());
                        tracing::info!(
                            mock_time = %mock_time_str,
                            offset_secs = offset.num_seconds(),
                            "Mock time enabled"
                        );
                        return Some(offset);
                    }
                    None => {
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            expected_format = MOCK_TIME_FORMAT,
                            "Invalid mock time, using system time"
                        );
                    }
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

fn parse_local_datetime(s: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(s, MOCK_TIME_FORMAT).ok()?;
    Local.from_local_datetime(&naive).single()
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local time, respecting mock time settings in debug builds.
#[allow(clippy::disallowed_methods)] // The wrapper that provides mock time support
pub fn now() -> DateTime<Local> {
    let real_now = Local::now();

    match get_mock_time_offset() {
        Some(offset) => real_now + offset,
        None => real_now,
    }
}

/// Current time as whole seconds since the Unix epoch.
pub fn now_epoch_secs() -> i64 {
    now().timestamp()
}

/// Convert a millisecond timestamp to seconds, truncating toward zero.
///
/// Persisted history relies on this exact rounding, so sub-second precision
/// is dropped rather than rounded.
pub fn millis_to_secs(millis: i64) -> i64 {
    millis / 1000
}

/// Convert a second timestamp to milliseconds.
pub fn secs_to_millis(secs: i64) -> i64 {
    secs.saturating_mul(1000)
}

/// Format an epoch-seconds timestamp for log output.
pub fn format_epoch_secs(secs: i64) -> String {
    match Local.timestamp_opt(secs, 0).single() {
        Some(dt) => dt.format(MOCK_TIME_FORMAT).to_string(),
        None => secs.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_millis_to_secs_truncates() {
        assert_eq!(millis_to_secs(1_999), 1);
        assert_eq!(millis_to_secs(2_000), 2);
        assert_eq!(millis_to_secs(0), 0);
        assert_eq!(millis_to_secs(1_519_830_322_804), 1_519_830_322);
    }

    #[test]
    fn test_secs_to_millis() {
        assert_eq!(secs_to_millis(1_519_830_322), 1_519_830_322_000);
        assert_eq!(secs_to_millis(i64::MAX), i64::MAX);
    }

    #[test]
    fn test_now_returns_time() {
        let t = now();
        assert!(t.year() >= 2020);
        assert!(t.year() <= 2100);
    }

    #[test]
    fn test_now_epoch_secs_matches_now() {
        let secs = now_epoch_secs();
        let diff = (now().timestamp() - secs).abs();
        assert!(diff <= 1);
    }

    #[test]
    fn test_parse_mock_time_format() {
        assert!(parse_local_datetime("2025-12-25 14:30:00").is_some());
        assert!(parse_local_datetime("2025-12-31 23:59:59").is_some());

        assert!(parse_local_datetime("2025-12-25").is_none());
        assert!(parse_local_datetime("2025-12-25T14:30:00").is_none());
        assert!(parse_local_datetime("not a date").is_none());
    }

    #[test]
    fn test_format_epoch_secs() {
        let dt = Local.with_ymd_and_hms(2025, 12, 25, 14, 30, 45).unwrap();
        assert_eq!(format_epoch_secs(dt.timestamp()), "2025-12-25 14:30:45");
    }

    #[test]
    #[cfg(debug_assertions)]
    fn test_is_mock_time_active_does_not_panic() {
        let _ = is_mock_time_active();
    }
}
