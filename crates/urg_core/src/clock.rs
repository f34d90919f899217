use std::sync::atomic::{AtomicI64, Ordering};

use time::format_description::well_known::Rfc3339;
use time::{format_description, OffsetDateTime, UtcOffset};

use crate::error::AppError;

/// Millisecond-precision UTC layout used for every persisted timestamp.
const ISO_MILLIS_UTC: &str =
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z";

/// Source of "now" for record stamps and identifiers.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Deterministic clock: every call returns the previous instant plus a fixed step.
#[derive(Debug)]
pub struct SteppingClock {
    next_ms: AtomicI64,
    step_ms: i64,
}

impl SteppingClock {
    pub fn new(start_unix_ms: i64, step_ms: i64) -> Self {
        Self {
            next_ms: AtomicI64::new(start_unix_ms),
            step_ms,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> OffsetDateTime {
        let ms = self.next_ms.fetch_add(self.step_ms, Ordering::SeqCst);
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

pub fn format_timestamp(dt: OffsetDateTime) -> Result<String, AppError> {
    let items = format_description::parse(ISO_MILLIS_UTC).map_err(|e| {
        AppError::new("CLOCK_FORMAT_CONFIG_FAILED", "Invalid timestamp layout")
            .with_details(e.to_string())
    })?;
    dt.to_offset(UtcOffset::UTC).format(&items).map_err(|e| {
        AppError::new("CLOCK_FORMAT_FAILED", "Failed to format timestamp")
            .with_details(e.to_string())
    })
}

/// Parse a persisted timestamp. Any RFC3339 value is accepted, not only our own layout.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw.trim(), &Rfc3339).ok()
}

pub fn unix_millis(dt: OffsetDateTime) -> i64 {
    (dt.unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_millisecond_precision() {
        let clock = SteppingClock::new(1_767_225_600_123, 1_000);
        let s = format_timestamp(clock.now()).expect("format");
        assert_eq!(s, "2026-01-01T00:00:00.123Z");
    }

    #[test]
    fn stepping_clock_advances_on_each_call() {
        let clock = SteppingClock::new(1_767_225_600_000, 250);
        let a = clock.now();
        let b = clock.now();
        assert_eq!(unix_millis(b) - unix_millis(a), 250);
    }

    #[test]
    fn formatted_timestamps_parse_back() {
        let s = format_timestamp(SystemClock.now()).expect("format");
        assert!(parse_timestamp(&s).is_some(), "expected RFC3339: {s}");
        assert!(parse_timestamp("yesterday").is_none());
    }
}
