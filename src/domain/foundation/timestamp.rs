//! Timestamp value object for immutable points in time.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC 3339 string in any offset, normalizing to UTC.
    ///
    /// Returns `None` for anything that is not a valid RFC 3339 instant.
    pub fn parse_rfc3339(value: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Formats as RFC 3339 with millisecond precision and a `Z` suffix.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_is_before_and_after() {
        let ts1 = Timestamp::now();
        sleep(Duration::from_millis(10));
        let ts2 = Timestamp::now();

        assert!(ts1.is_before(&ts2));
        assert!(ts2.is_after(&ts1));
        assert!(!ts2.is_before(&ts1));
    }

    #[test]
    fn parse_rfc3339_normalizes_offset_to_utc() {
        let ts = Timestamp::parse_rfc3339("2024-01-15T12:30:00+02:00").unwrap();
        assert_eq!(ts.as_datetime().hour(), 10);
        assert_eq!(ts.as_datetime().day(), 15);
    }

    #[test]
    fn parse_rfc3339_accepts_postgres_microseconds() {
        let ts = Timestamp::parse_rfc3339("2024-03-01T08:00:00.123456+00:00").unwrap();
        assert_eq!(ts.as_datetime().year(), 2024);
    }

    #[test]
    fn parse_rfc3339_rejects_garbage() {
        assert!(Timestamp::parse_rfc3339("yesterday").is_none());
        assert!(Timestamp::parse_rfc3339("").is_none());
    }

    #[test]
    fn to_rfc3339_is_parseable_again() {
        let ts = Timestamp::now();
        let text = ts.to_rfc3339();
        assert!(text.ends_with('Z'));
        assert!(Timestamp::parse_rfc3339(&text).is_some());
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let json = "\"2024-01-15T10:30:00Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();

        assert_eq!(ts.as_datetime().year(), 2024);
    }
}
