//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Serializes as an RFC 3339 string, which is also how browser exports
/// encode `createdAt`/`updatedAt`.
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

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns whichever of `self` and `candidate` is later.
    ///
    /// Used to keep `updated_at` monotonic if the wall clock steps back.
    pub fn advanced_to(&self, candidate: Timestamp) -> Self {
        if candidate.is_before(self) {
            *self
        } else {
            candidate
        }
    }

    /// Short calendar date for list views, e.g. `2024-01-15`.
    pub fn date_label(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
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
    use std::thread::sleep;
    use std::time::Duration;

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(!ts.is_before(&Timestamp::from_datetime(before)));
        assert!(!Timestamp::from_datetime(after).is_before(&ts));
    }

    #[test]
    fn timestamp_is_before_works_correctly() {
        let ts1 = Timestamp::now();
        sleep(Duration::from_millis(10));
        let ts2 = Timestamp::now();

        assert!(ts1.is_before(&ts2));
        assert!(!ts2.is_before(&ts1));
    }

    #[test]
    fn advanced_to_never_moves_backwards() {
        let later = at("2024-01-15T10:30:00Z");
        let earlier = at("2024-01-14T10:30:00Z");

        assert_eq!(later.advanced_to(earlier), later);
        assert_eq!(earlier.advanced_to(later), later);
    }

    #[test]
    fn timestamp_deserializes_browser_iso_strings() {
        let json = "\"2024-01-15T10:30:00.123Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();

        assert_eq!(ts, at("2024-01-15T10:30:00.123Z"));
        assert_eq!(ts.date_label(), "2024-01-15");
    }

    #[test]
    fn timestamp_json_roundtrip_is_lossless() {
        let ts = Timestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
