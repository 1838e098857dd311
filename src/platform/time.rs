//! Wall clock access and instant (de)serialization
//!
//! Instants are stored as UTC ISO-8601 text with millisecond precision,
//! e.g. `2024-05-01T12:00:00.000Z`.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Source of "now"
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Real wall clock, truncated to the stored precision
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// Hand-driven clock for tests. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Move forward by whole seconds
    pub fn advance_secs(&self, secs: i64) {
        self.now.set(self.now.get() + chrono::Duration::seconds(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Format an instant for storage
pub fn format_instant(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored instant; any RFC 3339 offset is accepted
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_instant_millis_utc() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(format_instant(t), "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn test_parse_instant_offsets() {
        let t = parse_instant("2024-05-01T14:00:00.250+02:00").unwrap();
        assert_eq!(format_instant(t), "2024-05-01T12:00:00.250Z");
        assert_eq!(parse_instant("yesterday"), None);
        assert_eq!(parse_instant(""), None);
    }

    #[test]
    fn test_manual_clock_shared() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let other = clock.clone();
        clock.advance_secs(90);
        assert_eq!(other.now(), start + chrono::Duration::seconds(90));
    }

    #[test]
    fn test_system_clock_survives_storage() {
        let now = SystemClock.now();
        assert_eq!(parse_instant(&format_instant(now)), Some(now));
    }
}
