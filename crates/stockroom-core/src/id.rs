//! # Identifier Generation
//!
//! Ids are the creation time in Unix milliseconds, rendered as a decimal
//! string. Two records created within the same millisecond must still get
//! distinct ids (an item and its `create` history entry are written
//! together), so the generator never hands out a value at or below the last
//! one it issued.

use chrono::{DateTime, Utc};

/// Issues strictly increasing timestamp-derived ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator::default()
    }

    /// Returns the next id for a record created at `now`.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis();
        let id = if millis > self.last {
            millis
        } else {
            self.last.saturating_add(1)
        };
        self.last = id;
        id.to_string()
    }

    /// Records an existing id so later ids sort after it.
    ///
    /// Ids that are not plain integers are ignored.
    pub fn observe(&mut self, id: &str) {
        if let Ok(value) = id.parse::<i64>() {
            self.last = self.last.max(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_is_millis() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(now), "1700000000123");
    }

    #[test]
    fn test_same_millisecond_does_not_collide() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut ids = IdGenerator::new();
        let a = ids.next_id(now);
        let b = ids.next_id(now);
        assert_eq!(a, "1700000000000");
        assert_eq!(b, "1700000000001");
    }

    #[test]
    fn test_largest_observed_id_does_not_overflow() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let mut ids = IdGenerator::new();
        ids.observe("9223372036854775807");
        assert_eq!(ids.next_id(now), "9223372036854775807");
    }

    #[test]
    fn test_observed_ids_push_next_forward() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let mut ids = IdGenerator::new();
        ids.observe("5000");
        ids.observe("not-a-number");
        assert_eq!(ids.next_id(now), "5001");
    }
}
