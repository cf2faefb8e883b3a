use crate::foundation::Timestamp;
use chrono::Utc;

/// Current wall-clock time, truncated to microseconds so in-memory rows match
/// what PostgreSQL `timestamptz` round-trips.
pub fn now() -> Timestamp {
    let now = Utc::now();
    chrono::DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}
