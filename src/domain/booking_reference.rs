use std::fmt;

use chrono::Utc;

use serde::Serialize;

const PREFIX: &str = "CYB-";

/// Human-readable correlation token for an accepted booking.
///
/// Built from the last six digits of the epoch-millisecond clock, so two bookings in the
/// same millisecond (or exactly 1000 seconds apart) share a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BookingReference(String);

impl BookingReference {
    pub fn generate() -> Self {
        Self::from_timestamp_millis(Utc::now().timestamp_millis())
    }

    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(format!("{}{:06}", PREFIX, millis.rem_euclid(1_000_000)))
    }
}

impl AsRef<str> for BookingReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
