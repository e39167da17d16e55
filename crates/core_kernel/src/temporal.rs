//! Billing time handling
//!
//! The settlement engine never reads a wall clock. Time is an externally
//! supplied cursor that the embedding layer moves between batches of
//! operations, and premium schedules advance in whole calendar months.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Date overflow: {from} + {months} months is out of range")]
    Overflow {
        from: String,
        months: u32,
    },
}

/// Adds whole calendar months to a timestamp
///
/// The day of month is clamped to the last day of the target month, so
/// 31 January plus one month is 28 (or 29) February. The time of day is kept.
///
/// # Errors
///
/// Returns `TemporalError::Overflow` if the result is outside chrono's range
pub fn add_months(from: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>, TemporalError> {
    from.checked_add_months(Months::new(months))
        .ok_or_else(|| TemporalError::Overflow {
            from: from.to_rfc3339(),
            months,
        })
}

/// The "current time" of a simulated company
///
/// The cursor may be moved to any instant, including backwards; callers that
/// need monotonic time enforce it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeCursor {
    now: DateTime<Utc>,
}

impl TimeCursor {
    /// Creates a cursor positioned at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Returns the current position
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Moves the cursor to `now`
    pub fn set(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }
}

impl From<DateTime<Utc>> for TimeCursor {
    fn from(now: DateTime<Utc>) -> Self {
        Self::new(now)
    }
}
