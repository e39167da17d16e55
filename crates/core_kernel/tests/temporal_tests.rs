//! Unit tests for the Temporal module
//!
//! Tests cover calendar-month arithmetic and the billing time cursor.

use chrono::{Duration, TimeZone, Utc};
use core_kernel::{add_months, TemporalError, TimeCursor};

mod add_months_tests {
    use super::*;

    #[test]
    fn test_each_cadence_length() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();

        assert_eq!(add_months(start, 1).unwrap(), Utc.with_ymd_and_hms(2024, 2, 15, 8, 0, 0).unwrap());
        assert_eq!(add_months(start, 3).unwrap(), Utc.with_ymd_and_hms(2024, 4, 15, 8, 0, 0).unwrap());
        assert_eq!(add_months(start, 6).unwrap(), Utc.with_ymd_and_hms(2024, 7, 15, 8, 0, 0).unwrap());
        assert_eq!(add_months(start, 12).unwrap(), Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_clamping_drifts_when_chained() {
        let jan_31 = Utc.with_ymd_and_hms(2023, 1, 31, 0, 0, 0).unwrap();
        let feb = add_months(jan_31, 1).unwrap();
        let mar = add_months(feb, 1).unwrap();

        assert_eq!(feb, Utc.with_ymd_and_hms(2023, 2, 28, 0, 0, 0).unwrap());
        assert_eq!(mar, Utc.with_ymd_and_hms(2023, 3, 28, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_zero_months_is_identity() {
        let start = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap();
        assert_eq!(add_months(start, 0).unwrap(), start);
    }

    #[test]
    fn test_overflow_is_reported() {
        let result = add_months(chrono::DateTime::<Utc>::MAX_UTC, 1);
        assert!(matches!(result, Err(TemporalError::Overflow { months: 1, .. })));
    }
}

mod time_cursor_tests {
    use super::*;

    #[test]
    fn test_set_moves_in_both_directions() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut cursor = TimeCursor::from(t0);

        cursor.set(t0 + Duration::days(40));
        assert_eq!(cursor.now(), t0 + Duration::days(40));

        cursor.set(t0 - Duration::days(1));
        assert_eq!(cursor.now(), t0 - Duration::days(1));
    }
}
