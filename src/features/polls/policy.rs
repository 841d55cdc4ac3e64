//! Expiry rules: when a poll stops accepting votes.

use chrono::{Local, NaiveDate};

/// Server-local calendar date. Read once per request and passed down.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A poll is expired once its expiry date lies strictly in the past.
/// On the expiry day itself it still accepts votes.
pub fn is_expired(expiry: NaiveDate, today: NaiveDate) -> bool {
    expiry < today
}

/// Whole days remaining until `expiry`, clamped at zero
pub fn days_left(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_is_expired_boundaries() {
        let today = date(2025, 3, 10);
        assert!(is_expired(date(2025, 3, 9), today));
        assert!(!is_expired(today, today));
        assert!(!is_expired(date(2025, 3, 11), today));
    }

    #[test]
    fn test_is_expired_across_year() {
        assert!(is_expired(date(2024, 12, 31), date(2025, 1, 1)));
        assert!(!is_expired(date(2025, 1, 1), date(2024, 12, 31)));
    }

    #[test]
    fn test_days_left() {
        let today = date(2025, 3, 10);
        assert_eq!(days_left(today + Duration::days(3), today), 3);
        assert_eq!(days_left(today, today), 0);
        assert_eq!(days_left(today - Duration::days(5), today), 0);
    }
}
