//! Daily date sequence helpers.

use chrono::NaiveDate;

/// Generates every calendar day from `start` to `end`, both inclusive.
///
/// Returns an empty vector when `end < start`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use gapfill_series::daily_sequence;
///
/// let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// // 2024 is a leap year: Feb 28, Feb 29, Mar 1
/// assert_eq!(daily_sequence(start, end).len(), 3);
/// ```
pub fn daily_sequence(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }
    let n_days = days_between(start, end) as usize + 1;
    start.iter_days().take(n_days).collect()
}

/// Signed number of whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_day() {
        let d = ymd(2024, 6, 15);
        assert_eq!(daily_sequence(d, d), vec![d]);
    }

    #[test]
    fn reversed_bounds_are_empty() {
        assert!(daily_sequence(ymd(2024, 6, 15), ymd(2024, 6, 14)).is_empty());
    }

    #[test]
    fn year_transition() {
        let dates = daily_sequence(ymd(2023, 12, 30), ymd(2024, 1, 2));
        assert_eq!(
            dates,
            vec![
                ymd(2023, 12, 30),
                ymd(2023, 12, 31),
                ymd(2024, 1, 1),
                ymd(2024, 1, 2)
            ]
        );
    }

    #[test]
    fn non_leap_february() {
        let dates = daily_sequence(ymd(2023, 2, 27), ymd(2023, 3, 1));
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[2], ymd(2023, 3, 1));
    }

    #[test]
    fn days_between_signed() {
        assert_eq!(days_between(ymd(2024, 1, 1), ymd(2024, 12, 31)), 365);
        assert_eq!(days_between(ymd(2024, 1, 10), ymd(2024, 1, 1)), -9);
        assert_eq!(days_between(ymd(2024, 1, 1), ymd(2024, 1, 1)), 0);
    }
}
