//! Calendar date helpers.
//!
//! # Responsibility
//! - Provide the granularity operations the grid model is built on:
//!   month anchors, month/week equality, week starts, month arithmetic.
//! - Keep all chrono details behind one seam.
//!
//! # Invariants
//! - `week_start` respects the configured first weekday; two dates are in
//!   the same week iff their week starts are equal.
//! - All helpers are total for the supported planning range (chrono's
//!   representable years); arithmetic never silently wraps.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// Returns the first day of `date`'s month.
pub fn month_anchor(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("day 1 exists in every month")
}

/// Returns the last day of `date`'s month.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let next = add_months(month_anchor(date), 1);
    next.pred_opt().expect("previous day of a month anchor exists")
}

/// Month-granularity equality (same year and month).
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Returns the number of calendar days in `date`'s month (28-31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    last_of_month(date).day()
}

/// Returns the start of the week containing `date` for the given first
/// weekday.
pub fn week_start(date: NaiveDate, first_weekday: Weekday) -> NaiveDate {
    let back = (7 + date.weekday().num_days_from_monday()
        - first_weekday.num_days_from_monday())
        % 7;
    date.checked_sub_days(Days::new(u64::from(back)))
        .expect("week start stays in representable range")
}

/// Week-granularity equality under the given first weekday.
pub fn same_week(a: NaiveDate, b: NaiveDate, first_weekday: Weekday) -> bool {
    week_start(a, first_weekday) == week_start(b, first_weekday)
}

/// Adds (or subtracts) whole months, clamping the day-of-month the way
/// host calendars do (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
            .expect("month addition stays in representable range")
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
            .expect("month subtraction stays in representable range")
    }
}

/// Adds (or subtracts) whole days.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
            .expect("day addition stays in representable range")
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
            .expect("day subtraction stays in representable range")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        add_days, add_months, days_in_month, last_of_month, month_anchor, same_month, same_week,
        week_start,
    };
    use chrono::{NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn month_anchor_and_last_day() {
        assert_eq!(month_anchor(date(2024, 2, 17)), date(2024, 2, 1));
        assert_eq!(last_of_month(date(2024, 2, 17)), date(2024, 2, 29));
        assert_eq!(last_of_month(date(2023, 2, 1)), date(2023, 2, 28));
        assert_eq!(last_of_month(date(2024, 12, 31)), date(2024, 12, 31));
    }

    #[test]
    fn days_in_month_covers_leap_years() {
        assert_eq!(days_in_month(date(2024, 2, 1)), 29);
        assert_eq!(days_in_month(date(2023, 2, 1)), 28);
        assert_eq!(days_in_month(date(2024, 1, 15)), 31);
        assert_eq!(days_in_month(date(2024, 4, 30)), 30);
    }

    #[test]
    fn week_start_respects_first_weekday() {
        // 2024-01-15 is a Monday.
        assert_eq!(week_start(date(2024, 1, 15), Weekday::Mon), date(2024, 1, 15));
        assert_eq!(week_start(date(2024, 1, 15), Weekday::Sun), date(2024, 1, 14));
        assert_eq!(week_start(date(2024, 1, 14), Weekday::Mon), date(2024, 1, 8));
        assert_eq!(week_start(date(2024, 1, 20), Weekday::Sat), date(2024, 1, 20));
    }

    #[test]
    fn same_week_depends_on_first_weekday() {
        // Sunday the 14th and Monday the 15th share a Sunday-first week but
        // not a Monday-first week.
        assert!(same_week(date(2024, 1, 14), date(2024, 1, 15), Weekday::Sun));
        assert!(!same_week(date(2024, 1, 14), date(2024, 1, 15), Weekday::Mon));
    }

    #[test]
    fn add_months_clamps_day_of_month() {
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 3, 31), -1), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 11, 30), 2), date(2025, 1, 30));
    }

    #[test]
    fn add_days_crosses_month_boundaries() {
        assert_eq!(add_days(date(2024, 1, 31), 1), date(2024, 2, 1));
        assert_eq!(add_days(date(2024, 3, 1), -1), date(2024, 2, 29));
        assert_eq!(same_month(date(2024, 2, 1), date(2024, 2, 29)), true);
    }
}
