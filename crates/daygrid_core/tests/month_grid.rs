use chrono::{Datelike, Days, NaiveDate, Weekday};
use daygrid_core::{CalendarConfig, CalendarModel, CalendarRange, DayState};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn model_with_first_weekday(first_weekday: Weekday, start: NaiveDate, end: NaiveDate) -> CalendarModel {
    let config = CalendarConfig {
        first_weekday,
        ..CalendarConfig::default()
    };
    CalendarModel::new(config, CalendarRange::new(start, end), None).expect("valid range")
}

fn days_in_month(anchor: NaiveDate) -> u32 {
    let next = if anchor.month() == 12 {
        date(anchor.year() + 1, 1, 1)
    } else {
        date(anchor.year(), anchor.month() + 1, 1)
    };
    next.signed_duration_since(anchor).num_days() as u32
}

#[test]
fn every_month_tiles_exactly_its_calendar_days() {
    let model = model_with_first_weekday(Weekday::Sun, date(2023, 1, 1), date(2024, 12, 31));
    for month in model.months() {
        let expected = days_in_month(month.anchor());
        assert_eq!(
            month.all_days().len() as u32,
            expected,
            "month {} must expose exactly its calendar days",
            month.anchor()
        );
        assert!(
            (4..=6).contains(&month.week_count()),
            "month {} has {} weeks",
            month.anchor(),
            month.week_count()
        );
    }
}

#[test]
fn concatenated_weeks_are_contiguous_ascending() {
    let model = model_with_first_weekday(Weekday::Mon, date(2024, 1, 1), date(2024, 6, 30));
    for month in model.months() {
        let mut expected: Option<NaiveDate> = None;
        for week in month.weeks() {
            assert_eq!(week.days().len(), 7);
            for day in week.days() {
                if let Some(want) = expected {
                    assert_eq!(day.date(), want, "gap or duplicate in {}", month.anchor());
                }
                expected = day.date().checked_add_days(Days::new(1));
            }
        }
    }
}

#[test]
fn week_rows_lead_with_the_configured_first_weekday() {
    for first_weekday in [Weekday::Sun, Weekday::Mon, Weekday::Sat] {
        let model = model_with_first_weekday(first_weekday, date(2024, 2, 1), date(2024, 2, 29));
        for week in model.months()[0].weeks() {
            assert_eq!(week.days()[0].date().weekday(), first_weekday);
        }
    }
}

#[test]
fn four_week_month_has_no_out_days() {
    // February 2026 starts on Sunday and has exactly 28 days.
    let model = model_with_first_weekday(Weekday::Sun, date(2026, 2, 1), date(2026, 2, 28));
    let month = &model.months()[0];
    assert_eq!(month.week_count(), 4);
    for week in month.weeks() {
        for day in week.days() {
            assert_ne!(day.state(), DayState::Out);
        }
    }
}

#[test]
fn six_week_month_marks_lead_and_trail_days_out() {
    // March 2024 (starts Friday, 31 days) spans six Sunday-first weeks.
    let model = model_with_first_weekday(Weekday::Sun, date(2024, 3, 1), date(2024, 3, 31));
    let month = &model.months()[0];
    assert_eq!(month.week_count(), 6);

    let first_week = &month.weeks()[0];
    assert_eq!(first_week.days()[0].date(), date(2024, 2, 25));
    assert_eq!(first_week.days()[0].state(), DayState::Out);
    assert_eq!(first_week.days()[5].date(), date(2024, 3, 1));
    assert_eq!(first_week.days()[5].state(), DayState::Available);

    let last_week = &month.weeks()[5];
    assert_eq!(last_week.days()[0].date(), date(2024, 3, 31));
    assert_eq!(last_week.days()[0].state(), DayState::Available);
    assert_eq!(last_week.days()[1].state(), DayState::Out);
}

#[test]
fn days_out_belong_to_adjacent_months_only() {
    let model = model_with_first_weekday(Weekday::Sun, date(2024, 4, 1), date(2024, 4, 30));
    let month = &model.months()[0];
    for week in month.weeks() {
        for day in week.days() {
            if day.state() == DayState::Out {
                assert_ne!(day.date().month(), 4);
            } else {
                assert_eq!(day.date().month(), 4);
            }
        }
    }
}

#[test]
fn is_current_compares_month_granularity() {
    let model = model_with_first_weekday(Weekday::Sun, date(2024, 1, 1), date(2024, 2, 29));
    assert!(model.months()[0].is_current(date(2024, 1, 31)));
    assert!(!model.months()[0].is_current(date(2024, 2, 1)));
}
