use chrono::NaiveDate;
use daygrid_core::{CalendarConfig, CalendarError, CalendarModel, CalendarRange, DayState};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn model(range: CalendarRange, selected: Option<NaiveDate>) -> CalendarModel {
    CalendarModel::new(CalendarConfig::default(), range, selected).expect("valid range")
}

#[test]
fn quarter_range_produces_three_months_with_seeded_selection() {
    let model = model(
        CalendarRange::new(date(2024, 1, 1), date(2024, 3, 31)),
        Some(date(2024, 1, 15)),
    );

    assert_eq!(model.months().len(), 3);
    assert_eq!(model.months()[0].anchor(), date(2024, 1, 1));
    assert_eq!(model.months()[1].anchor(), date(2024, 2, 1));
    assert_eq!(model.months()[2].anchor(), date(2024, 3, 1));

    let seeded = model.months()[0]
        .day_at(date(2024, 1, 15))
        .expect("seeded day exists");
    assert_eq!(seeded.state(), DayState::Selected);
    assert_eq!(model.selected_dates(), vec![date(2024, 1, 15)]);
}

#[test]
fn bounds_are_normalized_and_the_end_month_is_included() {
    // Mid-month bounds inside the same month collapse to one month.
    let single = model(CalendarRange::new(date(2024, 5, 7), date(2024, 5, 23)), None);
    assert_eq!(single.months().len(), 1);
    assert_eq!(single.months()[0].anchor(), date(2024, 5, 1));

    // The end month is generated even when the end date is its first day.
    let pair = model(CalendarRange::new(date(2024, 5, 20), date(2024, 6, 1)), None);
    assert_eq!(pair.months().len(), 2);
    assert_eq!(pair.months()[1].anchor(), date(2024, 6, 1));
}

#[test]
fn months_are_contiguous_across_year_boundaries() {
    let model = model(CalendarRange::new(date(2023, 11, 3), date(2024, 2, 10)), None);
    let anchors: Vec<_> = model.months().iter().map(|m| m.anchor()).collect();
    assert_eq!(
        anchors,
        vec![
            date(2023, 11, 1),
            date(2023, 12, 1),
            date(2024, 1, 1),
            date(2024, 2, 1)
        ]
    );
}

#[test]
fn reversed_range_is_rejected() {
    let err = CalendarModel::new(
        CalendarConfig::default(),
        CalendarRange::new(date(2024, 3, 1), date(2024, 1, 31)),
        None,
    )
    .expect_err("reversed range must be rejected");
    assert_eq!(
        err,
        CalendarError::EmptyRange {
            start: date(2024, 3, 1),
            end: date(2024, 1, 1),
        }
    );
    assert!(err.to_string().contains("precedes"));
}

#[test]
fn default_planning_span_covers_one_year_back_twenty_forward() {
    let model = model(CalendarRange::around(date(2024, 6, 15)), None);
    // 12 months back + current + 240 forward.
    assert_eq!(model.months().len(), 253);
    assert_eq!(model.months()[0].anchor(), date(2023, 6, 1));
    assert_eq!(model.months().last().map(|m| m.anchor()), Some(date(2044, 6, 1)));
}

#[test]
fn seed_outside_the_range_is_dropped() {
    let model = model(
        CalendarRange::new(date(2024, 1, 1), date(2024, 3, 31)),
        Some(date(2025, 1, 15)),
    );
    assert!(model.selected_dates().is_empty());
}

#[test]
fn seeded_selection_references_the_owned_day() {
    let model = model(
        CalendarRange::new(date(2024, 1, 1), date(2024, 1, 31)),
        Some(date(2024, 1, 15)),
    );
    let owned = model.months()[0]
        .day_at(date(2024, 1, 15))
        .expect("day exists");
    // The selection entry must resolve back to the generated day.
    assert_eq!(model.day(owned.id()).map(|d| d.date()), Some(date(2024, 1, 15)));
}
