use chrono::NaiveDate;
use daygrid_core::{
    CalendarConfig, CalendarModel, CalendarRange, DayAvailability, DayState, SelectionStyle,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn model() -> CalendarModel {
    let config = CalendarConfig {
        selection_style: SelectionStyle::Multi,
        ..CalendarConfig::default()
    };
    CalendarModel::new(
        config,
        CalendarRange::new(date(2024, 1, 1), date(2024, 2, 29)),
        None,
    )
    .expect("valid range")
}

fn state_at(model: &CalendarModel, date: NaiveDate) -> DayState {
    model
        .month_containing(date)
        .and_then(|month| month.day_at(date))
        .map(|day| day.state())
        .expect("day exists in range")
}

fn available_dates(model: &CalendarModel) -> Vec<NaiveDate> {
    model
        .months()
        .iter()
        .flat_map(|month| month.all_days())
        .filter(|day| day.state() == DayState::Available)
        .map(|day| day.date())
        .collect()
}

#[test]
fn restricting_availability_leaves_exactly_the_listed_dates_available() {
    let mut model = model();
    let open = [date(2024, 1, 10), date(2024, 2, 5)];

    model.set_availability(DayAvailability::Restricted(open.to_vec()));

    assert_eq!(available_dates(&model), open.to_vec());
    assert_eq!(state_at(&model, date(2024, 1, 11)), DayState::Unavailable);
    assert_eq!(
        model.availability(),
        &DayAvailability::Restricted(open.to_vec())
    );
}

#[test]
fn restriction_overwrites_prior_selected_states() {
    let mut model = model();
    model.select_dates(&[date(2024, 1, 20)]);

    model.set_availability(DayAvailability::Restricted(vec![date(2024, 1, 10)]));

    // Availability is layered before selection; the old Selected flag is
    // gone and callers re-apply selection on top.
    assert_eq!(state_at(&model, date(2024, 1, 20)), DayState::Unavailable);
}

#[test]
fn all_availability_restores_every_in_month_day() {
    let mut model = model();
    model.set_availability(DayAvailability::Restricted(vec![date(2024, 1, 10)]));

    model.set_availability(DayAvailability::All);

    for month in model.months() {
        for day in month.all_days() {
            assert_eq!(day.state(), DayState::Available);
        }
    }
}

#[test]
fn selection_applied_after_availability_survives_on_top_of_it() {
    let mut model = model();
    model.set_availability(DayAvailability::Restricted(vec![
        date(2024, 1, 10),
        date(2024, 1, 11),
    ]));

    model.select_dates(&[date(2024, 1, 10)]);

    assert_eq!(state_at(&model, date(2024, 1, 10)), DayState::Selected);
    assert_eq!(state_at(&model, date(2024, 1, 11)), DayState::Available);
    assert_eq!(model.selected_dates(), vec![date(2024, 1, 10)]);
}

#[test]
fn unavailable_days_cannot_be_selected() {
    let mut model = model();
    model.set_availability(DayAvailability::Restricted(vec![date(2024, 1, 10)]));

    model.select_dates(&[date(2024, 1, 15)]);
    assert!(model.selected_dates().is_empty());
    assert_eq!(state_at(&model, date(2024, 1, 15)), DayState::Unavailable);

    // The guarded tap path refuses too.
    let id = model
        .month_containing(date(2024, 1, 15))
        .and_then(|month| month.day_at(date(2024, 1, 15)))
        .map(|day| day.id())
        .expect("day exists");
    model.day_tapped(id);
    assert_eq!(state_at(&model, date(2024, 1, 15)), DayState::Unavailable);
    assert!(model.selected_dates().is_empty());
}

#[test]
fn out_days_are_untouched_by_availability_changes() {
    let mut model = model();
    model.set_availability(DayAvailability::Restricted(vec![date(2024, 1, 10)]));

    for month in model.months() {
        for week in month.weeks() {
            for day in week.days() {
                if !day.in_month() {
                    assert_eq!(day.state(), DayState::Out);
                }
            }
        }
    }
}

#[test]
fn deselect_all_does_not_restore_unavailable_days() {
    let mut model = model();
    model.set_availability(DayAvailability::Restricted(vec![date(2024, 1, 10)]));
    model.select_dates(&[date(2024, 1, 10)]);

    model.deselect_all();

    assert_eq!(state_at(&model, date(2024, 1, 10)), DayState::Available);
    assert_eq!(state_at(&model, date(2024, 1, 15)), DayState::Unavailable);
}
