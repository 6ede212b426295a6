//! Week domain model.
//!
//! # Responsibility
//! - Hold exactly one row of seven contiguous days.
//! - Scope selection and decoration mutation to the days it owns.
//!
//! # Invariants
//! - Exactly 7 days, ascending by date, starting at `anchor`.
//! - Week-granularity comparisons use the first weekday the week was
//!   generated with.

use chrono::{NaiveDate, Weekday};

use crate::dates;
use crate::model::day::{Day, DayId, DayState, Decoration, StateChange};

/// One grid row: seven sequential days anchored at the week start.
/// Owned exclusively by its month.
#[derive(Debug, Clone)]
pub struct Week {
    anchor: NaiveDate,
    first_weekday: Weekday,
    days: Vec<Day>,
}

impl Week {
    pub(crate) fn new(days: Vec<Day>, anchor: NaiveDate, first_weekday: Weekday) -> Self {
        debug_assert_eq!(days.len(), 7, "a week row holds exactly seven days");
        Self {
            anchor,
            first_weekday,
            days,
        }
    }

    /// Week-start date identifying this week.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Whether `date` falls inside this week (week-granularity equality).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        dates::same_week(self.anchor, date, self.first_weekday)
    }

    /// Returns this week's days matching any of `dates` by day granularity
    /// and currently selectable. Input order drives output order.
    pub fn days_matching(&self, dates: &[NaiveDate]) -> Vec<&Day> {
        dates
            .iter()
            .flat_map(|date| {
                self.days
                    .iter()
                    .filter(|day| day.matches_date(*date) && day.is_selectable())
            })
            .collect()
    }

    /// Applies the guarded selection toggle to the day matching `date`.
    /// Reports the state write when one happened.
    pub(crate) fn set_day_selection_state(
        &mut self,
        date: NaiveDate,
        state: DayState,
    ) -> Option<StateChange> {
        self.days
            .iter_mut()
            .find(|day| day.matches_date(date))
            .and_then(|day| day.set_selection_state(state))
    }

    /// Replaces decorations on the selectable day matching `date`.
    pub(crate) fn set_day_decorations(
        &mut self,
        date: NaiveDate,
        decorations: Vec<Decoration>,
    ) -> Option<(DayId, NaiveDate)> {
        let day = self
            .days
            .iter_mut()
            .find(|day| day.matches_date(date) && day.is_selectable())?;
        day.set_decorations(decorations);
        Some((day.id(), day.date()))
    }

    /// Guarded deselect across the row: selected days flip to `Available`,
    /// unavailable and out days are untouched.
    pub(crate) fn deselect_all(&mut self) -> Vec<StateChange> {
        self.days
            .iter_mut()
            .filter_map(|day| day.set_selection_state(DayState::Available))
            .collect()
    }

    pub(crate) fn days_mut(&mut self) -> &mut [Day] {
        &mut self.days
    }
}
