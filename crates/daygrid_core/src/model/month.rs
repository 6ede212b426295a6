//! Month domain model.
//!
//! # Responsibility
//! - Tile one calendar month into week rows, including lead/trail days from
//!   the adjacent months.
//! - Derive initial day states from the month-local selection seed.
//!
//! # Invariants
//! - Weeks fully tile the month: concatenated days are contiguous ascending
//!   with no gaps, and every in-month date appears exactly once.
//! - 4 to 6 weeks per month, 7 days per week.
//! - Reseeding the selection regenerates every week and day from scratch;
//!   day ids and availability flags do not survive the rebuild.

use chrono::{NaiveDate, Weekday};

use crate::dates;
use crate::model::day::{Day, DayId, DayState, Decoration, StateChange};
use crate::model::week::Week;

/// One calendar month's worth of week rows. Owned exclusively by the
/// calendar model.
#[derive(Debug, Clone)]
pub struct Month {
    anchor: NaiveDate,
    last_day: NaiveDate,
    first_weekday: Weekday,
    weeks: Vec<Week>,
    selected_dates: Vec<NaiveDate>,
}

impl Month {
    /// Builds the month anchored at `anchor` (a first-of-month date) and
    /// generates its weeks from the selection seed.
    pub(crate) fn new(anchor: NaiveDate, first_weekday: Weekday, seed: Vec<NaiveDate>) -> Self {
        let mut month = Self {
            anchor,
            last_day: dates::last_of_month(anchor),
            first_weekday,
            weeks: Vec::new(),
            selected_dates: seed,
        };
        month.generate_weeks();
        month
    }

    /// First-of-month anchor date.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Whether `date` falls in this month (month-granularity equality).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        dates::same_month(self.anchor, date)
    }

    /// Whether this is the month of `reference` (typically today).
    pub fn is_current(&self, reference: NaiveDate) -> bool {
        dates::same_month(self.anchor, reference)
    }

    /// All in-month days, ascending; lead/trail `Out` days are excluded.
    pub fn all_days(&self) -> Vec<&Day> {
        self.weeks
            .iter()
            .flat_map(|week| week.days().iter())
            .filter(|day| day.in_month())
            .collect()
    }

    /// The in-month day at `date`, if this month covers it.
    pub fn day_at(&self, date: NaiveDate) -> Option<&Day> {
        self.weeks
            .iter()
            .flat_map(|week| week.days().iter())
            .find(|day| day.in_month() && day.matches_date(date))
    }

    /// Looks a day up by identity, including lead/trail days.
    pub fn find_day(&self, id: DayId) -> Option<&Day> {
        self.weeks
            .iter()
            .flat_map(|week| week.days().iter())
            .find(|day| day.id() == id)
    }

    /// Selectable days matching any of `dates`, flattened across weeks.
    pub fn days_matching(&self, dates: &[NaiveDate]) -> Vec<&Day> {
        self.weeks
            .iter()
            .flat_map(|week| week.days_matching(dates))
            .collect()
    }

    /// Replaces the month-local selection seed and rebuilds every week.
    ///
    /// This is a full regeneration, not a field write: all days are
    /// recreated and any availability flags set since the last build are
    /// lost. Callers own that cost.
    pub fn set_selected_dates(&mut self, dates: Vec<NaiveDate>) {
        self.selected_dates = dates;
        self.generate_weeks();
    }

    /// Applies the guarded selection toggle to the day matching `date`,
    /// routed through the week containing it.
    pub(crate) fn set_day_selection_state(
        &mut self,
        date: NaiveDate,
        state: DayState,
    ) -> Option<StateChange> {
        self.weeks
            .iter_mut()
            .find(|week| week.contains_date(date))
            .and_then(|week| week.set_day_selection_state(date, state))
    }

    /// Replaces decorations on the selectable day matching `date`.
    pub(crate) fn set_day_decorations(
        &mut self,
        date: NaiveDate,
        decorations: Vec<Decoration>,
    ) -> Option<(DayId, NaiveDate)> {
        self.weeks
            .iter_mut()
            .find(|week| week.contains_date(date))
            .and_then(|week| week.set_day_decorations(date, decorations))
    }

    /// Guarded deselect across all weeks.
    pub(crate) fn deselect_all(&mut self) -> Vec<StateChange> {
        self.weeks
            .iter_mut()
            .flat_map(Week::deselect_all)
            .collect()
    }

    /// Unconditionally writes `state` on every in-month day.
    pub(crate) fn mark_all_days(&mut self, state: DayState) -> Vec<StateChange> {
        self.weeks
            .iter_mut()
            .flat_map(|week| week.days_mut().iter_mut())
            .filter(|day| day.in_month())
            .map(|day| day.set_state(state))
            .collect()
    }

    /// Unconditionally writes `state` on every in-month day matching one of
    /// `dates`. Matching here ignores selectability so an availability reset
    /// can resurrect days it just marked unavailable.
    pub(crate) fn mark_matching_days(
        &mut self,
        dates: &[NaiveDate],
        state: DayState,
    ) -> Vec<StateChange> {
        self.weeks
            .iter_mut()
            .flat_map(|week| week.days_mut().iter_mut())
            .filter(|day| day.in_month() && dates.iter().any(|date| day.matches_date(*date)))
            .map(|day| day.set_state(state))
            .collect()
    }

    /// Marks every selectable day matching one of `dates` as `Selected`
    /// through the unconditional path, reporting each write.
    pub(crate) fn mark_dates_selected(&mut self, dates: &[NaiveDate]) -> Vec<StateChange> {
        let mut changes = Vec::new();
        for week in &mut self.weeks {
            for date in dates {
                for day in week
                    .days_mut()
                    .iter_mut()
                    .filter(|day| day.matches_date(*date) && day.is_selectable())
                {
                    changes.push(day.set_state(DayState::Selected));
                }
            }
        }
        changes
    }

    /// Core tiling algorithm: walk week anchors forward from the week
    /// containing the 1st until the next anchor leaves the month.
    fn generate_weeks(&mut self) {
        let mut weeks = Vec::new();
        let mut anchor = dates::week_start(self.anchor, self.first_weekday);
        loop {
            let days = (0..7)
                .map(|offset| {
                    let date = dates::add_days(anchor, offset);
                    Day::new(date, self.state_for(date))
                })
                .collect();
            weeks.push(Week::new(days, anchor, self.first_weekday));
            anchor = dates::add_days(anchor, 7);
            if !dates::same_month(anchor, self.last_day) {
                break;
            }
        }
        self.weeks = weeks;
    }

    fn state_for(&self, date: NaiveDate) -> DayState {
        if !dates::same_month(date, self.last_day) {
            DayState::Out
        } else if self.selected_dates.contains(&date) {
            DayState::Selected
        } else {
            DayState::Available
        }
    }
}
