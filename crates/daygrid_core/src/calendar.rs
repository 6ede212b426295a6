//! Calendar model: the selection and availability state machine.
//!
//! # Responsibility
//! - Own the ordered month sequence spanning the configured range.
//! - Be the single mutator of day/week/month state; everything user- or
//!   host-driven enters through the operations here.
//! - Notify the installed listener strictly after each mutation completes.
//!
//! # Invariants
//! - Months are contiguous, first-of-month anchored, no gaps or overlaps,
//!   inclusive of both range bounds.
//! - Every selection entry references a day owned by exactly one month;
//!   membership is tracked by day identity, not by date.
//! - Re-entrant mutation from a notification callback is impossible: the
//!   listener is owned by the model and every operation takes `&mut self`.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use log::{debug, info};

use crate::config::{CalendarConfig, SelectionStyle};
use crate::dates;
use crate::model::day::{Day, DayId, DayState, Decoration, StateChange};
use crate::model::month::Month;

pub type CalendarResult<T> = Result<T, CalendarError>;

/// Construction error for the calendar model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The normalized end month precedes the normalized start month.
    EmptyRange { start: NaiveDate, end: NaiveDate },
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRange { start, end } => {
                write!(f, "calendar range is empty: end {end} precedes start {start}")
            }
        }
    }
}

impl Error for CalendarError {}

/// Which days users may select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayAvailability {
    /// Every in-month day is selectable.
    All,
    /// Only the listed dates are selectable.
    Restricted(Vec<NaiveDate>),
}

/// Date range the month sequence spans. Both bounds are normalized to their
/// first-of-month anchors and included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CalendarRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Default planning span around a reference date: one year back,
    /// twenty years forward.
    pub fn around(reference: NaiveDate) -> Self {
        Self {
            start: dates::add_months(reference, -12),
            end: dates::add_months(reference, 240),
        }
    }
}

/// Change notifications pushed to the embedding view layer.
///
/// Every method has a default no-op body; implementors override only what
/// they render. Callbacks always observe consistent post-mutation state.
pub trait CalendarEvents {
    /// The selection set was replaced or toggled; `selected` is the new
    /// ordered list of selected dates.
    fn selection_changed(&mut self, _selected: &[NaiveDate]) {}

    /// A day's display state was written (fired per state write, including
    /// rewrites of the same value).
    fn day_state_changed(&mut self, _id: DayId, _date: NaiveDate, _state: DayState) {}

    /// A day's decoration set was replaced.
    fn day_decorations_changed(&mut self, _id: DayId, _date: NaiveDate) {}
}

/// Identity back-reference into the month tree; the model never duplicates
/// day state here.
#[derive(Debug, Clone, Copy)]
struct SelectedDay {
    id: DayId,
    date: NaiveDate,
}

/// The date-grid model: month sequence, selection set, availability mode.
pub struct CalendarModel {
    config: CalendarConfig,
    months: Vec<Month>,
    selected: Vec<SelectedDay>,
    availability: DayAvailability,
    listener: Option<Box<dyn CalendarEvents + Send>>,
}

impl std::fmt::Debug for CalendarModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarModel")
            .field("config", &self.config)
            .field("months", &self.months)
            .field("selected", &self.selected)
            .field("availability", &self.availability)
            .field("listener", &self.listener.as_ref().map(|_| "<listener>"))
            .finish()
    }
}

impl CalendarModel {
    /// Builds the month sequence for `range`, optionally seeding one
    /// selected date.
    ///
    /// Both bounds are normalized to first-of-month anchors and both end
    /// months are generated (a Jan 1 to Mar 31 range yields exactly three
    /// months). A seed date outside the range is dropped.
    ///
    /// # Errors
    /// - [`CalendarError::EmptyRange`] when the normalized end precedes the
    ///   normalized start.
    pub fn new(
        config: CalendarConfig,
        range: CalendarRange,
        initial_selected: Option<NaiveDate>,
    ) -> CalendarResult<Self> {
        let start = dates::month_anchor(range.start);
        let end = dates::month_anchor(range.end);
        if end < start {
            return Err(CalendarError::EmptyRange { start, end });
        }

        let seed: Vec<NaiveDate> = initial_selected.into_iter().collect();
        let mut months = Vec::new();
        let mut anchor = start;
        while anchor <= end {
            let month_seed = seed
                .iter()
                .copied()
                .filter(|date| dates::same_month(*date, anchor))
                .collect();
            months.push(Month::new(anchor, config.first_weekday, month_seed));
            anchor = dates::add_months(anchor, 1);
        }

        let mut model = Self {
            config,
            months,
            selected: Vec::new(),
            availability: DayAvailability::All,
            listener: None,
        };
        let resolved: Vec<SelectedDay> = seed
            .iter()
            .filter_map(|date| model.resolve_day(*date))
            .collect();
        model.selected = resolved;

        info!(
            "event=calendar_generate module=calendar status=ok months={} start={} end={}",
            model.months.len(),
            start,
            end
        );
        Ok(model)
    }

    /// Installs the change listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: Box<dyn CalendarEvents + Send>) {
        self.listener = Some(listener);
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn month_containing(&self, date: NaiveDate) -> Option<&Month> {
        self.months.iter().find(|month| month.contains_date(date))
    }

    pub fn availability(&self) -> &DayAvailability {
        &self.availability
    }

    /// Ordered list of currently selected dates.
    pub fn selected_dates(&self) -> Vec<NaiveDate> {
        self.selected.iter().map(|entry| entry.date).collect()
    }

    /// Looks a day up by identity across all months.
    pub fn day(&self, id: DayId) -> Option<&Day> {
        self.months.iter().find_map(|month| month.find_day(id))
    }

    /// Replaces the whole selection with the single in-month day at `date`.
    ///
    /// Any previously selected day reverts to `Available` first. A date
    /// with no in-month day in range is a complete no-op.
    pub fn select_single_date(&mut self, date: NaiveDate) {
        let Some(target) = self.resolve_day(date) else {
            return;
        };
        let month_index = self
            .months
            .iter()
            .position(|month| month.contains_date(date));

        let mut changes: Vec<StateChange> = self
            .months
            .iter_mut()
            .flat_map(Month::deselect_all)
            .collect();
        if let Some(index) = month_index {
            changes.extend(self.months[index].set_day_selection_state(date, DayState::Selected));
        }
        self.selected = vec![target];

        debug!("event=calendar_select_single module=calendar status=ok date={date}");
        self.emit_day_changes(&changes);
        self.emit_selection_changed();
    }

    /// Marks every selectable day matching one of `dates` as selected and
    /// replaces the selection with the resolved set. Dates with no matching
    /// selectable day are silently dropped. The prior selection's day
    /// states are left as they were.
    pub fn select_dates(&mut self, dates: &[NaiveDate]) {
        let mut changes = Vec::new();
        for month in &mut self.months {
            changes.extend(month.mark_dates_selected(dates));
        }
        self.selected = changes
            .iter()
            .map(|change| SelectedDay {
                id: change.id,
                date: change.date,
            })
            .collect();

        debug!(
            "event=calendar_select_dates module=calendar status=ok requested={} resolved={}",
            dates.len(),
            self.selected.len()
        );
        self.emit_day_changes(&changes);
        self.emit_selection_changed();
    }

    /// Rewrites every in-month day's availability.
    ///
    /// `All` makes every day `Available`; `Restricted` marks everything
    /// `Unavailable` first, then resurrects the listed dates. Both paths
    /// overwrite `Selected` flags and leave the selection list untouched:
    /// availability is layered before selection, and callers re-apply
    /// selection afterwards when they want it to survive.
    pub fn set_availability(&mut self, availability: DayAvailability) {
        let mut changes = Vec::new();
        match &availability {
            DayAvailability::All => {
                for month in &mut self.months {
                    changes.extend(month.mark_all_days(DayState::Available));
                }
                info!("event=calendar_availability module=calendar status=ok mode=all");
            }
            DayAvailability::Restricted(available_dates) => {
                for month in &mut self.months {
                    changes.extend(month.mark_all_days(DayState::Unavailable));
                }
                for month in &mut self.months {
                    changes.extend(
                        month.mark_matching_days(available_dates, DayState::Available),
                    );
                }
                info!(
                    "event=calendar_availability module=calendar status=ok mode=restricted dates={}",
                    available_dates.len()
                );
            }
        }
        self.availability = availability;
        self.emit_day_changes(&changes);
    }

    /// Multi-select toggle entry point: applies the guarded selection state
    /// on the day's owning month, then flips the day's membership in the
    /// selection list by identity (present: removed, absent: appended).
    pub fn toggle_day_selection(&mut self, id: DayId, state: DayState) {
        let Some((date, month_index)) = self.locate_day(id) else {
            return;
        };

        let change = self.months[month_index].set_day_selection_state(date, state);
        if let Some(position) = self.selected.iter().position(|entry| entry.id == id) {
            self.selected.remove(position);
        } else {
            self.selected.push(SelectedDay { id, date });
        }

        self.emit_day_changes(change.as_slice());
        self.emit_selection_changed();
    }

    /// Tap dispatch for the embedding view layer, honoring the configured
    /// selection style. Out and unavailable days no-op.
    pub fn day_tapped(&mut self, id: DayId) {
        let Some(day) = self.day(id) else {
            return;
        };
        if matches!(day.state(), DayState::Out | DayState::Unavailable) {
            return;
        }
        match self.config.selection_style {
            SelectionStyle::Single => {
                if day.state() != DayState::Available {
                    return;
                }
                self.deselect_all();
                self.toggle_day_selection(id, DayState::Selected);
            }
            SelectionStyle::Multi => {
                let reverse = day.reverse_selection_state();
                self.toggle_day_selection(id, reverse);
            }
        }
    }

    /// Replaces decoration sets on the selectable days matching `entries`.
    pub fn set_decorations(&mut self, entries: &[(NaiveDate, Vec<Decoration>)]) {
        let mut decorated = Vec::new();
        for month in &mut self.months {
            for (date, decorations) in entries {
                if let Some(hit) = month.set_day_decorations(*date, decorations.clone()) {
                    decorated.push(hit);
                }
            }
        }
        if let Some(listener) = self.listener.as_deref_mut() {
            for (id, date) in decorated {
                listener.day_decorations_changed(id, date);
            }
        }
    }

    /// Clears the selection list and reverts every selected day to
    /// `Available` (unavailable days are not restored).
    pub fn deselect_all(&mut self) {
        self.selected.clear();
        let changes: Vec<StateChange> = self
            .months
            .iter_mut()
            .flat_map(Month::deselect_all)
            .collect();

        self.emit_day_changes(&changes);
        self.emit_selection_changed();
    }

    /// Resolves a date to the identity of its in-month day, if any.
    fn resolve_day(&self, date: NaiveDate) -> Option<SelectedDay> {
        self.month_containing(date)
            .and_then(|month| month.day_at(date))
            .map(|day| SelectedDay {
                id: day.id(),
                date: day.date(),
            })
    }

    /// Finds a day by identity, returning its date and owning month index.
    fn locate_day(&self, id: DayId) -> Option<(NaiveDate, usize)> {
        self.months.iter().enumerate().find_map(|(index, month)| {
            month.find_day(id).map(|day| (day.date(), index))
        })
    }

    fn emit_day_changes(&mut self, changes: &[StateChange]) {
        if let Some(listener) = self.listener.as_deref_mut() {
            for change in changes {
                listener.day_state_changed(change.id, change.date, change.state);
            }
        }
    }

    fn emit_selection_changed(&mut self) {
        let dates: Vec<NaiveDate> = self.selected.iter().map(|entry| entry.date).collect();
        if let Some(listener) = self.listener.as_deref_mut() {
            listener.selection_changed(&dates);
        }
    }
}
