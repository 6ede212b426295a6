//! Day domain model.
//!
//! # Responsibility
//! - Define the smallest grid unit: a date, a display state, decorations.
//! - Enforce the selection toggle guard at the one place it matters.
//!
//! # Invariants
//! - `id` is a stable surrogate identity; two days never share one, and a
//!   regenerated month produces days with fresh ids.
//! - User-driven toggling only moves between `Available` and `Selected`;
//!   `Out` and `Unavailable` days ignore it.
//! - At most one decoration per decoration kind is retained.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a generated day.
///
/// Selection membership is tracked by identity, not by date, so the id must
/// survive state changes but not month regeneration.
pub type DayId = Uuid;

/// Display state of a day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    /// Lead/trail day belonging to an adjacent month.
    Out,
    /// Currently part of the selection.
    Selected,
    /// Selectable but not selected.
    Available,
    /// Not selectable.
    Unavailable,
}

/// Color of a single badge dot, toolkit-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Upper bound on dots kept per bottom badge.
pub const MAX_BOTTOM_DOTS: usize = 3;

/// A small visual marker attached to a day, independent of selection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    /// Row of colored dots under the day number.
    BottomDots(Vec<DotColor>),
}

/// Decoration kinds, used to deduplicate a decoration set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    BottomDots,
}

impl Decoration {
    /// Returns the kind used for set deduplication.
    pub fn kind(&self) -> DecorationKind {
        match self {
            Self::BottomDots(_) => DecorationKind::BottomDots,
        }
    }
}

/// A day-state write, reported upward so the model can notify its listener
/// after the mutation completes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StateChange {
    pub(crate) id: DayId,
    pub(crate) date: NaiveDate,
    pub(crate) state: DayState,
}

/// The smallest grid unit: one calendar date plus its display state and
/// decorations. Owned exclusively by its week; mutated only through the
/// calendar model's entry points.
#[derive(Debug, Clone, Serialize)]
pub struct Day {
    id: DayId,
    date: NaiveDate,
    state: DayState,
    decorations: Vec<Decoration>,
}

impl Day {
    pub(crate) fn new(date: NaiveDate, state: DayState) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            state,
            decorations: Vec::new(),
        }
    }

    pub fn id(&self) -> DayId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn state(&self) -> DayState {
        self.state
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Day-granularity equality against an external date.
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    /// Whether this day belongs to the rendered month.
    pub fn in_month(&self) -> bool {
        self.state != DayState::Out
    }

    pub fn is_selected(&self) -> bool {
        self.state == DayState::Selected
    }

    /// Whether user interaction may toggle this day.
    pub fn is_selectable(&self) -> bool {
        matches!(self.state, DayState::Selected | DayState::Available)
    }

    /// The state a user toggle would move this day to.
    pub fn reverse_selection_state(&self) -> DayState {
        match self.state {
            DayState::Available => DayState::Selected,
            _ => DayState::Available,
        }
    }

    /// Unconditional state overwrite. No validation; callers own correctness.
    /// Every call counts as a state write for notification purposes.
    pub(crate) fn set_state(&mut self, state: DayState) -> StateChange {
        self.state = state;
        StateChange {
            id: self.id,
            date: self.date,
            state,
        }
    }

    /// Guarded toggle: applies only when `state` is this day's reverse
    /// selection state and the day is selectable. Silent no-op otherwise.
    pub(crate) fn set_selection_state(&mut self, state: DayState) -> Option<StateChange> {
        if state != self.reverse_selection_state() || !self.is_selectable() {
            return None;
        }
        Some(self.set_state(state))
    }

    /// Replaces the decoration set, keeping the last entry per kind and
    /// capping bottom-dot rows at [`MAX_BOTTOM_DOTS`].
    pub(crate) fn set_decorations(&mut self, decorations: Vec<Decoration>) {
        let mut kept: Vec<Decoration> = Vec::new();
        for decoration in decorations {
            kept.retain(|existing| existing.kind() != decoration.kind());
            kept.push(match decoration {
                Decoration::BottomDots(mut colors) => {
                    colors.truncate(MAX_BOTTOM_DOTS);
                    Decoration::BottomDots(colors)
                }
            });
        }
        self.decorations = kept;
    }
}

#[cfg(test)]
mod tests {
    use super::{Day, DayState, Decoration, DotColor, MAX_BOTTOM_DOTS};
    use chrono::NaiveDate;

    fn day(state: DayState) -> Day {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid test date");
        Day::new(date, state)
    }

    #[test]
    fn toggle_moves_between_available_and_selected() {
        let mut d = day(DayState::Available);
        assert!(d.set_selection_state(DayState::Selected).is_some());
        assert_eq!(d.state(), DayState::Selected);
        assert!(d.set_selection_state(DayState::Available).is_some());
        assert_eq!(d.state(), DayState::Available);
    }

    #[test]
    fn toggle_requires_the_reverse_state() {
        let mut d = day(DayState::Available);
        // Available -> Available is not a reverse transition.
        assert!(d.set_selection_state(DayState::Available).is_none());
        assert_eq!(d.state(), DayState::Available);
    }

    #[test]
    fn out_and_unavailable_never_toggle() {
        for state in [DayState::Out, DayState::Unavailable] {
            let mut d = day(state);
            assert!(d.set_selection_state(DayState::Available).is_none());
            assert!(d.set_selection_state(DayState::Selected).is_none());
            assert_eq!(d.state(), state);
        }
    }

    #[test]
    fn set_state_is_unconditional() {
        let mut d = day(DayState::Unavailable);
        let change = d.set_state(DayState::Available);
        assert_eq!(d.state(), DayState::Available);
        assert_eq!(change.id, d.id());
        assert_eq!(change.state, DayState::Available);
    }

    #[test]
    fn decorations_deduplicate_by_kind_keeping_the_last() {
        let mut d = day(DayState::Available);
        let red = DotColor { r: 255, g: 0, b: 0 };
        let blue = DotColor { r: 0, g: 0, b: 255 };
        d.set_decorations(vec![
            Decoration::BottomDots(vec![red]),
            Decoration::BottomDots(vec![blue, blue]),
        ]);
        assert_eq!(d.decorations(), &[Decoration::BottomDots(vec![blue, blue])]);
    }

    #[test]
    fn bottom_dots_are_capped() {
        let mut d = day(DayState::Available);
        let dot = DotColor { r: 1, g: 2, b: 3 };
        d.set_decorations(vec![Decoration::BottomDots(vec![dot; 5])]);
        match &d.decorations()[0] {
            Decoration::BottomDots(colors) => assert_eq!(colors.len(), MAX_BOTTOM_DOTS),
        }
    }
}
