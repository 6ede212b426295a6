//! Calendar configuration.
//!
//! # Responsibility
//! - Carry the host-facing knobs (first weekday, selection style, weekday
//!   symbol tables) as one explicit value injected at construction time.
//!
//! # Invariants
//! - Symbol tables are indexed Sunday..Saturday and rotated on read, so the
//!   configured first weekday always leads the returned list.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// How user taps translate into selection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStyle {
    /// A tap replaces the whole selection with the tapped day.
    Single,
    /// A tap toggles the tapped day in and out of the selection.
    Multi,
}

/// Length variant for weekday header symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolStyle {
    /// Abbreviated names ("Sun", "Mon", ...).
    Short,
    /// Single-letter names ("S", "M", ...).
    VeryShort,
}

const DEFAULT_SHORT_SYMBOLS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const DEFAULT_VERY_SHORT_SYMBOLS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Host-injected calendar configuration.
///
/// Passed down at construction; no component reaches back up to query it.
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    /// Weekday that leads every generated week row.
    pub first_weekday: Weekday,
    /// Tap dispatch contract for [`crate::calendar::CalendarModel::day_tapped`].
    pub selection_style: SelectionStyle,
    /// Localized abbreviated weekday names, Sunday first.
    pub short_weekday_symbols: [String; 7],
    /// Localized single-letter weekday names, Sunday first.
    pub very_short_weekday_symbols: [String; 7],
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Sun,
            selection_style: SelectionStyle::Single,
            short_weekday_symbols: DEFAULT_SHORT_SYMBOLS.map(str::to_string),
            very_short_weekday_symbols: DEFAULT_VERY_SHORT_SYMBOLS.map(str::to_string),
        }
    }
}

impl CalendarConfig {
    /// Returns the weekday symbols rotated so the configured first weekday
    /// leads the list.
    pub fn weekday_symbols(&self, style: SymbolStyle) -> Vec<String> {
        let table = match style {
            SymbolStyle::Short => &self.short_weekday_symbols,
            SymbolStyle::VeryShort => &self.very_short_weekday_symbols,
        };
        let lead = self.first_weekday.num_days_from_sunday() as usize;
        table[lead..]
            .iter()
            .chain(table[..lead].iter())
            .cloned()
            .collect()
    }
}
