//! Core date-grid logic for daygrid.
//! This crate is the single source of truth for calendar invariants.

pub mod calendar;
pub mod config;
pub mod dates;
pub mod logging;
pub mod model;
pub mod viewport;

pub use calendar::{
    CalendarError, CalendarEvents, CalendarModel, CalendarRange, CalendarResult, DayAvailability,
};
pub use config::{CalendarConfig, SelectionStyle, SymbolStyle};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::day::{Day, DayId, DayState, Decoration, DotColor, MAX_BOTTOM_DOTS};
pub use model::month::Month;
pub use model::week::Week;
pub use viewport::{
    MonthMetrics, MonthTransition, ScrollAxis, Span, ViewMode, ViewportConfig, ViewportController,
    ViewportUpdate,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
