//! FFI use-case API for host-UI-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level calendar functions to the embedding UI
//!   via FRB.
//! - Keep one process-global calendar session behind a lock.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Dates cross the boundary as `YYYY-MM-DD` strings, day ids as UUID
//!   strings; invalid input produces a failure envelope, never an abort.

use std::sync::{Mutex, MutexGuard, OnceLock};

use chrono::{NaiveDate, Weekday};
use log::info;
use daygrid_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CalendarConfig, CalendarModel, CalendarRange, DayAvailability, DayState, Decoration, DotColor,
    SelectionStyle,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

static SESSION: OnceLock<Mutex<Option<CalendarModel>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for the same `level + log_dir`; reconfiguration attempts
///   return an error message.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for calendar command flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Month overview row for the host's scroll container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    /// First-of-month anchor date.
    pub anchor: String,
    /// Number of week rows (4-6).
    pub week_count: u32,
    /// Number of in-month days (28-31).
    pub day_count: u32,
}

/// Day cell snapshot for rendering one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    /// Stable day identity, used for tap dispatch.
    pub day_id: String,
    pub date: String,
    /// One of `out|selected|available|unavailable`.
    pub state: String,
    /// Whether the day belongs to the rendered month.
    pub in_month: bool,
    /// Number of badge dots attached to the day.
    pub dot_count: u32,
}

/// Decoration request for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationEntry {
    pub date: String,
    /// Dot colors as `#rrggbb` strings, at most three retained.
    pub colors: Vec<String>,
}

/// Opens (or replaces) the process-global calendar session.
///
/// # FFI contract
/// - `start`/`end`/`selected` use `YYYY-MM-DD`; `selected` may be empty.
/// - `first_weekday` accepts English weekday names or their three-letter
///   prefixes; empty means Sunday.
/// - Never panics; a reversed range or unparsable input fails the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_open(
    start: String,
    end: String,
    selected: String,
    first_weekday: String,
    multi_select: bool,
) -> ActionResponse {
    let start = match parse_date(&start) {
        Ok(date) => date,
        Err(err) => return ActionResponse::failure(format!("calendar_open failed: {err}")),
    };
    let end = match parse_date(&end) {
        Ok(date) => date,
        Err(err) => return ActionResponse::failure(format!("calendar_open failed: {err}")),
    };
    let selected = if selected.trim().is_empty() {
        None
    } else {
        match parse_date(&selected) {
            Ok(date) => Some(date),
            Err(err) => return ActionResponse::failure(format!("calendar_open failed: {err}")),
        }
    };
    let first_weekday = match parse_weekday(&first_weekday) {
        Ok(weekday) => weekday,
        Err(err) => return ActionResponse::failure(format!("calendar_open failed: {err}")),
    };

    let config = CalendarConfig {
        first_weekday,
        selection_style: if multi_select {
            SelectionStyle::Multi
        } else {
            SelectionStyle::Single
        },
        ..CalendarConfig::default()
    };
    match CalendarModel::new(config, CalendarRange::new(start, end), selected) {
        Ok(model) => {
            let months = model.months().len();
            *session_lock() = Some(model);
            info!("event=session_open module=ffi status=ok months={months}");
            ActionResponse::success(format!("Calendar opened with {months} month(s)."))
        }
        Err(err) => ActionResponse::failure(format!("calendar_open failed: {err}")),
    }
}

/// Closes the process-global calendar session, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_close() -> ActionResponse {
    let mut session = session_lock();
    if session.take().is_some() {
        info!("event=session_close module=ffi status=ok");
        ActionResponse::success("Calendar closed.")
    } else {
        ActionResponse::success("No calendar was open.")
    }
}

/// Replaces the selection with the given dates (multi-select flow).
///
/// Mirrors the embedding wrapper contract: the previous selection is
/// cleared first, then every in-range selectable date is selected.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_select_dates(dates: Vec<String>) -> ActionResponse {
    let parsed = match parse_dates(&dates) {
        Ok(parsed) => parsed,
        Err(err) => return ActionResponse::failure(format!("calendar_select_dates failed: {err}")),
    };
    with_open_session("calendar_select_dates", |model| {
        model.deselect_all();
        model.select_dates(&parsed);
        ActionResponse::success(format!(
            "Selected {} of {} date(s).",
            model.selected_dates().len(),
            parsed.len()
        ))
    })
}

/// Sets day availability: everything, or only the listed dates.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_set_availability(all: bool, dates: Vec<String>) -> ActionResponse {
    let availability = if all {
        DayAvailability::All
    } else {
        match parse_dates(&dates) {
            Ok(parsed) => DayAvailability::Restricted(parsed),
            Err(err) => {
                return ActionResponse::failure(format!("calendar_set_availability failed: {err}"))
            }
        }
    };
    with_open_session("calendar_set_availability", |model| {
        model.set_availability(availability);
        ActionResponse::success("Availability updated.")
    })
}

/// Replaces dot-badge decorations on the given dates.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_set_decorations(entries: Vec<DecorationEntry>) -> ActionResponse {
    let mut parsed = Vec::with_capacity(entries.len());
    for entry in &entries {
        let date = match parse_date(&entry.date) {
            Ok(date) => date,
            Err(err) => {
                return ActionResponse::failure(format!("calendar_set_decorations failed: {err}"))
            }
        };
        let mut colors = Vec::with_capacity(entry.colors.len());
        for color in &entry.colors {
            match parse_hex_color(color) {
                Ok(color) => colors.push(color),
                Err(err) => {
                    return ActionResponse::failure(format!(
                        "calendar_set_decorations failed: {err}"
                    ))
                }
            }
        }
        parsed.push((date, vec![Decoration::BottomDots(colors)]));
    }
    with_open_session("calendar_set_decorations", |model| {
        model.set_decorations(&parsed);
        ActionResponse::success(format!("Decorated {} date(s).", parsed.len()))
    })
}

/// Clears the whole selection.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_deselect_all() -> ActionResponse {
    with_open_session("calendar_deselect_all", |model| {
        model.deselect_all();
        ActionResponse::success("Selection cleared.")
    })
}

/// Routes a day tap into the selection state machine.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_tap_day(day_id: String) -> ActionResponse {
    let id = match day_id.trim().parse::<uuid::Uuid>() {
        Ok(id) => id,
        Err(err) => {
            return ActionResponse::failure(format!("calendar_tap_day failed: invalid id: {err}"))
        }
    };
    with_open_session("calendar_tap_day", |model| {
        model.day_tapped(id);
        ActionResponse::success(format!(
            "Tap handled; {} day(s) selected.",
            model.selected_dates().len()
        ))
    })
}

/// Month overview for the host's scroll geometry.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_months() -> Vec<MonthSummary> {
    let session = session_lock();
    let Some(model) = session.as_ref() else {
        return Vec::new();
    };
    model
        .months()
        .iter()
        .map(|month| MonthSummary {
            anchor: month.anchor().format(DATE_FORMAT).to_string(),
            week_count: month.week_count() as u32,
            day_count: month.all_days().len() as u32,
        })
        .collect()
}

/// Day cell snapshots for one month, lead/trail days included.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_days(month_anchor: String) -> Vec<DaySummary> {
    let Ok(anchor) = parse_date(&month_anchor) else {
        return Vec::new();
    };
    let session = session_lock();
    let Some(model) = session.as_ref() else {
        return Vec::new();
    };
    let Some(month) = model.month_containing(anchor) else {
        return Vec::new();
    };
    month
        .weeks()
        .iter()
        .flat_map(|week| week.days().iter())
        .map(|day| DaySummary {
            day_id: day.id().to_string(),
            date: day.date().format(DATE_FORMAT).to_string(),
            state: day_state_label(day.state()).to_string(),
            in_month: day.in_month(),
            dot_count: day
                .decorations()
                .iter()
                .map(|decoration| match decoration {
                    Decoration::BottomDots(colors) => colors.len() as u32,
                })
                .sum(),
        })
        .collect()
}

/// Currently selected dates in selection order.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_selected_dates() -> Vec<String> {
    let session = session_lock();
    let Some(model) = session.as_ref() else {
        return Vec::new();
    };
    model
        .selected_dates()
        .iter()
        .map(|date| date.format(DATE_FORMAT).to_string())
        .collect()
}

fn session_lock() -> MutexGuard<'static, Option<CalendarModel>> {
    SESSION
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn with_open_session(
    operation: &str,
    f: impl FnOnce(&mut CalendarModel) -> ActionResponse,
) -> ActionResponse {
    let mut session = session_lock();
    match session.as_mut() {
        Some(model) => f(model),
        None => ActionResponse::failure(format!("{operation} failed: no calendar is open")),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|err| format!("invalid date `{}`: {err}", value.trim()))
}

fn parse_dates(values: &[String]) -> Result<Vec<NaiveDate>, String> {
    values.iter().map(|value| parse_date(value)).collect()
}

fn parse_weekday(value: &str) -> Result<Weekday, String> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "" => Ok(Weekday::Sun),
        "sun" | "sunday" => Ok(Weekday::Sun),
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        other => Err(format!("invalid first weekday `{other}`")),
    }
}

fn parse_hex_color(value: &str) -> Result<DotColor, String> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid color `{trimmed}`; expected #rrggbb"));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).expect("validated hex digits")
    };
    Ok(DotColor {
        r: channel(0..2),
        g: channel(2..4),
        b: channel(4..6),
    })
}

fn day_state_label(state: DayState) -> &'static str {
    match state {
        DayState::Out => "out",
        DayState::Selected => "selected",
        DayState::Available => "available",
        DayState::Unavailable => "unavailable",
    }
}
