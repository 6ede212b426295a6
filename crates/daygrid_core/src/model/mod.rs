//! Date-grid domain model.
//!
//! # Responsibility
//! - Define the grid units (day, week, month) and their scoped mutations.
//! - Keep ownership strictly top-down: the calendar model owns months,
//!   months own weeks, weeks own days.
//!
//! # Invariants
//! - Every day belongs to exactly one week, every week to exactly one month.
//! - User-visible state transitions flow through the calendar model's entry
//!   points; the view layer reads, it never writes.

pub mod day;
pub mod month;
pub mod week;
