//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `daygrid_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use chrono::NaiveDate;
use daygrid_core::{
    CalendarConfig, CalendarModel, CalendarRange, DayState, SymbolStyle,
};

fn main() {
    println!("daygrid_core ping={}", daygrid_core::ping());
    println!("daygrid_core version={}", daygrid_core::core_version());

    // Fixed sample range so output stays byte-stable across runs.
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid sample date");
    let end = NaiveDate::from_ymd_opt(2024, 3, 31).expect("valid sample date");
    let selected = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid sample date");

    let config = CalendarConfig::default();
    let header = config
        .weekday_symbols(SymbolStyle::Short)
        .into_iter()
        .map(|symbol| format!("{symbol:>4}"))
        .collect::<String>();

    let model = CalendarModel::new(config, CalendarRange::new(start, end), Some(selected))
        .expect("sample range is valid");

    for month in model.months() {
        println!();
        println!("{} ({} weeks)", month.anchor().format("%B %Y"), month.week_count());
        println!("{header}");
        for week in month.weeks() {
            let row = week
                .days()
                .iter()
                .map(|day| match day.state() {
                    DayState::Out => "   .".to_string(),
                    DayState::Selected => format!("[{:>2}]", day.date().format("%-d")),
                    _ => format!("{:>4}", day.date().format("%-d")),
                })
                .collect::<String>();
            println!("{row}");
        }
    }
    println!();
    println!(
        "selected={}",
        model
            .selected_dates()
            .iter()
            .map(|date| date.to_string())
            .collect::<Vec<_>>()
            .join(",")
    );
}
