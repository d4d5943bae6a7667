use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use tracker_core::dates::days_in_month;

pub const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Splits a month into Monday-first weeks. Days outside the month are `None`.
pub fn month_weeks(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let mut weeks = Vec::new();
    let mut week = [None; 7];
    for day in days_in_month(year, month) {
        let slot = day.weekday().num_days_from_monday() as usize;
        week[slot] = Some(day);
        if slot == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

/// Markdown table of the month. Days with data are marked with `✓`, `today` is bold.
pub fn format_calendar(
    year: i32,
    month: u32,
    marked: &BTreeSet<NaiveDate>,
    today: NaiveDate,
) -> String {
    let mut md = String::from("|:-:|:-:|:-:|:-:|:-:|:-:|:-:|\n");
    md.push_str(&format!("|{}|\n|-\n", WEEKDAYS.join("|")));
    for week in month_weeks(year, month) {
        let cells: Vec<String> = week
            .iter()
            .map(|slot| match slot {
                None => " ".to_string(),
                Some(day) => {
                    let mut cell = day.day().to_string();
                    if marked.contains(day) {
                        cell = format!("`{cell}✓`");
                    }
                    if *day == today {
                        cell = format!("**{cell}**");
                    }
                    cell
                }
            })
            .collect();
        md.push_str(&format!("|{}|\n", cells.join("|")));
    }
    md.push_str("|-\n");
    md
}
