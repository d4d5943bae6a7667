use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use tracker_core::Tracker;

pub fn read_mode(cli: &Cli, renderer: &Renderer, tracker: &Tracker) -> Result<CliModeResult> {
    if let Some(token) = &cli.on {
        let date = tracker
            .parse_date(token)
            .ok_or_else(|| anyhow!("`{token}` is not a valid date"))?;
        print_day(renderer, tracker, date)?;
        return Ok(CliModeResult::Finish);
    }

    if let Some(count) = cli.recent {
        print_recent(renderer, tracker, count.unwrap_or(tracker.config.recent_count))?;
        return Ok(CliModeResult::Finish);
    }

    Ok(CliModeResult::NothingToDo)
}

/// What `tracker` shows with no arguments: today's entry, then recent activity.
pub fn overview_mode(renderer: &Renderer, tracker: &Tracker) -> Result<CliModeResult> {
    print_day(renderer, tracker, tracker.config.reference_date)?;
    renderer.print_md("\n## Recent Activity\n");
    print_recent(renderer, tracker, tracker.config.recent_count)?;
    Ok(CliModeResult::Finish)
}

fn print_day(renderer: &Renderer, tracker: &Tracker, date: NaiveDate) -> Result<()> {
    match tracker.store.get(date)? {
        Some(entry) => renderer.print_entry_card(&entry),
        None => renderer.print_info(&format!("No data entered for {date}.")),
    }
    Ok(())
}

fn print_recent(renderer: &Renderer, tracker: &Tracker, count: usize) -> Result<()> {
    let entries = tracker.store.list_recent(count)?;
    if entries.is_empty() {
        renderer.print_info("No recent activity data available.");
    } else {
        renderer.print_entries_table(&entries);
    }
    Ok(())
}
