use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::{Result, anyhow};
use tracker_core::Tracker;

pub fn calendar_mode(cli: &Cli, renderer: &Renderer, tracker: &Tracker) -> Result<CliModeResult> {
    let Some(month_token) = &cli.calendar else {
        return Ok(CliModeResult::NothingToDo);
    };
    let token = month_token.as_deref().unwrap_or("this month");
    let (year, month) = tracker
        .parse_month(token)
        .ok_or_else(|| anyhow!("`{token}` is not a valid month (try `2025-01` or `last month`)"))?;

    let marked = tracker.store.dates_in_month(year, month)?;
    renderer.print_calendar(year, month, &marked, tracker.config.reference_date);
    Ok(CliModeResult::Finish)
}
