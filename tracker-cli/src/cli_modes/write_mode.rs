use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use tracker_core::{Entry, Field, StoreError, Tracker, ValidationError};

pub fn write_mode(cli: &Cli, renderer: &Renderer, tracker: &Tracker) -> Result<CliModeResult> {
    if cli.assignments.is_empty() {
        return Ok(CliModeResult::NothingToDo);
    }

    let date = match &cli.date {
        Some(token) => tracker
            .parse_date(token)
            .ok_or_else(|| anyhow!("`{token}` is not a valid date"))?,
        None => tracker.config.reference_date,
    };

    if cli.per_field {
        save_per_field(&cli.assignments, renderer, tracker, date)?;
    } else {
        save_whole_form(&cli.assignments, renderer, tracker, date)?;
    }
    Ok(CliModeResult::Finish)
}

/// Applies every assignment to the stored entry (or a fresh one) and saves once.
/// A single invalid value blocks the whole save.
fn save_whole_form(
    assignments: &[String],
    renderer: &Renderer,
    tracker: &Tracker,
    date: NaiveDate,
) -> Result<()> {
    let entry = tracker
        .store
        .get(date)?
        .unwrap_or_else(|| Entry::new(date));

    let entry = match apply_assignments(tracker, entry, assignments) {
        Ok(entry) => entry,
        Err(errors) => {
            for error in &errors {
                renderer.print_error(&error.to_string());
            }
            bail!("nothing saved, {} invalid value(s)", errors.len());
        }
    };

    let outcome = tracker.store.upsert(&entry)?;
    renderer.print_outcome(date, &outcome);
    renderer.print_entry_card(&entry);
    Ok(())
}

/// Saves each assignment on its own. Invalid values are reported and skipped.
fn save_per_field(
    assignments: &[String],
    renderer: &Renderer,
    tracker: &Tracker,
    date: NaiveDate,
) -> Result<()> {
    let mut failures = 0;
    for raw in assignments {
        let saved = resolve_assignment(tracker, raw)
            .map_err(StoreError::from)
            .and_then(|(field, value)| {
                tracker
                    .store
                    .update_field(date, field, value)
                    .map(|outcome| (field, outcome))
            });
        match saved {
            Ok((field, outcome)) => renderer.print_field_outcome(field, &outcome),
            Err(StoreError::Validation(e)) => {
                renderer.print_error(&e.to_string());
                failures += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(entry) = tracker.store.get(date)? {
        renderer.print_entry_card(&entry);
    }
    if failures > 0 {
        bail!("{failures} field(s) not saved");
    }
    Ok(())
}

/// Applies every assignment to `entry`, collecting all validation errors instead of
/// stopping at the first one.
fn apply_assignments(
    tracker: &Tracker,
    mut entry: Entry,
    assignments: &[String],
) -> Result<Entry, Vec<ValidationError>> {
    let errors: Vec<ValidationError> = assignments
        .iter()
        .filter_map(|raw| {
            resolve_assignment(tracker, raw)
                .and_then(|(field, value)| entry.set_field(field, value))
                .err()
        })
        .collect();

    if errors.is_empty() { Ok(entry) } else { Err(errors) }
}

fn resolve_assignment<'a>(
    tracker: &Tracker,
    raw: &'a str,
) -> Result<(Field, &'a str), ValidationError> {
    let (name, value) = split_assignment(raw)?;
    Ok((tracker.field(name)?, value))
}

/// `vibe=7` -> (`vibe`, `7`)
fn split_assignment(raw: &str) -> Result<(&str, &str), ValidationError> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| ValidationError::UnknownField(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;
    use std::fs;
    use tempfile::{TempDir, tempdir};
    use tracker_core::{Config, StorageLocation};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mk_tracker() -> (Tracker, TempDir) {
        let tmp = tempdir().unwrap();
        let config = Config {
            storage: StorageLocation::Override(tmp.path().join("data")),
            people: [
                "Frankie".to_string(),
                "Harrison".to_string(),
                "Madi".to_string(),
            ],
            recent_count: 5,
            date_format: "%Y-%m-%d".to_string(),
            input_date_formats: Vec::new(),
            reference_date: date(2024, 3, 10),
        };
        let tracker = Tracker::with_config(config).unwrap();
        (tracker, tmp)
    }

    fn mk_renderer(tracker: &Tracker) -> Renderer {
        Renderer::new(RenderOptions {
            date_format: tracker.config.date_format.clone(),
            use_color: false,
            labels: tracker.field_labels(),
        })
    }

    fn assignments(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn apply_assignments_collects_every_error() {
        let (tracker, _tmp) = mk_tracker();
        let entry = Entry::new(date(2024, 3, 10));

        let errors = apply_assignments(
            &tracker,
            entry.clone(),
            &assignments(&["meditation=10", "vibe=11", "diet=great"]),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 2);

        let updated =
            apply_assignments(&tracker, entry, &assignments(&["meditation=10", "vibe=7"])).unwrap();
        assert_eq!(updated.meditation_minutes, 10);
        assert_eq!(updated.vibe_score.value(), 7);
    }

    #[test]
    fn whole_form_with_one_invalid_value_saves_nothing() {
        let (tracker, _tmp) = mk_tracker();
        let renderer = mk_renderer(&tracker);
        let day = date(2024, 3, 10);
        let before = fs::read(tracker.store.path()).unwrap();

        let result = save_whole_form(
            &assignments(&["meditation=10", "vibe=11"]),
            &renderer,
            &tracker,
            day,
        );

        assert!(result.is_err());
        assert_eq!(fs::read(tracker.store.path()).unwrap(), before);
        assert_eq!(tracker.store.get(day).unwrap(), None);
    }

    #[test]
    fn per_field_saves_the_valid_values() {
        let (tracker, _tmp) = mk_tracker();
        let renderer = mk_renderer(&tracker);
        let day = date(2024, 3, 10);

        let result = save_per_field(
            &assignments(&["meditation=10", "vibe=11"]),
            &renderer,
            &tracker,
            day,
        );

        assert!(result.is_err());
        let saved = tracker.store.get(day).unwrap().expect("meditation was saved");
        assert_eq!(saved.meditation_minutes, 10);
        assert_eq!(saved.vibe_score, Entry::new(day).vibe_score);
    }

    #[test]
    fn split_assignment_trims_both_sides() {
        assert_eq!(split_assignment(" vibe = 7 "), Ok(("vibe", "7")));
        assert_eq!(split_assignment("diet=good"), Ok(("diet", "good")));
    }

    #[test]
    fn split_assignment_keeps_empty_values_for_validation() {
        assert_eq!(split_assignment("screen="), Ok(("screen", "")));
    }

    #[test]
    fn split_assignment_rejects_missing_name_or_equals() {
        assert!(split_assignment("=7").is_err());
        assert!(split_assignment("vibe").is_err());
    }
}
