use crate::{
    Config,
    dates::{parse_date_token, parse_month_token},
    errors::ValidationError,
    store::{Field, RecordStore},
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use strum::IntoEnumIterator;

pub struct Tracker {
    pub config: Config,
    pub store: RecordStore,
}

impl Tracker {
    /// Creates a new `Tracker`, loading configuration from standard paths.
    pub fn new(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let config = Config::load(data_dir_override)?;
        Self::with_config(config)
    }

    /// Creates a new `Tracker` with a specific `Config`.
    ///
    /// This opens the record store, creating the table if needed.
    pub fn with_config(config: Config) -> Result<Self> {
        let store = RecordStore::open(config.storage.clone()).with_context(|| {
            format!("opening tracker table in {}", config.storage.dir().display())
        })?;
        Ok(Self { config, store })
    }

    pub fn parse_date(&self, token: &str) -> Option<NaiveDate> {
        parse_date_token(
            token,
            self.config.reference_date,
            &self.config.input_date_formats,
        )
    }

    pub fn parse_month(&self, token: &str) -> Option<(i32, u32)> {
        parse_month_token(token, self.config.reference_date)
    }

    /// Looks up a field by column name, alias or tracked person's name.
    pub fn field(&self, name: &str) -> Result<Field, ValidationError> {
        Field::lookup(name, &self.config.people)
    }

    /// Human label for a field, using the configured people's names.
    pub fn field_label(&self, field: Field) -> String {
        match field.person_index() {
            Some(i) => self.config.people[i].clone(),
            None => field.label().to_string(),
        }
    }

    /// Every field with its label, in column order.
    pub fn field_labels(&self) -> Vec<(Field, String)> {
        Field::iter()
            .map(|field| (field, self.field_label(field)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Entry, UpsertOutcome};
    use crate::tests::mk_config;
    use tempfile::tempdir;

    fn mk_tracker_with_default(reference_date: Option<NaiveDate>) -> (Tracker, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let config = mk_config(tmp.path().join("tracker"), reference_date);
        let tracker = Tracker::with_config(config).expect("tracker with config");
        (tracker, tmp)
    }

    #[test]
    fn with_config_creates_table() {
        let (tracker, tmp) = mk_tracker_with_default(None);
        assert!(tmp.path().join("tracker").join("tracker.csv").exists());
        assert_eq!(tracker.store.list_recent(5).unwrap(), Vec::<Entry>::new());
    }

    #[test]
    fn dates_use_reference_and_configured_formats() {
        let anchor = NaiveDate::from_ymd_opt(2025, 8, 15);
        let (tracker, _tmp) = mk_tracker_with_default(anchor);
        assert_eq!(tracker.parse_date("yesterday"), NaiveDate::from_ymd_opt(2025, 8, 14));
        assert_eq!(tracker.parse_date("02/08/2025"), NaiveDate::from_ymd_opt(2025, 8, 2));
        assert_eq!(tracker.parse_month("last month"), Some((2025, 7)));
    }

    #[test]
    fn person_fields_resolve_by_name_and_label() {
        let (tracker, _tmp) = mk_tracker_with_default(None);
        let field = tracker.field("harrison").unwrap();
        assert_eq!(field, Field::TimeWithPersonB);
        assert_eq!(tracker.field_label(field), "Harrison");
        assert_eq!(tracker.field_label(Field::VibeScore), "Vibe");
    }

    #[test]
    fn two_callers_share_one_store() {
        let (tracker, _tmp) = mk_tracker_with_default(None);
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        // per-field caller
        tracker.store.update_field(day, Field::MeditationMinutes, "10").unwrap();
        // whole-form caller, starting from what is stored
        let mut form = tracker.store.get(day).unwrap().unwrap();
        form.set_field(Field::VibeScore, "9").unwrap();
        let outcome = tracker.store.upsert(&form).unwrap();

        assert_eq!(
            outcome,
            UpsertOutcome::Updated {
                changed: vec![Field::VibeScore]
            }
        );
        let stored = tracker.store.get(day).unwrap().unwrap();
        assert_eq!(stored.meditation_minutes, 10);
        assert_eq!(stored.vibe_score.value(), 9);
    }
}
