use crate::{Config, StorageLocation};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(data_dir: PathBuf, reference_date: Option<NaiveDate>) -> Config {
    Config {
        storage: StorageLocation::Override(data_dir),
        people: [
            "Frankie".to_string(),
            "Harrison".to_string(),
            "Madi".to_string(),
        ],
        recent_count: 5,
        date_format: "%a, %d %b %Y".to_string(),
        input_date_formats: ["%d/%m/%Y".to_string()].to_vec(),
        reference_date: reference_date.unwrap_or(Local::now().date_naive()),
    }
}
