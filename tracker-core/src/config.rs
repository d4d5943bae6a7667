use crate::store::StorageLocation;
use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `tracker.csv`.
    pub storage: StorageLocation,
    /// Display names of the three people whose time is tracked.
    pub people: [String; 3],
    /// How many entries the recent-history view shows.
    pub recent_count: usize,
    /// chrono format used when printing dates.
    pub date_format: String,
    /// Extra formats accepted for date input on top of `YYYY-MM-DD`.
    pub input_date_formats: Vec<String>,
    /// The date to use as "today" for relative keywords.
    pub reference_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    /// people = ["Frankie", "Harrison", "Madi"]
    people: Option<Vec<String>>,
    recent_count: Option<usize>,
    date_format: Option<String>,
    input_date_formats: Option<Vec<String>>,
}

impl Config {
    /// Load config from disk (first XDG path, then native) and apply defaults.
    ///
    /// `data_dir_override` (from `--data-dir` / `TRACKER_DATA_DIR`) takes precedence
    /// over the file's `data_dir`.
    pub fn load(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Self::from_file_config(file_config, data_dir_override)
    }

    fn from_file_config(file_config: FileConfig, data_dir_override: Option<PathBuf>) -> Result<Self> {
        let storage = StorageLocation::resolve([data_dir_override, file_config.data_dir]);

        let people = match file_config.people {
            Some(names) => Self::parse_people(names)?,
            None => Self::default_people(),
        };

        let recent_count = file_config.recent_count.unwrap_or(5);
        if recent_count == 0 {
            bail!("recent_count must be at least 1");
        }

        Ok(Self {
            storage,
            people,
            recent_count,
            date_format: file_config
                .date_format
                .unwrap_or_else(|| "%a, %d %b %Y".to_string()),
            input_date_formats: file_config
                .input_date_formats
                .unwrap_or_else(|| vec!["%d/%m/%Y".to_string()]),
            reference_date: Local::now().date_naive(),
        })
    }

    fn default_people() -> [String; 3] {
        [
            "Person A".to_string(),
            "Person B".to_string(),
            "Person C".to_string(),
        ]
    }

    fn parse_people(names: Vec<String>) -> Result<[String; 3]> {
        let names: Vec<String> = names.into_iter().map(|n| n.trim().to_string()).collect();
        if names.iter().any(String::is_empty) {
            bail!("people must not contain empty names");
        }
        let count = names.len();
        names
            .try_into()
            .map_err(|_| anyhow::anyhow!("people must list exactly 3 names, found {count}"))
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("tracker")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("tracker").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("tracker")
                .join("config.toml");
            let expected_native = b.config_dir().join("tracker").join("config.toml");
            let c = Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_all_keys() {
        let toml = r#"
            data_dir = "/mnt/volume"
            people = ["Frankie", "Harrison", "Madi"]
            recent_count = 7
            date_format = "%d/%m/%Y"
            input_date_formats = ["%d.%m.%Y"]
        "#;
        let fc = Config::parse_file(toml).unwrap();
        let config = Config::from_file_config(fc, None).unwrap();
        assert_eq!(
            config.storage,
            StorageLocation::Override(PathBuf::from("/mnt/volume"))
        );
        assert_eq!(config.people[2], "Madi");
        assert_eq!(config.recent_count, 7);
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.input_date_formats, vec!["%d.%m.%Y".to_string()]);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let fc = Config::parse_file("").unwrap();
        let config = Config::from_file_config(fc, None).unwrap();
        assert_eq!(config.storage, StorageLocation::default());
        assert_eq!(config.people[0], "Person A");
        assert_eq!(config.recent_count, 5);
    }

    #[test]
    fn explicit_override_beats_file_data_dir() {
        let fc = Config::parse_file(r#"data_dir = "/from/file""#).unwrap();
        let config = Config::from_file_config(fc, Some(PathBuf::from("/from/env"))).unwrap();
        assert_eq!(config.storage.dir(), Path::new("/from/env"));
    }

    #[test]
    fn people_must_be_three_names() {
        let fc = Config::parse_file(r#"people = ["Frankie", "Madi"]"#).unwrap();
        let err = Config::from_file_config(fc, None).unwrap_err();
        assert!(err.to_string().contains("exactly 3"));

        let fc = Config::parse_file(r#"people = ["Frankie", " ", "Madi"]"#).unwrap();
        assert!(Config::from_file_config(fc, None).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse_file(r#"database_url = "/tmp""#).is_err());
    }
}
