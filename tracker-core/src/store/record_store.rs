//! The `RecordStore`: sole owner of the on-disk tracker table.
//!
//! Every operation is one whole-table read-modify-write. Writes go to a temporary
//! file in the same directory which is then renamed over the table, so a failed
//! write leaves the previous table in place.
use super::entry::{Entry, Field};
use super::format_utils::format_table;
use super::parse_table::{ParsedTable, parse_table_content};
use super::path_utils::StorageLocation;
use crate::errors::{Result, StoreError};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// What an [`RecordStore::upsert`] did to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated { changed: Vec<Field> },
    /// The stored row already had these values; nothing was written.
    Unchanged,
}

type Table = BTreeMap<NaiveDate, Entry>;

#[derive(Debug)]
pub struct RecordStore {
    location: StorageLocation,
    path: PathBuf,
}

impl RecordStore {
    /// Opens the table at `location`, creating its directory and a header-only
    /// table if they don't exist yet.
    pub fn open(location: StorageLocation) -> Result<Self> {
        let dir = location.dir().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Init {
            path: dir.clone(),
            source,
        })?;

        let path = location.table_path();
        if !path.exists() {
            write_atomically(&dir, &path, &format_table(std::iter::empty())).map_err(
                |source| StoreError::Init {
                    path: path.clone(),
                    source,
                },
            )?;
            info!(path = %path.display(), "created tracker table");
        }
        debug!(path = %path.display(), overridden = location.is_override(), "opened tracker table");

        Ok(Self { location, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn location(&self) -> &StorageLocation {
        &self.location
    }

    /// Inserts `entry`, or replaces every field of the row with the same date.
    pub fn upsert(&self, entry: &Entry) -> Result<UpsertOutcome> {
        let parsed = self.load_table()?;
        let mut table = parsed.rows;
        let outcome = match table.get(&entry.date) {
            None => UpsertOutcome::Created,
            Some(existing) if existing == entry => UpsertOutcome::Unchanged,
            Some(existing) => UpsertOutcome::Updated {
                changed: existing.changed_fields(entry),
            },
        };
        if outcome == UpsertOutcome::Unchanged {
            debug!(date = %entry.date, "entry unchanged, skipping write");
            return Ok(outcome);
        }

        if parsed.legacy_header {
            warn!(path = %self.path.display(), "replacing legacy header");
        }
        for date in &parsed.duplicates {
            warn!(%date, "dropping duplicate rows for date, keeping the last one");
        }
        table.insert(entry.date, entry.clone());
        self.write(&table)?;
        info!(date = %entry.date, ?outcome, "saved entry");
        Ok(outcome)
    }

    /// Validates `raw` for a single field and saves it on top of the stored entry
    /// for `date` (or a default entry if there is none yet).
    pub fn update_field(&self, date: NaiveDate, field: Field, raw: &str) -> Result<UpsertOutcome> {
        let mut entry = self.get(date)?.unwrap_or_else(|| Entry::new(date));
        entry.set_field(field, raw)?;
        self.upsert(&entry)
    }

    /// The entry for `date`, or `None` if nothing was ever saved for it.
    pub fn get(&self, date: NaiveDate) -> Result<Option<Entry>> {
        Ok(self.load()?.remove(&date))
    }

    /// Up to `n` entries, most recent date first.
    pub fn list_recent(&self, n: usize) -> Result<Vec<Entry>> {
        Ok(self.load()?.into_values().rev().take(n).collect())
    }

    pub fn has_entry(&self, date: NaiveDate) -> Result<bool> {
        Ok(self.load()?.contains_key(&date))
    }

    /// Dates within the given month that have an entry.
    pub fn dates_in_month(&self, year: i32, month: u32) -> Result<BTreeSet<NaiveDate>> {
        Ok(self
            .load()?
            .into_keys()
            .filter(|date| date.year() == year && date.month() == month)
            .collect())
    }

    fn load(&self) -> Result<Table> {
        Ok(self.load_table()?.rows)
    }

    fn load_table(&self) -> Result<ParsedTable> {
        if !self.path.exists() {
            return Ok(ParsedTable::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let parsed = parse_table_content(&content).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            line: e.line,
            message: e.message,
        })?;
        debug!(rows = parsed.rows.len(), "loaded tracker table");
        Ok(parsed)
    }

    fn write(&self, table: &Table) -> Result<()> {
        write_atomically(self.location.dir(), &self.path, &format_table(table.values())).map_err(
            |source| StoreError::Write {
                path: self.path.clone(),
                source,
            },
        )
    }
}

fn write_atomically(dir: &Path, path: &Path, content: &str) -> io::Result<()> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.as_file().sync_all()?;
    // Keep the mode the table already had; the temp file starts out as 0600.
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(file.path(), metadata.permissions())?;
    }
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
