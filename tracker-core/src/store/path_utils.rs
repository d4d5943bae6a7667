use std::path::{Path, PathBuf};

pub const TABLE_FILE_NAME: &str = "tracker.csv";
pub const DEFAULT_DATA_DIR: &str = ".";

/// Where the table lives, and why.
///
/// Resolution order is fixed: an override directory (CLI flag, `TRACKER_DATA_DIR`
/// or the config file) wins over the default relative directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    Override(PathBuf),
    Default(PathBuf),
}

impl StorageLocation {
    /// Picks the first non-empty override, falling back to [`DEFAULT_DATA_DIR`].
    pub fn resolve<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = Option<PathBuf>>,
    {
        overrides
            .into_iter()
            .flatten()
            .find(|dir| !dir.as_os_str().is_empty())
            .map(StorageLocation::Override)
            .unwrap_or_default()
    }

    pub fn dir(&self) -> &Path {
        match self {
            StorageLocation::Override(dir) | StorageLocation::Default(dir) => dir,
        }
    }

    pub fn table_path(&self) -> PathBuf {
        self.dir().join(TABLE_FILE_NAME)
    }

    pub fn is_override(&self) -> bool {
        matches!(self, StorageLocation::Override(_))
    }
}

impl Default for StorageLocation {
    fn default() -> Self {
        StorageLocation::Default(PathBuf::from(DEFAULT_DATA_DIR))
    }
}
