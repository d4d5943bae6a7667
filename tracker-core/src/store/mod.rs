mod entry;
mod format_utils;
mod parse_table;
mod path_utils;
mod record_store;

pub use entry::{Entry, Field, FieldKind, FieldValue, Rating, VibeScore};
pub use path_utils::{DEFAULT_DATA_DIR, StorageLocation, TABLE_FILE_NAME};
pub use record_store::{RecordStore, UpsertOutcome};
