pub mod config;
pub mod dates;
pub mod errors;
pub mod store;
mod tracker;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use errors::{StoreError, ValidationError};
pub use store::{
    Entry, Field, FieldKind, FieldValue, Rating, RecordStore, StorageLocation, UpsertOutcome,
    VibeScore,
};
pub use tracker::Tracker;
