//! # Storage Layer
//!
//! Screens never own their data: records are created, edited and removed by
//! a data source outside the screen, and the screen reads a fresh list after
//! every change. The [`DataStore`] trait is that data source.
//!
//! ## Contract
//!
//! - `list` returns records in the source's order. A kind with no data is an
//!   empty list, not an error.
//! - `save` creates or replaces by id. Replacing keeps the record's position.
//! - `delete` of an unknown id is [`ShopdeckError::NotFound`].
//! - Duplicate ids already present in the source are passed through
//!   untouched; callers decide whether to report them.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: One JSON file per entity kind under a root directory.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── customers.json        # JSON array of EntityRecord
//! ├── orders.json
//! └── security-events.json
//! ```

use crate::error::{Result, ShopdeckError};
use crate::model::{EntityKind, EntityList, EntityRecord};

pub mod fs;
pub mod memory;

/// Abstract interface for entity storage.
pub trait DataStore {
    /// All records of a kind, in source order
    fn list(&self, kind: EntityKind) -> Result<EntityList>;

    /// Create or replace a record by id
    fn save(&mut self, kind: EntityKind, record: &EntityRecord) -> Result<()>;

    /// Remove a record permanently
    fn delete(&mut self, kind: EntityKind, id: &str) -> Result<()>;

    /// Get a record by id
    fn get(&self, kind: EntityKind, id: &str) -> Result<EntityRecord> {
        self.list(kind)?
            .find(id)
            .cloned()
            .ok_or_else(|| not_found(kind, id))
    }
}

pub(crate) fn not_found(kind: EntityKind, id: &str) -> ShopdeckError {
    ShopdeckError::NotFound {
        kind: kind.label().to_string(),
        id: id.to_string(),
    }
}

/// Replace the record with the same id in place, or append it.
pub(crate) fn upsert(records: &mut Vec<EntityRecord>, record: &EntityRecord) {
    match records.iter_mut().find(|r| r.id == record.id) {
        Some(existing) => *existing = record.clone(),
        None => records.push(record.clone()),
    }
}

/// Remove every record with `id`. Returns whether anything was removed.
pub(crate) fn remove(records: &mut Vec<EntityRecord>, id: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.id != id);
    records.len() != before
}
