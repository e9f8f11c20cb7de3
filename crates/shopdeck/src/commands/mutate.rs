//! # Mutations
//!
//! Add, edit and delete go through the store and report back explicitly:
//!
//! - **Success**: a success message, the touched record in `affected`, and the
//!   refreshed full list in `listed`. Callers refresh from `listed`; there is
//!   no optimistic update.
//! - **Failure**: `Err(ShopdeckError::MutationFailed)` naming the action, the
//!   id and the underlying reason. Nothing is assumed to have happened.
//!
//! Once the write is committed the result is `Ok`. If re-reading the list
//! afterwards fails, `listed` stays empty and a warning says so.
//!
//! Undeclared category values are accepted (the data source is trusted) but
//! produce a warning so the user sees them before they end up unstyled.

use uuid::Uuid;

use crate::attributes::validate;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ShopdeckError};
use crate::model::{EntityKind, EntityRecord};
use crate::store::DataStore;

/// Adds a new record. An empty id is replaced by a fresh UUID.
pub fn add<S: DataStore>(
    store: &mut S,
    kind: EntityKind,
    mut record: EntityRecord,
) -> Result<CmdResult> {
    if record.id.trim().is_empty() {
        record.id = Uuid::new_v4().to_string();
    }
    record
        .ensure_finite_metrics()
        .map_err(|e| ShopdeckError::mutation_failed("add", &record.id, &e))?;

    let existing = store
        .list(kind)
        .map_err(|e| ShopdeckError::mutation_failed("add", &record.id, &e))?;
    if existing.find(&record.id).is_some() {
        let dup = ShopdeckError::DuplicateId {
            kind: kind.label().to_string(),
            id: record.id.clone(),
        };
        return Err(ShopdeckError::mutation_failed("add", &record.id, &dup));
    }

    store
        .save(kind, &record)
        .map_err(|e| ShopdeckError::mutation_failed("add", &record.id, &e))?;
    tracing::info!(%kind, id = %record.id, "added record");

    finish(store, kind, record, "Added")
}

/// Replaces an existing record with the same id.
pub fn edit<S: DataStore>(
    store: &mut S,
    kind: EntityKind,
    record: EntityRecord,
) -> Result<CmdResult> {
    record
        .ensure_finite_metrics()
        .map_err(|e| ShopdeckError::mutation_failed("edit", &record.id, &e))?;
    store
        .get(kind, &record.id)
        .map_err(|e| ShopdeckError::mutation_failed("edit", &record.id, &e))?;
    store
        .save(kind, &record)
        .map_err(|e| ShopdeckError::mutation_failed("edit", &record.id, &e))?;
    tracing::info!(%kind, id = %record.id, "edited record");

    finish(store, kind, record, "Updated")
}

/// Removes a record permanently.
pub fn delete<S: DataStore>(store: &mut S, kind: EntityKind, id: &str) -> Result<CmdResult> {
    let record = store
        .get(kind, id)
        .map_err(|e| ShopdeckError::mutation_failed("delete", id, &e))?;
    store
        .delete(kind, id)
        .map_err(|e| ShopdeckError::mutation_failed("delete", id, &e))?;
    tracing::info!(%kind, %id, "deleted record");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted {} {}",
        kind.label(),
        record.title()
    )));
    let listed = refresh(store, kind, &mut result);
    Ok(result.with_affected(vec![record]).with_listed(listed))
}

fn finish<S: DataStore>(
    store: &S,
    kind: EntityKind,
    record: EntityRecord,
    verb: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} {} {}",
        verb,
        kind.label(),
        record.title()
    )));
    for problem in validate(kind, &record) {
        tracing::warn!(%kind, id = %record.id, %problem, "unknown category");
        result.add_message(CmdMessage::warning(problem.to_string()));
    }
    let listed = refresh(store, kind, &mut result);
    Ok(result.with_affected(vec![record]).with_listed(listed))
}

/// Re-reads the full list after a committed write.
fn refresh<S: DataStore>(store: &S, kind: EntityKind, result: &mut CmdResult) -> Vec<EntityRecord> {
    match store.list(kind) {
        Ok(list) => list.records,
        Err(e) => {
            tracing::warn!(%kind, error = %e, "refresh after write failed");
            result.add_message(CmdMessage::warning(format!(
                "Change saved, but the {} list could not be refreshed: {}",
                kind.slug(),
                e
            )));
            Vec::new()
        }
    }
}
