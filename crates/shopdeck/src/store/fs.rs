use super::{not_found, remove, upsert, DataStore};
use crate::error::{Result, ShopdeckError};
use crate::model::{EntityKind, EntityList, EntityRecord};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each entity kind as a JSON array in `<root>/<slug>.json`.
///
/// Writes rewrite the whole file through a temporary sibling and a rename,
/// so a crash mid-write leaves the previous list intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        self.root.join(format!("{}.json", kind.slug()))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ShopdeckError::Io)?;
        }
        Ok(())
    }

    fn load(&self, kind: EntityKind) -> Result<Vec<EntityRecord>> {
        let path = self.path_for(kind);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(ShopdeckError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(ShopdeckError::Serialization)
    }

    fn write(&self, kind: EntityKind, records: &[EntityRecord]) -> Result<()> {
        self.ensure_dir()?;
        let path = self.path_for(kind);
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(records).map_err(ShopdeckError::Serialization)?;
        fs::write(&tmp, content).map_err(ShopdeckError::Io)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(ShopdeckError::Io(e));
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn list(&self, kind: EntityKind) -> Result<EntityList> {
        let records = self.load(kind)?;
        tracing::debug!(%kind, count = records.len(), "loaded records");
        Ok(EntityList::new(kind, records))
    }

    fn save(&mut self, kind: EntityKind, record: &EntityRecord) -> Result<()> {
        record.ensure_finite_metrics()?;
        let mut records = self.load(kind)?;
        upsert(&mut records, record);
        self.write(kind, &records)
    }

    fn delete(&mut self, kind: EntityKind, id: &str) -> Result<()> {
        let mut records = self.load(kind)?;
        if !remove(&mut records, id) {
            return Err(not_found(kind, id));
        }
        self.write(kind, &records)
    }
}
