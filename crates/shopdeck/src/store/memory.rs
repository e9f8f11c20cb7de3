use super::{not_found, remove, upsert, DataStore};
use crate::error::{Result, ShopdeckError};
use crate::model::{EntityKind, EntityList, EntityRecord};
use std::collections::HashMap;

/// Keeps every list in memory. Writes can be made to fail on demand so
/// mutation error paths can be exercised.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    lists: HashMap<EntityKind, Vec<EntityRecord>>,
    write_failure: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, kind: EntityKind, records: Vec<EntityRecord>) -> Self {
        self.lists.insert(kind, records);
        self
    }

    /// Make every subsequent `save`/`delete` fail with `reason`.
    pub fn fail_writes(&mut self, reason: impl Into<String>) {
        self.write_failure = Some(reason.into());
    }

    pub fn allow_writes(&mut self) {
        self.write_failure = None;
    }

    fn check_writable(&self) -> Result<()> {
        match &self.write_failure {
            Some(reason) => Err(ShopdeckError::Store(reason.clone())),
            None => Ok(()),
        }
    }
}

impl DataStore for InMemoryStore {
    fn list(&self, kind: EntityKind) -> Result<EntityList> {
        let records = self.lists.get(&kind).cloned().unwrap_or_default();
        Ok(EntityList::new(kind, records))
    }

    fn save(&mut self, kind: EntityKind, record: &EntityRecord) -> Result<()> {
        self.check_writable()?;
        upsert(self.lists.entry(kind).or_default(), record);
        Ok(())
    }

    fn delete(&mut self, kind: EntityKind, id: &str) -> Result<()> {
        self.check_writable()?;
        let removed = self
            .lists
            .get_mut(&kind)
            .map(|records| remove(records, id))
            .unwrap_or(false);
        if removed {
            Ok(())
        } else {
            Err(not_found(kind, id))
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// The two customers used throughout the dashboard examples.
    pub fn customers() -> Vec<EntityRecord> {
        vec![
            EntityRecord::new("c1")
                .with_text("name", "John Doe")
                .with_text("email", "john.doe@example.com")
                .with_category("status", "active")
                .with_category("segment", "vip")
                .with_metric("total_orders", 12.0)
                .with_metric("total_spent", 1250.5),
            EntityRecord::new("c2")
                .with_text("name", "Jane Smith")
                .with_text("email", "jane.smith@example.com")
                .with_category("status", "inactive")
                .with_category("segment", "regular")
                .with_metric("total_orders", 3.0)
                .with_metric("total_spent", 240.0),
        ]
    }

    pub fn orders() -> Vec<EntityRecord> {
        let at = |d| Utc.with_ymd_and_hms(2024, 5, d, 9, 30, 0).unwrap();
        vec![
            EntityRecord::new("o1")
                .with_text("reference", "ORD-1001")
                .with_text("customer", "John Doe")
                .with_category("status", "delivered")
                .with_category("priority", "low")
                .with_metric("amount", 120.0)
                .with_timestamp("created_at", at(1)),
            EntityRecord::new("o2")
                .with_text("reference", "ORD-1002")
                .with_text("customer", "Jane Smith")
                .with_category("status", "pending")
                .with_category("priority", "high")
                .with_metric("amount", 80.0)
                .with_timestamp("created_at", at(3)),
            EntityRecord::new("o3")
                .with_text("reference", "ORD-1003")
                .with_text("customer", "John Doe")
                .with_category("status", "shipped")
                .with_category("priority", "high")
                .with_metric("amount", 45.5)
                .with_timestamp("created_at", at(7)),
        ]
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_customers(mut self) -> Self {
            self.store = self.store.with_records(EntityKind::Customer, customers());
            self
        }

        pub fn with_orders(mut self) -> Self {
            self.store = self.store.with_records(EntityKind::Order, orders());
            self
        }

        pub fn failing(mut self, reason: &str) -> Self {
            self.store.fail_writes(reason);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn unknown_kind_lists_empty() {
        let store = InMemoryStore::new();
        let list = store.list(EntityKind::Vendor).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.kind, EntityKind::Vendor);
    }

    #[test]
    fn save_appends_then_replaces_in_place() {
        let mut store = StoreFixture::new().with_customers().store;
        let mut john = store.get(EntityKind::Customer, "c1").unwrap();
        john.categories.insert("status".into(), "inactive".into());

        store.save(EntityKind::Customer, &john).unwrap();
        store
            .save(EntityKind::Customer, &EntityRecord::new("c3"))
            .unwrap();

        let list = store.list(EntityKind::Customer).unwrap();
        let ids: Vec<&str> = list.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
        assert_eq!(list.records[0].category("status"), Some("inactive"));
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let mut store = StoreFixture::new().with_customers().store;
        let err = store.delete(EntityKind::Customer, "nope").unwrap_err();
        assert!(matches!(err, ShopdeckError::NotFound { .. }));
    }

    #[test]
    fn get_unknown_is_not_found() {
        let store = StoreFixture::new().with_customers().store;
        assert!(store.get(EntityKind::Customer, "c9").is_err());
    }

    #[test]
    fn failing_store_rejects_writes_but_reads() {
        let mut store = StoreFixture::new().with_customers().failing("offline").store;
        assert!(store.delete(EntityKind::Customer, "c1").is_err());
        assert_eq!(store.list(EntityKind::Customer).unwrap().len(), 2);

        store.allow_writes();
        store.delete(EntityKind::Customer, "c1").unwrap();
        assert_eq!(store.list(EntityKind::Customer).unwrap().len(), 1);
    }
}
