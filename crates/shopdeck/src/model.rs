//! # Domain Model: Entity Records and Lists
//!
//! Every management screen (customers, vendors, orders, shipments, security
//! events, ...) shows the same shape of data: a list of records, each with a
//! handful of text fields worth searching, a few categorical facets worth
//! filtering on, some numbers worth summing, and maybe a date or two.
//!
//! Rather than one struct per screen, this module defines a single
//! [`EntityRecord`] whose fields are grouped by how they are *used*:
//!
//! | Group        | Type                               | Used for                    |
//! |--------------|------------------------------------|-----------------------------|
//! | `searchable` | ordered `(name, text)` pairs       | free-text search            |
//! | `categories` | dimension → enum value             | dimension filters, styling  |
//! | `metrics`    | metric → number                    | aggregation and sorting     |
//! | `timestamps` | field → instant                    | display, date-range filters |
//!
//! Records are read-only for the life of a screen. They are created, edited
//! and removed through a [`crate::store::DataStore`], never in place.
//!
//! ## Identity
//!
//! `id` is opaque and unique within its [`EntityList`]. Uniqueness is not
//! enforced on read (a data source may hand us duplicates);
//! [`EntityList::duplicate_ids`] reports them so callers can log the defect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::attributes::AttrValue;
use crate::error::ShopdeckError;

/// The management screens that hold entity lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Customer,
    Vendor,
    Order,
    Product,
    Shipment,
    Transaction,
    Payment,
    Invoice,
    SecurityEvent,
    AppVersion,
    Budget,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 12] = [
        EntityKind::Customer,
        EntityKind::Vendor,
        EntityKind::Order,
        EntityKind::Product,
        EntityKind::Shipment,
        EntityKind::Transaction,
        EntityKind::Payment,
        EntityKind::Invoice,
        EntityKind::SecurityEvent,
        EntityKind::AppVersion,
        EntityKind::Budget,
        EntityKind::User,
    ];

    /// Plural slug used for file names and CLI arguments.
    pub fn slug(&self) -> &'static str {
        match self {
            EntityKind::Customer => "customers",
            EntityKind::Vendor => "vendors",
            EntityKind::Order => "orders",
            EntityKind::Product => "products",
            EntityKind::Shipment => "shipments",
            EntityKind::Transaction => "transactions",
            EntityKind::Payment => "payments",
            EntityKind::Invoice => "invoices",
            EntityKind::SecurityEvent => "security-events",
            EntityKind::AppVersion => "app-versions",
            EntityKind::Budget => "budgets",
            EntityKind::User => "users",
        }
    }

    /// Singular, human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Customer => "customer",
            EntityKind::Vendor => "vendor",
            EntityKind::Order => "order",
            EntityKind::Product => "product",
            EntityKind::Shipment => "shipment",
            EntityKind::Transaction => "transaction",
            EntityKind::Payment => "payment",
            EntityKind::Invoice => "invoice",
            EntityKind::SecurityEvent => "security event",
            EntityKind::AppVersion => "app version",
            EntityKind::Budget => "budget",
            EntityKind::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EntityKind {
    type Err = ShopdeckError;

    /// Accepts the plural slug, the singular label, or underscores for dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('_', "-");
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.slug() == needle || kind.label().replace(' ', "-") == needle)
            .ok_or_else(|| ShopdeckError::UnknownKind(s.trim().to_string()))
    }
}

/// One row of business data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    #[serde(default)]
    pub searchable: Vec<(String, String)>,
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub timestamps: BTreeMap<String, DateTime<Utc>>,
}

impl EntityRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            searchable: Vec::new(),
            categories: BTreeMap::new(),
            metrics: BTreeMap::new(),
            timestamps: BTreeMap::new(),
        }
    }

    /// Adds a searchable text field. Field order is preserved.
    pub fn with_text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.searchable.push((field.into(), value.into()));
        self
    }

    pub fn with_category(mut self, dimension: impl Into<String>, value: impl Into<String>) -> Self {
        self.categories.insert(dimension.into(), value.into());
        self
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    pub fn with_timestamp(mut self, name: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.timestamps.insert(name.into(), at);
        self
    }

    /// First searchable field with the given name.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.searchable
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn category(&self, dimension: &str) -> Option<&str> {
        self.categories.get(dimension).map(String::as_str)
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        self.timestamps.get(name).copied()
    }

    /// Fails on the first NaN or infinite metric. JSON has no spelling for
    /// those, so a stored list holding one could not be read back.
    pub fn ensure_finite_metrics(&self) -> Result<(), ShopdeckError> {
        match self.metrics.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(ShopdeckError::InvalidRecord(format!(
                "metric '{}' must be a finite number, got {}",
                name, value
            ))),
            None => Ok(()),
        }
    }

    /// The first searchable field, used as the row title when rendering.
    pub fn title(&self) -> &str {
        self.searchable
            .first()
            .map(|(_, value)| value.as_str())
            .unwrap_or(&self.id)
    }

    /// Look up any attribute by name.
    ///
    /// Categories win over metrics, metrics over timestamps, timestamps over
    /// text, so a dimension named like a text field still filters as a category.
    pub fn get_attr(&self, name: &str) -> Option<AttrValue> {
        if let Some(value) = self.categories.get(name) {
            return Some(AttrValue::Category(value.clone()));
        }
        if let Some(value) = self.metrics.get(name) {
            return Some(AttrValue::Metric(*value));
        }
        if let Some(at) = self.timestamps.get(name) {
            return Some(AttrValue::Timestamp(*at));
        }
        self.text(name).map(|value| AttrValue::Text(value.to_string()))
    }
}

/// An ordered sequence of records of one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityList {
    pub kind: EntityKind,
    pub records: Vec<EntityRecord>,
}

impl EntityList {
    pub fn new(kind: EntityKind, records: Vec<EntityRecord>) -> Self {
        Self { kind, records }
    }

    pub fn empty(kind: EntityKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&EntityRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Ids that appear more than once, in order of their second appearance.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut dupes = Vec::new();
        for record in &self.records {
            if !seen.insert(record.id.as_str()) && !dupes.contains(&record.id) {
                dupes.push(record.id.clone());
            }
        }
        dupes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, name: &str) -> EntityRecord {
        EntityRecord::new(id)
            .with_text("name", name)
            .with_text("email", format!("{}@example.com", id))
            .with_category("status", "active")
            .with_metric("total_orders", 3.0)
    }

    #[test]
    fn kind_parses_slug_and_label() {
        assert_eq!("customers".parse::<EntityKind>().unwrap(), EntityKind::Customer);
        assert_eq!("customer".parse::<EntityKind>().unwrap(), EntityKind::Customer);
        assert_eq!(
            "security_events".parse::<EntityKind>().unwrap(),
            EntityKind::SecurityEvent
        );
        assert_eq!(
            "Security-Event".parse::<EntityKind>().unwrap(),
            EntityKind::SecurityEvent
        );
        assert!("widgets".parse::<EntityKind>().is_err());
    }

    #[test]
    fn unknown_kind_names_the_input() {
        let err = " widgets ".parse::<EntityKind>().unwrap_err();
        assert!(matches!(err, ShopdeckError::UnknownKind(ref k) if k == "widgets"));
        assert_eq!(err.to_string(), "Unknown entity kind 'widgets'");
    }

    #[test]
    fn non_finite_metrics_are_rejected() {
        assert!(customer("c1", "John Doe").ensure_finite_metrics().is_ok());
        for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let record = customer("c1", "John Doe").with_metric("total_spent", bad);
            let err = record.ensure_finite_metrics().unwrap_err();
            assert!(matches!(err, ShopdeckError::InvalidRecord(_)));
            assert!(err.to_string().contains("total_spent"));
        }
    }

    #[test]
    fn get_attr_prefers_categories() {
        let record = customer("c1", "John Doe").with_text("status", "shadowed");
        assert_eq!(
            record.get_attr("status"),
            Some(AttrValue::Category("active".into()))
        );
        assert_eq!(record.get_attr("total_orders"), Some(AttrValue::Metric(3.0)));
        assert_eq!(
            record.get_attr("name"),
            Some(AttrValue::Text("John Doe".into()))
        );
        assert_eq!(record.get_attr("missing"), None);
    }

    #[test]
    fn title_falls_back_to_id() {
        assert_eq!(customer("c1", "John Doe").title(), "John Doe");
        assert_eq!(EntityRecord::new("c9").title(), "c9");
    }

    #[test]
    fn duplicate_ids_are_reported_once() {
        let list = EntityList::new(
            EntityKind::Customer,
            vec![
                customer("c1", "A"),
                customer("c2", "B"),
                customer("c1", "C"),
                customer("c1", "D"),
            ],
        );
        assert_eq!(list.duplicate_ids(), vec!["c1".to_string()]);
    }

    #[test]
    fn record_roundtrips_through_json() {
        let record = customer("c1", "John Doe");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#"["name","John Doe"]"#));
        let back: EntityRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn missing_groups_default_to_empty() {
        let record: EntityRecord = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(record.searchable.is_empty());
        assert!(record.categories.is_empty());
    }
}
