//! Dimension specifications and registry.
//!
//! This module defines the schema for categorical attributes: which
//! dimensions each entity kind can be filtered on, and the finite set of
//! values each dimension accepts.

use crate::error::ShopdeckError;
use crate::model::{EntityKind, EntityRecord};

/// The kind of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Free text eligible for search (e.g., `name`, `email`)
    Text,

    /// Enum with a fixed set of valid values (e.g., `status`)
    Category,

    /// Number used for aggregation and sorting (e.g., `amount`)
    Metric,

    /// Instant used for display and date ranges (e.g., `created_at`)
    Timestamp,
}

/// Specification for a single filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionSpec {
    /// The dimension name used in filters (e.g., "status", "priority")
    pub name: &'static str,

    /// Every value the dimension accepts, in display order
    pub values: &'static [&'static str],
}

impl DimensionSpec {
    const fn new(name: &'static str, values: &'static [&'static str]) -> Self {
        Self { name, values }
    }

    pub fn accepts(&self, value: &str) -> bool {
        self.values.contains(&value)
    }

    /// Position of `value` in the declared set.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| *v == value)
    }
}

const CUSTOMER: &[DimensionSpec] = &[
    DimensionSpec::new("status", &["active", "inactive"]),
    DimensionSpec::new("segment", &["new", "regular", "vip"]),
];

const VENDOR: &[DimensionSpec] = &[
    DimensionSpec::new("status", &["active", "inactive", "pending"]),
    DimensionSpec::new(
        "category",
        &["electronics", "clothing", "food", "home", "beauty"],
    ),
];

const ORDER: &[DimensionSpec] = &[
    DimensionSpec::new(
        "status",
        &["pending", "processing", "shipped", "delivered", "cancelled"],
    ),
    DimensionSpec::new("priority", &["low", "medium", "high"]),
];

const PRODUCT: &[DimensionSpec] = &[
    DimensionSpec::new(
        "category",
        &["electronics", "clothing", "food", "home", "beauty"],
    ),
    DimensionSpec::new("stock", &["in_stock", "low_stock", "out_of_stock"]),
];

const SHIPMENT: &[DimensionSpec] = &[
    DimensionSpec::new(
        "status",
        &["pending", "in_transit", "delivered", "returned", "failed"],
    ),
    DimensionSpec::new("carrier", &["ups", "fedex", "dhl", "usps"]),
];

const TRANSACTION: &[DimensionSpec] = &[
    DimensionSpec::new("type", &["sale", "refund", "payout", "fee"]),
    DimensionSpec::new("status", &["completed", "pending", "failed"]),
];

const PAYMENT: &[DimensionSpec] = &[
    DimensionSpec::new("method", &["card", "paypal", "bank_transfer", "cash"]),
    DimensionSpec::new("status", &["completed", "pending", "failed", "refunded"]),
];

const INVOICE: &[DimensionSpec] = &[DimensionSpec::new(
    "status",
    &["paid", "unpaid", "overdue", "draft"],
)];

const SECURITY_EVENT: &[DimensionSpec] = &[
    DimensionSpec::new("severity", &["low", "medium", "high", "critical"]),
    DimensionSpec::new(
        "type",
        &[
            "login",
            "logout",
            "failed_login",
            "password_change",
            "permission_change",
        ],
    ),
    DimensionSpec::new("status", &["open", "investigating", "resolved"]),
];

const APP_VERSION: &[DimensionSpec] = &[
    DimensionSpec::new("platform", &["ios", "android"]),
    DimensionSpec::new("status", &["draft", "review", "live", "rejected"]),
];

const BUDGET: &[DimensionSpec] = &[
    DimensionSpec::new(
        "category",
        &["marketing", "operations", "payroll", "inventory"],
    ),
    DimensionSpec::new("status", &["on_track", "over_budget", "under_budget"]),
];

const USER: &[DimensionSpec] = &[
    DimensionSpec::new("role", &["admin", "manager", "staff", "viewer"]),
    DimensionSpec::new("status", &["active", "inactive", "suspended"]),
];

/// The filterable dimensions of an entity kind.
pub fn dimensions_for(kind: EntityKind) -> &'static [DimensionSpec] {
    match kind {
        EntityKind::Customer => CUSTOMER,
        EntityKind::Vendor => VENDOR,
        EntityKind::Order => ORDER,
        EntityKind::Product => PRODUCT,
        EntityKind::Shipment => SHIPMENT,
        EntityKind::Transaction => TRANSACTION,
        EntityKind::Payment => PAYMENT,
        EntityKind::Invoice => INVOICE,
        EntityKind::SecurityEvent => SECURITY_EVENT,
        EntityKind::AppVersion => APP_VERSION,
        EntityKind::Budget => BUDGET,
        EntityKind::User => USER,
    }
}

/// Look up a dimension spec by name.
pub fn dimension_spec(kind: EntityKind, name: &str) -> Option<&'static DimensionSpec> {
    dimensions_for(kind).iter().find(|spec| spec.name == name)
}

/// How a categorical value should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryStyle {
    /// A declared value, with its position in the dimension's value set.
    Known(usize),
    /// Unknown dimension or undeclared value.
    Neutral,
}

pub fn category_style(kind: EntityKind, dimension: &str, value: &str) -> CategoryStyle {
    dimension_spec(kind, dimension)
        .and_then(|spec| spec.position(value))
        .map(CategoryStyle::Known)
        .unwrap_or(CategoryStyle::Neutral)
}

/// Report every category value on `record` that its dimension does not declare.
///
/// Dimensions with no registry entry are free-form and never reported.
pub fn validate(kind: EntityKind, record: &EntityRecord) -> Vec<ShopdeckError> {
    record
        .categories
        .iter()
        .filter_map(|(dimension, value)| {
            let spec = dimension_spec(kind, dimension)?;
            if spec.accepts(value) {
                None
            } else {
                Some(ShopdeckError::UnknownCategory {
                    dimension: dimension.clone(),
                    value: value.clone(),
                })
            }
        })
        .collect()
}
