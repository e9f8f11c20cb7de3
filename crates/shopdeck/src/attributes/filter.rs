//! Attribute filtering.
//!
//! `AttrFilter` expresses a single condition on one attribute of a record.
//! The screen-level evaluator in [`crate::filter`] composes these with the
//! free-text search and date range.

use super::AttrValue;
use crate::model::EntityRecord;

/// Filter operation for comparing attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact equality match (case-sensitive for strings).
    Eq,
    /// Not equal. A missing attribute still does not match.
    Ne,
    /// Case-insensitive substring (Text and Category only).
    Contains,
}

/// A filter condition on an attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrFilter {
    /// The attribute name (e.g., "status", "amount", "name")
    pub attr: String,
    /// The filter operation
    pub op: FilterOp,
    /// The value to compare against
    pub value: AttrValue,
}

impl AttrFilter {
    pub fn new(attr: impl Into<String>, op: FilterOp, value: AttrValue) -> Self {
        Self {
            attr: attr.into(),
            op,
            value,
        }
    }

    pub fn eq(attr: impl Into<String>, value: AttrValue) -> Self {
        Self::new(attr, FilterOp::Eq, value)
    }

    pub fn ne(attr: impl Into<String>, value: AttrValue) -> Self {
        Self::new(attr, FilterOp::Ne, value)
    }

    pub fn contains(attr: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::new(attr, FilterOp::Contains, AttrValue::Text(needle.into()))
    }

    /// Check if this filter matches the given record.
    ///
    /// Returns `false` if the attribute doesn't exist or the value types differ.
    pub fn matches(&self, record: &EntityRecord) -> bool {
        let Some(attr_value) = record.get_attr(&self.attr) else {
            return false;
        };

        match &self.op {
            FilterOp::Eq => values_equal(&attr_value, &self.value),
            FilterOp::Ne => {
                attr_value.kind() == self.value.kind() && !values_equal(&attr_value, &self.value)
            }
            FilterOp::Contains => match (attr_value.as_str(), self.value.as_str()) {
                (Some(haystack), Some(needle)) => {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
        }
    }
}

fn values_equal(a: &AttrValue, b: &AttrValue) -> bool {
    match (a, b) {
        (AttrValue::Text(a), AttrValue::Text(b)) => a == b,
        (AttrValue::Category(a), AttrValue::Category(b)) => a == b,
        (AttrValue::Metric(a), AttrValue::Metric(b)) => a == b,
        (AttrValue::Timestamp(a), AttrValue::Timestamp(b)) => a == b,
        _ => false, // Different types are not equal
    }
}
