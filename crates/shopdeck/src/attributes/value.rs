//! Attribute value types.

use chrono::{DateTime, Utc};

use super::AttributeKind;

/// Runtime representation of an attribute value.
///
/// Returned by [`EntityRecord::get_attr`](crate::model::EntityRecord::get_attr)
/// and used as the comparison operand of an [`AttrFilter`](super::AttrFilter).
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Searchable free text (e.g., `name`)
    Text(String),

    /// Categorical value (e.g., `status` = "active")
    Category(String),

    /// Numeric value (e.g., `amount`)
    Metric(f64),

    /// Point in time (e.g., `created_at`)
    Timestamp(DateTime<Utc>),
}

impl AttrValue {
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttrValue::Text(_) => AttributeKind::Text,
            AttrValue::Category(_) => AttributeKind::Category,
            AttrValue::Metric(_) => AttributeKind::Metric,
            AttrValue::Timestamp(_) => AttributeKind::Timestamp,
        }
    }

    /// Get the string value if this is Text or a Category.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) | AttrValue::Category(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_metric(&self) -> Option<f64> {
        match self {
            AttrValue::Metric(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            AttrValue::Timestamp(at) => Some(*at),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(AttrValue::Text("a".into()).kind(), AttributeKind::Text);
        assert_eq!(
            AttrValue::Category("active".into()).kind(),
            AttributeKind::Category
        );
        assert_eq!(AttrValue::Metric(1.0).kind(), AttributeKind::Metric);
        assert_eq!(
            AttrValue::Timestamp(Utc::now()).kind(),
            AttributeKind::Timestamp
        );
    }

    #[test]
    fn as_str_covers_text_and_category() {
        assert_eq!(AttrValue::Text("John".into()).as_str(), Some("John"));
        assert_eq!(AttrValue::Category("vip".into()).as_str(), Some("vip"));
        assert_eq!(AttrValue::Metric(2.0).as_str(), None);
    }

    #[test]
    fn typed_accessors_reject_other_variants() {
        assert_eq!(AttrValue::Metric(2.5).as_metric(), Some(2.5));
        assert_eq!(AttrValue::Text("2.5".into()).as_metric(), None);
        assert!(AttrValue::Category("x".into()).as_timestamp().is_none());
    }
}
