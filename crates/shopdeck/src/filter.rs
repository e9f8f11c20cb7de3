//! # Filter Predicate Evaluator
//!
//! Every management screen narrows its list the same way: a search box, one
//! dropdown per categorical dimension (with an "all" entry), and sometimes a
//! date range. This module is that behavior, written once.
//!
//! ## Inclusion Rule
//!
//! A record is included iff ALL of the following hold:
//!
//! 1. `search_text` is empty, or at least one searchable field contains it as
//!    a case-insensitive substring. Lower-casing is the only normalization:
//!    no trimming, no tokenizing, no fuzzy matching.
//! 2. For every dimension whose choice is not [`DimensionChoice::All`], the
//!    record's category equals the chosen value exactly (case-sensitive).
//! 3. If a [`DateRange`] is set, the record's timestamp for that field lies
//!    within the inclusive bounds.
//!
//! A missing field never satisfies a constraint and never panics.
//!
//! ## Ordering
//!
//! [`apply_filter`] is a stable filter, not a sort: matches come back in the
//! order they appear in the input. Ordering is [`crate::sort`]'s job.
//!
//! ## Reuse
//!
//! The evaluator is generic. Any type implementing [`Filterable`] can be
//! filtered by a [`FilterState`], and any `Fn(&T) -> bool` is a
//! [`FilterSpec`] too, so screens with ad hoc needs compose with the same
//! `apply_filter` entry point.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::attributes::AttrFilter;
use crate::error::{Result, ShopdeckError};
use crate::model::EntityRecord;

/// The value a screen's dropdown can hold for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionChoice {
    /// No constraint on this dimension.
    All,
    Value(String),
}

impl DimensionChoice {
    pub fn value(value: impl Into<String>) -> Self {
        DimensionChoice::Value(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, DimensionChoice::All)
    }
}

impl FromStr for DimensionChoice {
    type Err = ShopdeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Err(ShopdeckError::InvalidFilter(
                "dimension value cannot be empty".into(),
            )),
            "all" => Ok(DimensionChoice::All),
            other => Ok(DimensionChoice::Value(other.to_string())),
        }
    }
}

impl fmt::Display for DimensionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionChoice::All => f.write_str("all"),
            DimensionChoice::Value(v) => f.write_str(v),
        }
    }
}

/// Inclusive bounds on one timestamp field. Either bound may be open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub field: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(
        field: impl Into<String>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ShopdeckError::InvalidFilter(format!(
                    "date range starts ({}) after it ends ({})",
                    from, to
                )));
            }
        }
        Ok(Self {
            field: field.into(),
            from,
            to,
        })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| at >= from) && self.to.map_or(true, |to| at <= to)
    }
}

/// Anything a [`FilterState`] can evaluate.
pub trait Filterable {
    /// Text values eligible for free-text search, in field order.
    fn searchable_fields(&self) -> Vec<&str>;

    /// The value of a categorical dimension.
    fn category_value(&self, dimension: &str) -> Option<&str>;

    /// The value of a timestamp field.
    fn timestamp_value(&self, field: &str) -> Option<DateTime<Utc>>;
}

impl Filterable for EntityRecord {
    fn searchable_fields(&self) -> Vec<&str> {
        self.searchable.iter().map(|(_, v)| v.as_str()).collect()
    }

    fn category_value(&self, dimension: &str) -> Option<&str> {
        self.category(dimension)
    }

    fn timestamp_value(&self, field: &str) -> Option<DateTime<Utc>> {
        self.timestamp(field)
    }
}

/// A reusable inclusion predicate over `T`.
pub trait FilterSpec<T: ?Sized> {
    fn matches(&self, item: &T) -> bool;
}

impl<T: ?Sized, F> FilterSpec<T> for F
where
    F: Fn(&T) -> bool,
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

impl FilterSpec<EntityRecord> for AttrFilter {
    fn matches(&self, item: &EntityRecord) -> bool {
        AttrFilter::matches(self, item)
    }
}

/// The local view state of a list screen.
///
/// Created when a screen opens, changed only by explicit user input and
/// dropped when the screen closes. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub dimensions: BTreeMap<String, DimensionChoice>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_dimension(mut self, dimension: impl Into<String>, choice: DimensionChoice) -> Self {
        self.dimensions.insert(dimension.into(), choice);
        self
    }

    /// Convenience: constrain `dimension` to exactly `value`.
    pub fn with_value(self, dimension: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_dimension(dimension, DimensionChoice::value(value))
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Parse a `dimension=value` pair. `value` may be `all`.
    pub fn parse_dimension(input: &str) -> Result<(String, DimensionChoice)> {
        let (dimension, value) = input.split_once('=').ok_or_else(|| {
            ShopdeckError::InvalidFilter(format!("expected dimension=value, got '{}'", input))
        })?;
        let dimension = dimension.trim();
        if dimension.is_empty() {
            return Err(ShopdeckError::InvalidFilter(format!(
                "missing dimension name in '{}'",
                input
            )));
        }
        Ok((dimension.to_string(), value.parse()?))
    }

    /// True when no predicate constrains the list.
    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_empty()
            && self.dimensions.values().all(DimensionChoice::is_all)
            && self.date_range.is_none()
    }

    pub fn matches_search<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        item.searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches_dimensions<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        self.dimensions
            .iter()
            .all(|(dimension, choice)| match choice {
                DimensionChoice::All => true,
                DimensionChoice::Value(wanted) => item.category_value(dimension) == Some(wanted.as_str()),
            })
    }

    pub fn matches_date<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        match &self.date_range {
            None => true,
            Some(range) => item
                .timestamp_value(&range.field)
                .is_some_and(|at| range.contains(at)),
        }
    }
}

impl<T: Filterable + ?Sized> FilterSpec<T> for FilterState {
    fn matches(&self, item: &T) -> bool {
        self.matches_search(item) && self.matches_dimensions(item) && self.matches_date(item)
    }
}

/// Returns the items of `list` that satisfy `spec`, in their original order.
pub fn apply_filter<'a, T, S>(list: &'a [T], spec: &S) -> Vec<&'a T>
where
    S: FilterSpec<T> + ?Sized,
{
    let matched: Vec<&T> = list.iter().filter(|item| spec.matches(item)).collect();
    tracing::debug!(total = list.len(), matched = matched.len(), "applied filter");
    matched
}

/// Like [`apply_filter`], but clones the matches.
pub fn apply_filter_cloned<T, S>(list: &[T], spec: &S) -> Vec<T>
where
    T: Clone,
    S: FilterSpec<T> + ?Sized,
{
    apply_filter(list, spec).into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn customers() -> Vec<EntityRecord> {
        vec![
            EntityRecord::new("c1")
                .with_text("name", "John Doe")
                .with_text("email", "john@example.com")
                .with_category("status", "active"),
            EntityRecord::new("c2")
                .with_text("name", "Jane Smith")
                .with_text("email", "jane@shop.io")
                .with_category("status", "inactive"),
        ]
    }

    fn ids(records: &[&EntityRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let list = customers();
        let state = FilterState::new().with_search("john");
        assert_eq!(ids(&apply_filter(&list, &state)), vec!["c1"]);
    }

    #[test]
    fn search_matches_any_searchable_field() {
        let list = customers();
        let state = FilterState::new().with_search("SHOP.IO");
        assert_eq!(ids(&apply_filter(&list, &state)), vec!["c2"]);
    }

    #[test]
    fn search_does_not_trim() {
        let list = customers();
        let state = FilterState::new().with_search(" john");
        assert!(apply_filter(&list, &state).is_empty());
    }

    #[test]
    fn dimension_filter_selects_exact_value() {
        let list = customers();
        let state = FilterState::new().with_value("status", "active");
        assert_eq!(ids(&apply_filter(&list, &state)), vec!["c1"]);
    }

    #[test]
    fn dimension_filter_is_case_sensitive() {
        let list = customers();
        let state = FilterState::new().with_value("status", "Active");
        assert!(apply_filter(&list, &state).is_empty());
    }

    #[test]
    fn all_choice_does_not_constrain() {
        let list = customers();
        let state = FilterState::new().with_dimension("status", DimensionChoice::All);
        assert_eq!(apply_filter(&list, &state).len(), 2);
        assert!(state.is_unconstrained());
    }

    #[test]
    fn missing_dimension_never_matches_a_value() {
        let list = customers();
        let state = FilterState::new().with_value("segment", "vip");
        assert!(apply_filter(&list, &state).is_empty());
    }

    #[test]
    fn no_match_returns_empty() {
        let list = customers();
        let state = FilterState::new().with_search("zzz");
        assert!(apply_filter(&list, &state).is_empty());
    }

    #[test]
    fn search_and_dimension_are_anded() {
        let list = customers();
        let state = FilterState::new()
            .with_search("j")
            .with_value("status", "inactive");
        assert_eq!(ids(&apply_filter(&list, &state)), vec!["c2"]);
    }

    #[test]
    fn date_range_is_inclusive() {
        let list = vec![
            EntityRecord::new("a").with_timestamp("created_at", day(1)),
            EntityRecord::new("b").with_timestamp("created_at", day(5)),
            EntityRecord::new("c").with_timestamp("created_at", day(9)),
            EntityRecord::new("d"),
        ];
        let range = DateRange::new("created_at", Some(day(5)), Some(day(9))).unwrap();
        let state = FilterState::new().with_date_range(range);
        assert_eq!(ids(&apply_filter(&list, &state)), vec!["b", "c"]);
    }

    #[test]
    fn open_ended_date_range() {
        let list = vec![
            EntityRecord::new("a").with_timestamp("created_at", day(1)),
            EntityRecord::new("b").with_timestamp("created_at", day(5)),
        ];
        let range = DateRange::new("created_at", None, Some(day(3))).unwrap();
        let state = FilterState::new().with_date_range(range);
        assert_eq!(ids(&apply_filter(&list, &state)), vec!["a"]);
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        assert!(DateRange::new("created_at", Some(day(9)), Some(day(1))).is_err());
    }

    #[test]
    fn closures_are_filter_specs() {
        let list = customers();
        let spec = |r: &EntityRecord| r.id.ends_with('2');
        assert_eq!(ids(&apply_filter(&list, &spec)), vec!["c2"]);
    }

    #[test]
    fn attr_filters_are_filter_specs() {
        let list = customers();
        let spec = AttrFilter::contains("email", "EXAMPLE");
        assert_eq!(ids(&apply_filter(&list, &spec)), vec!["c1"]);
    }

    #[test]
    fn custom_types_can_be_filtered() {
        struct Sku {
            code: &'static str,
            stock: &'static str,
        }
        impl Filterable for Sku {
            fn searchable_fields(&self) -> Vec<&str> {
                vec![self.code]
            }
            fn category_value(&self, dimension: &str) -> Option<&str> {
                (dimension == "stock").then_some(self.stock)
            }
            fn timestamp_value(&self, _field: &str) -> Option<DateTime<Utc>> {
                None
            }
        }

        let skus = [
            Sku {
                code: "TSHIRT-RED",
                stock: "in_stock",
            },
            Sku {
                code: "TSHIRT-BLUE",
                stock: "out_of_stock",
            },
        ];
        let state = FilterState::new()
            .with_search("tshirt")
            .with_value("stock", "in_stock");
        let found = apply_filter(&skus, &state);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "TSHIRT-RED");
    }

    #[test]
    fn parse_dimension_pairs() {
        assert_eq!(
            FilterState::parse_dimension("status=active").unwrap(),
            ("status".to_string(), DimensionChoice::value("active"))
        );
        assert_eq!(
            FilterState::parse_dimension("status=all").unwrap(),
            ("status".to_string(), DimensionChoice::All)
        );
        assert!(FilterState::parse_dimension("status").is_err());
        assert!(FilterState::parse_dimension("=active").is_err());
        assert!(FilterState::parse_dimension("status=").is_err());
    }
}
