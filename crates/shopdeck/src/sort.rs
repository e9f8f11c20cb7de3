//! # Sorting and Tie-Breaks
//!
//! Screens sort their (already filtered) rows by a column. The rules here are
//! fixed so that two renders of the same data always agree:
//!
//! - The sort is **stable**: records that compare equal keep their input order.
//! - Records **missing** the key (or holding a NaN metric) always go last,
//!   whichever direction is requested.
//! - Text compares case-insensitively.
//!
//! ## Key Syntax
//!
//! [`SortSpec::parse`] accepts `key[:asc|:desc]`, where `key` is `id`,
//! `text.<field>`, `metric.<name>`, `time.<field>`, or a bare attribute name.
//! Bare names are resolved against the list at sort time, using the kind of
//! the first record that carries the attribute.

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::attributes::{AttrValue, AttributeKind};
use crate::error::{Result, ShopdeckError};
use crate::model::EntityRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Text(String),
    Metric(String),
    Timestamp(String),
    /// Resolved against the list being sorted.
    Field(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: Direction,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: Direction) -> Self {
        Self { key, direction }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let (key, direction) = match input.rsplit_once(':') {
            Some((key, "asc")) => (key, Direction::Asc),
            Some((key, "desc")) => (key, Direction::Desc),
            Some((_, other)) => {
                return Err(ShopdeckError::InvalidSort(format!(
                    "unknown direction '{}', expected asc or desc",
                    other
                )))
            }
            None => (input, Direction::Asc),
        };

        let key = key.trim();
        let key = match key.split_once('.') {
            _ if key == "id" => SortKey::Id,
            Some(("text", field)) if !field.is_empty() => SortKey::Text(field.to_string()),
            Some(("metric", name)) if !name.is_empty() => SortKey::Metric(name.to_string()),
            Some(("time", field)) if !field.is_empty() => SortKey::Timestamp(field.to_string()),
            _ if key.is_empty() => {
                return Err(ShopdeckError::InvalidSort("missing sort key".into()));
            }
            _ => SortKey::Field(key.to_string()),
        };

        Ok(Self { key, direction })
    }

    /// Replace a `Field` key with a concrete one based on `records`.
    ///
    /// A field no record carries resolves to `Text`, which puts every record
    /// in the "missing" group and leaves the order untouched.
    pub fn resolve<R: Borrow<EntityRecord>>(&self, records: &[R]) -> SortKey {
        let SortKey::Field(name) = &self.key else {
            return self.key.clone();
        };
        let kind = records
            .iter()
            .find_map(|r| r.borrow().get_attr(name))
            .map(|value| value.kind());
        match kind {
            Some(AttributeKind::Metric) => SortKey::Metric(name.clone()),
            Some(AttributeKind::Timestamp) => SortKey::Timestamp(name.clone()),
            Some(AttributeKind::Category) => SortKey::Field(name.clone()),
            Some(AttributeKind::Text) | None => SortKey::Text(name.clone()),
        }
    }
}

/// Sort `records` in place according to `spec`.
pub fn sort_records<R: Borrow<EntityRecord>>(records: &mut [R], spec: &SortSpec) {
    let key = spec.resolve(records);
    records.sort_by(|a, b| compare(a.borrow(), b.borrow(), &key, spec.direction));
}

fn compare(a: &EntityRecord, b: &EntityRecord, key: &SortKey, direction: Direction) -> Ordering {
    match key {
        SortKey::Id => directed(a.id.cmp(&b.id), direction),
        SortKey::Text(field) => missing_last(
            a.text(field).map(str::to_lowercase),
            b.text(field).map(str::to_lowercase),
            |x, y| x.cmp(y),
            direction,
        ),
        SortKey::Metric(name) => missing_last(
            a.metric(name).filter(|v| !v.is_nan()),
            b.metric(name).filter(|v| !v.is_nan()),
            |x, y| x.total_cmp(y),
            direction,
        ),
        SortKey::Timestamp(field) => missing_last(
            a.timestamp(field),
            b.timestamp(field),
            |x, y| x.cmp(y),
            direction,
        ),
        // Resolved to a category: compare the raw category strings.
        SortKey::Field(name) => missing_last(
            category_of(a, name),
            category_of(b, name),
            |x, y| x.cmp(y),
            direction,
        ),
    }
}

fn category_of(record: &EntityRecord, name: &str) -> Option<String> {
    match record.get_attr(name) {
        Some(AttrValue::Category(value)) => Some(value),
        _ => None,
    }
}

fn missing_last<T>(
    a: Option<T>,
    b: Option<T>,
    cmp: impl Fn(&T, &T) -> Ordering,
    direction: Direction,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(cmp(&a, &b), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn directed(ordering: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}
