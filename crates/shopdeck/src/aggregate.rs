//! # Aggregation Calculator
//!
//! The stat cards above every list ("Total Revenue", "Active Vendors",
//! "Avg. Success Rate", ...) are reductions over a record list. Every
//! function here is pure and total: no panics, and no NaN or infinity leaks
//! out to the caller.
//!
//! | Function               | Empty input               | Division by zero |
//! |------------------------|---------------------------|------------------|
//! | [`count`]              | `0`                       | n/a              |
//! | [`sum`]                | `0.0`                     | n/a              |
//! | [`average`]            | [`Average::NotApplicable`] | n/a             |
//! | [`percentage_of_total`] | n/a                      | `0.0`            |
//!
//! Records that do not carry the requested metric are skipped: they add
//! nothing to a sum and do not count toward an average's denominator.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::ShopdeckError;
use crate::model::EntityRecord;

/// The result of averaging a possibly empty list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Average {
    Value(f64),
    /// Nothing to average.
    NotApplicable,
}

impl Average {
    pub fn value(&self) -> Option<f64> {
        match self {
            Average::Value(v) => Some(*v),
            Average::NotApplicable => None,
        }
    }

    /// The average, or `fallback` when there is none.
    pub fn or(&self, fallback: f64) -> f64 {
        self.value().unwrap_or(fallback)
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Average::Value(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            Average::NotApplicable => f.write_str("n/a"),
        }
    }
}

/// Which rows a stat card reduces over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateScope {
    /// Every record, whatever the active filter.
    #[default]
    Full,
    /// Only the rows currently visible.
    Filtered,
}

impl FromStr for AggregateScope {
    type Err = ShopdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "full" => Ok(AggregateScope::Full),
            "filtered" => Ok(AggregateScope::Filtered),
            other => Err(ShopdeckError::Config(format!(
                "unknown aggregate scope '{}', expected full or filtered",
                other
            ))),
        }
    }
}

/// Number of records satisfying `predicate`.
pub fn count<R, P>(list: &[R], predicate: P) -> usize
where
    R: Borrow<EntityRecord>,
    P: Fn(&EntityRecord) -> bool,
{
    list.iter().filter(|r| predicate((*r).borrow())).count()
}

fn metric_values<'a, R: Borrow<EntityRecord>>(
    list: &'a [R],
    metric: &'a str,
) -> impl Iterator<Item = f64> + 'a {
    list.iter()
        .filter_map(move |r| r.borrow().metric(metric))
        .filter(|v| v.is_finite())
}

/// Arithmetic sum of `metric`. Non-finite values are skipped.
pub fn sum<R: Borrow<EntityRecord>>(list: &[R], metric: &str) -> f64 {
    metric_values(list, metric).sum()
}

/// Mean of `metric` over the records that carry it.
pub fn average<R: Borrow<EntityRecord>>(list: &[R], metric: &str) -> Average {
    let (total, n) = metric_values(list, metric).fold((0.0, 0usize), |(t, n), v| (t + v, n + 1));
    if n == 0 {
        Average::NotApplicable
    } else {
        Average::Value(total / n as f64)
    }
}

pub fn min<R: Borrow<EntityRecord>>(list: &[R], metric: &str) -> Option<f64> {
    metric_values(list, metric).reduce(f64::min)
}

pub fn max<R: Borrow<EntityRecord>>(list: &[R], metric: &str) -> Option<f64> {
    metric_values(list, metric).reduce(f64::max)
}

/// `part` as a percentage of `whole`. Zero when `whole` is zero or either
/// input is not finite.
pub fn percentage_of_total(part: f64, whole: f64) -> f64 {
    if whole == 0.0 || !part.is_finite() || !whole.is_finite() {
        return 0.0;
    }
    let pct = part / whole * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

/// Round for display, like the dashboard's fixed-decimal formatting.
pub fn round_to(value: f64, decimals: u8) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(i32::from(decimals.min(15)));
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Count of records per value of a dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

/// Count records per category value, in first-seen order.
///
/// Records without the dimension are grouped under an empty value at the end.
pub fn breakdown<R: Borrow<EntityRecord>>(list: &[R], dimension: &str) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut missing = 0usize;
    for record in list {
        match record.borrow().category(dimension) {
            Some(value) => match buckets.iter_mut().find(|b| b.value == value) {
                Some(bucket) => bucket.count += 1,
                None => buckets.push(Bucket {
                    value: value.to_string(),
                    count: 1,
                    percentage: 0.0,
                }),
            },
            None => missing += 1,
        }
    }
    if missing > 0 {
        buckets.push(Bucket {
            value: String::new(),
            count: missing,
            percentage: 0.0,
        });
    }
    let total = list.len() as f64;
    for bucket in &mut buckets {
        bucket.percentage = percentage_of_total(bucket.count as f64, total);
    }
    buckets
}

/// The usual stat-card bundle for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub metric: String,
    pub count: usize,
    pub sum: f64,
    pub average: Average,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Summary {
    pub fn of<R: Borrow<EntityRecord>>(list: &[R], metric: &str) -> Self {
        let summary = Self {
            metric: metric.to_string(),
            count: list.len(),
            sum: sum(list, metric),
            average: average(list, metric),
            min: min(list, metric),
            max: max(list, metric),
        };
        tracing::debug!(
            metric,
            count = summary.count,
            sum = summary.sum,
            "computed summary"
        );
        summary
    }
}
