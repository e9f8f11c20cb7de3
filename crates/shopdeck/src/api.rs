//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for shopdeck operations, whichever client drives them.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: `dim=value` pairs, date bounds and record fields
//!   arrive as strings and leave as typed values
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Input Grammar
//!
//! - **Dimension filters**: `status=active`, `priority=all`
//! - **Date bounds**: `2024-05-01` or a full RFC 3339 instant. A bare date
//!   used as an upper bound covers the whole day.
//! - **Record fields**: `name=John Doe`; metrics must parse as numbers.
//!
//! ## Generic Over DataStore
//!
//! `ShopdeckApi<S: DataStore>` is generic over the storage backend:
//! - Production: `ShopdeckApi<FileStore>`
//! - Testing: `ShopdeckApi<InMemoryStore>`

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::aggregate::AggregateScope;
use crate::commands::{self, export::ExportFormat, CmdResult};
use crate::error::{Result, ShopdeckError};
use crate::filter::{DateRange, FilterState};
use crate::model::{EntityKind, EntityRecord};
use crate::sort::SortSpec;
use crate::store::DataStore;
use crate::view::ListView;

/// The main API facade for shopdeck operations.
pub struct ShopdeckApi<S: DataStore> {
    store: S,
}

impl<S: DataStore> ShopdeckApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(
        &self,
        kind: EntityKind,
        filter: &FilterState,
        sort: Option<&SortSpec>,
    ) -> Result<CmdResult> {
        commands::list::run(&self.store, kind, filter, sort)
    }

    pub fn stats(
        &self,
        kind: EntityKind,
        metric: &str,
        filter: &FilterState,
        scope: AggregateScope,
    ) -> Result<CmdResult> {
        commands::stats::run(&self.store, kind, metric, filter, scope)
    }

    pub fn add(&mut self, kind: EntityKind, record: EntityRecord) -> Result<CmdResult> {
        commands::mutate::add(&mut self.store, kind, record)
    }

    pub fn edit(&mut self, kind: EntityKind, record: EntityRecord) -> Result<CmdResult> {
        commands::mutate::edit(&mut self.store, kind, record)
    }

    pub fn delete(&mut self, kind: EntityKind, id: &str) -> Result<CmdResult> {
        commands::mutate::delete(&mut self.store, kind, id)
    }

    pub fn export(
        &self,
        kind: EntityKind,
        filter: &FilterState,
        sort: Option<&SortSpec>,
        format: ExportFormat,
    ) -> Result<String> {
        commands::export::run(&self.store, kind, filter, sort, format)
    }

    /// Opens a list screen on the current contents of `kind`.
    pub fn open_view(&self, kind: EntityKind) -> Result<ListView<EntityRecord>> {
        let list = self.store.list(kind)?;
        Ok(ListView::new(list.records))
    }
}

/// Builds a [`FilterState`] from loosely typed inputs.
pub fn build_filter<I: AsRef<str>>(
    search: Option<&str>,
    dimensions: &[I],
    date_range: Option<DateRange>,
) -> Result<FilterState> {
    let mut filter = FilterState::new();
    if let Some(text) = search {
        filter = filter.with_search(text);
    }
    for input in dimensions {
        let (dimension, choice) = FilterState::parse_dimension(input.as_ref())?;
        filter = filter.with_dimension(dimension, choice);
    }
    if let Some(range) = date_range {
        filter = filter.with_date_range(range);
    }
    Ok(filter)
}

/// Builds a [`DateRange`] on `field` from optional `from`/`to` bounds.
///
/// Returns `None` when neither bound is given.
pub fn parse_date_range(
    field: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Option<DateRange>> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let from = from.map(|s| parse_instant(s, false)).transpose()?;
    let to = to.map(|s| parse_instant(s, true)).transpose()?;
    DateRange::new(field, from, to).map(Some)
}

/// Parses an RFC 3339 instant or a `YYYY-MM-DD` date.
///
/// A bare date is the start of that day, or its last nanosecond when `end_of_day`.
pub fn parse_instant(input: &str, end_of_day: bool) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(input) {
        return Ok(at.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        ShopdeckError::InvalidFilter(format!(
            "'{}' is not a date (expected YYYY-MM-DD or RFC 3339)",
            input
        ))
    })?;
    let time = if end_of_day {
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    }
    .ok_or_else(|| ShopdeckError::InvalidFilter(format!("bad time for '{}'", input)))?;
    Ok(date.and_time(time).and_utc())
}

/// Assembles a record from `name=value` pairs.
pub fn record_from_pairs<I: AsRef<str>>(
    id: &str,
    fields: &[I],
    categories: &[I],
    metrics: &[I],
) -> Result<EntityRecord> {
    let mut record = EntityRecord::new(id);
    for pair in fields {
        let (name, value) = split_pair(pair.as_ref())?;
        record = record.with_text(name, value);
    }
    for pair in categories {
        let (name, value) = split_pair(pair.as_ref())?;
        record = record.with_category(name, value);
    }
    for pair in metrics {
        let (name, value) = split_pair(pair.as_ref())?;
        let number: f64 = value.trim().parse().map_err(|_| {
            ShopdeckError::InvalidRecord(format!("metric '{}' needs a number, got '{}'", name, value))
        })?;
        record = record.with_metric(name, number);
    }
    record.ensure_finite_metrics()?;
    Ok(record)
}

fn split_pair(input: &str) -> Result<(&str, &str)> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(ShopdeckError::InvalidFilter(format!(
            "expected name=value, got '{}'",
            input
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DimensionChoice;
    use crate::store::memory::fixtures::StoreFixture;
    use chrono::TimeZone;

    fn api() -> ShopdeckApi<crate::store::memory::InMemoryStore> {
        ShopdeckApi::new(StoreFixture::new().with_customers().with_orders().store)
    }

    #[test]
    fn build_filter_collects_every_input() {
        let filter = build_filter(Some("john"), &["status=active", "segment=all"], None).unwrap();
        assert_eq!(filter.search_text, "john");
        assert_eq!(
            filter.dimensions.get("status"),
            Some(&DimensionChoice::value("active"))
        );
        assert_eq!(filter.dimensions.get("segment"), Some(&DimensionChoice::All));
    }

    #[test]
    fn build_filter_rejects_bad_pair() {
        assert!(matches!(
            build_filter(None, &["status"], None),
            Err(ShopdeckError::InvalidFilter(_))
        ));
    }

    #[test]
    fn bare_dates_cover_whole_days() {
        let range = parse_date_range("created_at", Some("2024-05-03"), Some("2024-05-03"))
            .unwrap()
            .unwrap();
        let morning = Utc.with_ymd_and_hms(2024, 5, 3, 9, 30, 0).unwrap();
        assert!(range.contains(morning));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 5, 4, 0, 0, 0).unwrap()));
    }

    #[test]
    fn bare_end_date_includes_the_final_fraction_of_a_second() {
        let range = parse_date_range("created_at", None, Some("2024-05-03"))
            .unwrap()
            .unwrap();
        let last_moment = parse_instant("2024-05-03T23:59:59.500Z", false).unwrap();
        assert!(range.contains(last_moment));
        assert!(!range.contains(parse_instant("2024-05-04T00:00:00Z", false).unwrap()));
    }

    #[test]
    fn rfc3339_bounds_are_exact() {
        let at = parse_instant("2024-05-03T09:30:00+02:00", false).unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 5, 3, 7, 30, 0).unwrap());
    }

    #[test]
    fn no_bounds_is_no_range() {
        assert_eq!(parse_date_range("created_at", None, None).unwrap(), None);
        assert!(parse_date_range("created_at", Some("yesterday"), None).is_err());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert!(parse_date_range("created_at", Some("2024-05-07"), Some("2024-05-01")).is_err());
    }

    #[test]
    fn record_from_pairs_types_each_group() {
        let record = record_from_pairs(
            "",
            &["name=Ada Lovelace", "email=ada@example.com"],
            &["status=active"],
            &["total_spent=10.5"],
        )
        .unwrap();
        assert_eq!(record.title(), "Ada Lovelace");
        assert_eq!(record.category("status"), Some("active"));
        assert_eq!(record.metric("total_spent"), Some(10.5));
    }

    #[test]
    fn record_from_pairs_rejects_non_numeric_metric() {
        let err = record_from_pairs::<&str>("x", &[], &[], &["amount=lots"]).unwrap_err();
        assert!(err.to_string().contains("needs a number"));
    }

    #[test]
    fn record_from_pairs_rejects_non_finite_metric() {
        for raw in ["amount=inf", "amount=-inf", "amount=NaN", "amount=1e999"] {
            let err = record_from_pairs::<&str>("o9", &[], &[], &[raw]).unwrap_err();
            assert!(matches!(err, ShopdeckError::InvalidRecord(_)), "{raw}");
            assert!(err.to_string().contains("finite"));
        }
    }

    #[test]
    fn facade_dispatches_to_commands() {
        let mut api = api();
        let filter = FilterState::new().with_search("john");
        assert_eq!(api.list(EntityKind::Customer, &filter, None).unwrap().listed.len(), 1);

        let stats = api
            .stats(EntityKind::Order, "amount", &FilterState::new(), AggregateScope::Full)
            .unwrap();
        assert_eq!(stats.summary.unwrap().count, 3);

        api.delete(EntityKind::Order, "o2").unwrap();
        let view = api.open_view(EntityKind::Order).unwrap();
        assert_eq!(view.visible().len(), 2);
    }

    #[test]
    fn export_matches_list() {
        let api = api();
        let filter = FilterState::new().with_value("priority", "high");
        let out = api
            .export(EntityKind::Order, &filter, None, ExportFormat::JsonLines)
            .unwrap();
        assert_eq!(out.lines().count(), 2);
    }
}
