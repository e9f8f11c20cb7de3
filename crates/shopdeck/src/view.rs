//! # List Views
//!
//! A [`ListView`] is the state one list screen keeps while it is open: a
//! read-only snapshot of the list and the user's current [`FilterState`].
//!
//! - Every query reads the same snapshot, so stat cards and rows never
//!   disagree about what the list contains.
//! - The snapshot is only swapped by [`ListView::replace_list`], which the
//!   screen calls after a mutation reports the refreshed list. The filter
//!   survives the swap.
//! - Filter changes come from explicit user events and are applied
//!   immediately. Nothing here is persisted.

use std::sync::Arc;

use crate::aggregate::{AggregateScope, Summary};
use crate::filter::{apply_filter, DateRange, DimensionChoice, FilterSpec, FilterState, Filterable};
use crate::model::EntityRecord;
use crate::sort::{sort_records, SortSpec};

#[derive(Debug, Clone)]
pub struct ListView<T> {
    snapshot: Arc<[T]>,
    filter: FilterState,
    sort: Option<SortSpec>,
}

impl<T: Filterable> ListView<T> {
    pub fn new(list: impl Into<Arc<[T]>>) -> Self {
        Self {
            snapshot: list.into(),
            filter: FilterState::new(),
            sort: None,
        }
    }

    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search_text = text.into();
    }

    pub fn select(&mut self, dimension: impl Into<String>, choice: DimensionChoice) {
        self.filter.dimensions.insert(dimension.into(), choice);
    }

    /// Back to `All` for one dimension.
    pub fn clear_dimension(&mut self, dimension: &str) {
        self.filter.dimensions.remove(dimension);
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.filter.date_range = range;
    }

    /// Clears search, dimensions and date range. The sort is kept.
    pub fn reset(&mut self) {
        self.filter = FilterState::new();
    }

    pub fn replace_list(&mut self, list: impl Into<Arc<[T]>>) {
        self.snapshot = list.into();
        tracing::debug!(rows = self.snapshot.len(), "list view refreshed");
    }

    /// Snapshot rows passing the filter, in snapshot order.
    pub fn filtered(&self) -> Vec<&T> {
        apply_filter(&self.snapshot[..], &self.filter)
    }

    /// True when the screen should show its "no results" placeholder.
    pub fn is_empty_result(&self) -> bool {
        !self.snapshot.iter().any(|item| self.filter.matches(item))
    }

    /// True when the snapshot itself is empty, whatever the filter.
    pub fn is_empty_list(&self) -> bool {
        self.snapshot.is_empty()
    }
}

impl ListView<EntityRecord> {
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// The rows to render: filtered, then sorted.
    pub fn visible(&self) -> Vec<&EntityRecord> {
        let mut rows = self.filtered();
        if let Some(spec) = &self.sort {
            sort_records(&mut rows, spec);
        }
        rows
    }

    pub fn stats(&self, metric: &str, scope: AggregateScope) -> Summary {
        match scope {
            AggregateScope::Full => Summary::of(&self.snapshot[..], metric),
            AggregateScope::Filtered => Summary::of(&self.filtered(), metric),
        }
    }
}
