//! # Stat Cards
//!
//! Computes the summary for one metric plus a breakdown per declared
//! dimension. By default the reduction runs over the **full** list, whatever
//! filter is active, matching the dashboard's global KPIs; pass
//! [`AggregateScope::Filtered`] to reduce over the visible rows instead.

use crate::aggregate::{breakdown, AggregateScope, Summary};
use crate::attributes::dimensions_for;
use crate::commands::{Breakdown, CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::{apply_filter, FilterState};
use crate::model::{EntityKind, EntityRecord};
use crate::store::DataStore;

pub fn run<S: DataStore>(
    store: &S,
    kind: EntityKind,
    metric: &str,
    filter: &FilterState,
    scope: AggregateScope,
) -> Result<CmdResult> {
    let list = store.list(kind)?;
    let visible = apply_filter(&list.records, filter);

    let rows: Vec<&EntityRecord> = match scope {
        AggregateScope::Full => list.records.iter().collect(),
        AggregateScope::Filtered => visible.clone(),
    };

    let mut result = CmdResult::default();
    let summary = Summary::of(&rows, metric);

    if !rows.iter().any(|r| r.metric(metric).is_some()) && !rows.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "No {} carry the '{}' metric",
            kind.slug(),
            metric
        )));
    }

    result.breakdowns = dimensions_for(kind)
        .iter()
        .map(|spec| Breakdown {
            dimension: spec.name.to_string(),
            buckets: breakdown(&rows, spec.name),
        })
        .collect();
    result.summary = Some(summary);

    Ok(result.with_listed(visible.into_iter().cloned().collect()))
}
