use crate::attributes::{dimension_spec, validate};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::{apply_filter, DimensionChoice, FilterState};
use crate::model::{EntityKind, EntityList};
use crate::sort::{sort_records, SortSpec};
use crate::store::DataStore;

/// Lists the records of `kind` that pass `filter`, optionally sorted.
///
/// Data problems (duplicate ids, undeclared category values, filters on
/// dimensions the kind does not declare) are reported as warnings and never
/// stop the listing.
pub fn run<S: DataStore>(
    store: &S,
    kind: EntityKind,
    filter: &FilterState,
    sort: Option<&SortSpec>,
) -> Result<CmdResult> {
    let list = store.list(kind)?;
    let mut result = CmdResult::default();

    report_data_problems(&list, &mut result);
    report_filter_problems(kind, filter, &mut result);

    let mut rows = apply_filter(&list.records, filter);
    if let Some(spec) = sort {
        sort_records(&mut rows, spec);
    }

    if rows.is_empty() {
        result.add_message(CmdMessage::info(no_results_message(&list, filter)));
    }

    Ok(result.with_listed(rows.into_iter().cloned().collect()))
}

fn no_results_message(list: &EntityList, filter: &FilterState) -> String {
    if list.is_empty() {
        format!("No {} yet", list.kind.slug())
    } else if filter.is_unconstrained() {
        format!("No {} to show", list.kind.slug())
    } else {
        format!("No {} match the current filters", list.kind.slug())
    }
}

fn report_data_problems(list: &EntityList, result: &mut CmdResult) {
    for id in list.duplicate_ids() {
        tracing::warn!(kind = %list.kind, %id, "duplicate id in list");
        result.add_message(CmdMessage::warning(format!(
            "Duplicate {} id {}",
            list.kind.label(),
            id
        )));
    }
    for record in &list.records {
        for problem in validate(list.kind, record) {
            tracing::warn!(kind = %list.kind, id = %record.id, %problem, "unknown category");
        }
    }
}

fn report_filter_problems(kind: EntityKind, filter: &FilterState, result: &mut CmdResult) {
    for (dimension, choice) in &filter.dimensions {
        let DimensionChoice::Value(value) = choice else {
            continue;
        };
        match dimension_spec(kind, dimension) {
            None => result.add_message(CmdMessage::warning(format!(
                "{} have no '{}' dimension",
                capitalize(kind.slug()),
                dimension
            ))),
            Some(spec) if !spec.accepts(value) => {
                result.add_message(CmdMessage::warning(format!(
                    "'{}' is not a known {} (expected one of: {})",
                    value,
                    dimension,
                    spec.values.join(", ")
                )))
            }
            Some(_) => {}
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
