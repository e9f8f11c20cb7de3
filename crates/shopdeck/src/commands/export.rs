use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ShopdeckError};
use crate::filter::{apply_filter, FilterState};
use crate::model::EntityKind;
use crate::sort::{sort_records, SortSpec};
use crate::store::DataStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// A single pretty-printed JSON array
    #[default]
    Json,
    /// One compact JSON object per line
    JsonLines,
}

impl FromStr for ExportFormat {
    type Err = ShopdeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "jsonl" | "jsonlines" | "ndjson" => Ok(ExportFormat::JsonLines),
            other => Err(ShopdeckError::Config(format!(
                "unknown export format '{}', expected json or jsonl",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => f.write_str("json"),
            ExportFormat::JsonLines => f.write_str("jsonl"),
        }
    }
}

/// Serializes exactly the rows a `list` with the same arguments would show.
pub fn run<S: DataStore>(
    store: &S,
    kind: EntityKind,
    filter: &FilterState,
    sort: Option<&SortSpec>,
    format: ExportFormat,
) -> Result<String> {
    let list = store.list(kind)?;
    let mut rows = apply_filter(&list.records, filter);
    if let Some(spec) = sort {
        sort_records(&mut rows, spec);
    }
    tracing::debug!(%kind, %format, rows = rows.len(), "exporting");

    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        ExportFormat::JsonLines => {
            let mut out = String::new();
            for row in rows {
                out.push_str(&serde_json::to_string(row)?);
                out.push('\n');
            }
            Ok(out)
        }
    }
}
