//! # Rendering Module
//!
//! Turns `CmdResult`s into terminal text.
//!
//! Layout calculations (column widths, truncation, alignment) use display
//! width from `unicode-width`, so names with accents or CJK characters still
//! line up. Styling is applied after padding, so escape codes never count
//! towards a column's width.

use chrono::{DateTime, Utc};
use console::Style;
use shopdeck::aggregate::{round_to, Summary};
use shopdeck::attributes::{category_style, dimensions_for};
use shopdeck::commands::{Breakdown, CmdMessage, MessageLevel};
use shopdeck::model::{EntityKind, EntityRecord};
use shopdeck::rating;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::styles::Styles;

pub const TITLE_WIDTH: usize = 28;
pub const TIME_WIDTH: usize = 14;
const GAP: &str = "  ";

struct Column {
    header: String,
    cells: Vec<(String, Style)>,
    right_align: bool,
}

impl Column {
    fn width(&self) -> usize {
        self.cells
            .iter()
            .map(|(text, _)| text.width())
            .chain(std::iter::once(self.header.width()))
            .max()
            .unwrap_or(0)
    }
}

/// Renders records as a table: id, title, declared dimensions, metrics and
/// the first timestamp found.
pub fn render_records(
    kind: EntityKind,
    records: &[EntityRecord],
    decimals: u8,
    styles: &Styles,
) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut columns = vec![
        Column {
            header: "ID".into(),
            cells: records
                .iter()
                .map(|r| (r.id.clone(), styles.muted.clone()))
                .collect(),
            right_align: false,
        },
        Column {
            header: title_header(records),
            cells: records
                .iter()
                .map(|r| (truncate_to_width(r.title(), TITLE_WIDTH), styles.text.clone()))
                .collect(),
            right_align: false,
        },
    ];

    for spec in dimensions_for(kind) {
        if !records.iter().any(|r| r.category(spec.name).is_some()) {
            continue;
        }
        columns.push(Column {
            header: spec.name.to_uppercase(),
            cells: records
                .iter()
                .map(|r| match r.category(spec.name) {
                    Some(value) => (
                        value.to_string(),
                        styles.category(category_style(kind, spec.name, value)),
                    ),
                    None => (String::new(), styles.muted.clone()),
                })
                .collect(),
            right_align: false,
        });
    }

    for metric in metric_names(records) {
        columns.push(Column {
            header: metric.to_uppercase(),
            cells: records
                .iter()
                .map(|r| match r.metric(&metric) {
                    Some(v) => (format_metric(v, decimals), styles.text.clone()),
                    None => ("-".to_string(), styles.muted.clone()),
                })
                .collect(),
            right_align: true,
        });
    }

    if let Some(field) = first_timestamp(records) {
        columns.push(Column {
            header: field.to_uppercase(),
            cells: records
                .iter()
                .map(|r| match r.timestamp(&field) {
                    Some(at) => (format_time_ago(at), styles.muted.clone()),
                    None => (String::new(), styles.muted.clone()),
                })
                .collect(),
            right_align: true,
        });
    }

    let widths: Vec<usize> = columns.iter().map(Column::width).collect();
    let mut out = String::new();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(col, &w)| styles.header.apply_to(pad(&col.header, w, col.right_align)).to_string())
        .collect();
    out.push_str(header.join(GAP).trim_end());
    out.push('\n');

    for row in 0..records.len() {
        let line: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(col, &w)| {
                let (text, style) = &col.cells[row];
                style.apply_to(pad(text, w, col.right_align)).to_string()
            })
            .collect();
        out.push_str(line.join(GAP).trim_end());
        out.push('\n');
    }
    out
}

/// Renders the stat card plus one line per breakdown.
pub fn render_summary(
    summary: &Summary,
    breakdowns: &[Breakdown],
    decimals: u8,
    styles: &Styles,
) -> String {
    let mut out = String::new();
    let number = |v: f64| format_metric(v, decimals);
    let optional = |v: Option<f64>| v.map(|x| number(x)).unwrap_or_else(|| "n/a".to_string());

    out.push_str(&format!("{}\n", styles.accent.apply_to(&summary.metric)));
    let rows = [
        ("count", summary.count.to_string()),
        ("sum", number(summary.sum)),
        ("average", optional(summary.average.value())),
        ("min", optional(summary.min)),
        ("max", optional(summary.max)),
    ];
    for (label, value) in rows {
        out.push_str(&format!(
            "  {} {}\n",
            styles.muted.apply_to(pad(label, 8, false)),
            value
        ));
    }

    for breakdown in breakdowns {
        if breakdown.buckets.is_empty() {
            continue;
        }
        let parts: Vec<String> = breakdown
            .buckets
            .iter()
            .map(|b| {
                let name = if b.value.is_empty() { "(none)" } else { b.value.as_str() };
                format!("{} {} ({}%)", name, b.count, round_to(b.percentage, 1))
            })
            .collect();
        out.push_str(&format!(
            "{} {}\n",
            styles.muted.apply_to(format!("{}:", breakdown.dimension)),
            parts.join(", ")
        ));
    }
    out
}

pub fn render_messages(messages: &[CmdMessage], styles: &Styles) -> String {
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &styles.muted,
            MessageLevel::Success => &styles.success,
            MessageLevel::Warning => &styles.warning,
            MessageLevel::Error => &styles.error,
        };
        out.push_str(&style.apply_to(&message.content).to_string());
        out.push('\n');
    }
    out
}

pub fn render_stars(value: f64, styles: &Styles) -> String {
    format!(
        "{} {}\n",
        styles.star.apply_to(rating::render(value, "★", "☆")),
        styles
            .muted
            .apply_to(format!("{}/{}", rating::filled_count(value), rating::MAX_STARS))
    )
}

fn title_header(records: &[EntityRecord]) -> String {
    records
        .iter()
        .find_map(|r| r.searchable.first().map(|(field, _)| field.to_uppercase()))
        .unwrap_or_else(|| "TITLE".to_string())
}

fn metric_names(records: &[EntityRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        for name in record.metrics.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names
}

fn first_timestamp(records: &[EntityRecord]) -> Option<String> {
    records
        .iter()
        .find_map(|r| r.timestamps.keys().next().cloned())
}

fn format_metric(value: f64, decimals: u8) -> String {
    format!("{:.*}", usize::from(decimals), round_to(value, decimals))
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    if right_align {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

/// Cuts `text` to at most `max` columns, ending in an ellipsis when cut.
fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
