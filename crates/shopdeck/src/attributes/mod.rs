//! # Attribute System
//!
//! A uniform view over the fields of an [`EntityRecord`](crate::model::EntityRecord).
//! Instead of every screen hard-coding which of its fields are statuses,
//! which are amounts and which are dates, the attribute system provides:
//!
//! - **Type definitions**: What kinds of values attributes can hold
//! - **Dimension registry**: The finite value set of each categorical facet, per entity kind
//! - **Unified access**: `get_attr()` on records
//! - **Filtering**: Single-attribute predicates that work with any attribute
//!
//! ## Attribute Types
//!
//! | Kind | Examples | Description |
//! |------|----------|-------------|
//! | `Text` | `name`, `email` | Searchable free text |
//! | `Category` | `status`, `priority` | Closed set of values |
//! | `Metric` | `amount`, `rating` | Numbers for aggregation and sorting |
//! | `Timestamp` | `created_at` | Instants for display and date ranges |
//!
//! ## Unknown Categories
//!
//! Data sources are trusted: a record carrying a value outside its dimension's
//! declared set is still listed and still filterable by exact equality. It is
//! reported by [`validate`] and rendered with [`CategoryStyle::Neutral`].
//!
//! ```ignore
//! let filter = AttrFilter::eq("status", AttrValue::Category("active".into()));
//! if filter.matches(&record) { ... }
//! ```

mod filter;
mod spec;
mod value;

pub use filter::{AttrFilter, FilterOp};
pub use spec::{
    category_style, dimension_spec, dimensions_for, validate, AttributeKind, CategoryStyle,
    DimensionSpec,
};
pub use value::AttrValue;
