//! # Shopdeck Architecture
//!
//! Shopdeck is the **list engine behind a store-management dashboard**. Every
//! management screen (customers, orders, payments, security events, ...) shows
//! a list, narrows it with a search box, category dropdowns and date ranges,
//! and derives stat cards from it. This crate is that pattern, written once
//! and tested once. The `shopdeck` binary is just one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (shopdeck-cli crate)                                   │
//! │  - Parses arguments, renders tables, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                      View (view.rs)     │
//! │  - Thin facade over commands             - Per-screen state │
//! │  - Normalizes string inputs              - Snapshot + filter│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - list, stats, add/edit/delete, export                     │
//! │  - Returns CmdResult: rows, summaries, messages             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (filter, sort, aggregate, attributes, model)          │
//! │  - Pure functions over entity lists                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Screens Don't Own Data
//!
//! A screen reads a snapshot of its list, filters it locally and derives its
//! numbers from that same snapshot. Changes go to the [`store::DataStore`];
//! the screen then takes the refreshed list it is handed back. A failed
//! change is always reported as a failure.
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never exits the
//! process and never assumes a terminal. Diagnostics go through `tracing`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`view`]: Per-screen filter state over a list snapshot
//! - [`filter`]: Search, dimension and date-range predicates
//! - [`sort`]: Stable sorting with fixed tie-breaks
//! - [`aggregate`]: Counts, sums, averages, percentages, breakdowns
//! - [`attributes`]: Dimension registry and attribute values
//! - [`model`]: Core data types (`EntityRecord`, `EntityKind`, `EntityList`)
//! - [`store`]: Storage abstraction and implementations
//! - [`rating`]: Star-rating rendering
//! - [`theme`]: Process-wide light/dark theme
//! - [`locale`]: Storefront category names
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod aggregate;
pub mod api;
pub mod attributes;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod locale;
pub mod model;
pub mod rating;
pub mod sort;
pub mod store;
pub mod theme;
pub mod view;
