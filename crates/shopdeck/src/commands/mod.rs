//! # Command Layer
//!
//! This module contains the **core business logic** of shopdeck. Each command lives in
//! its own submodule and implements pure Rust functions that operate on a [`DataStore`].
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Load the entity list from the store
//! - Compose filtering, sorting and aggregation
//! - Return a structured [`CmdResult`] with rows, stats and messages
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O** beyond the store: no stdout, stderr or terminal concerns
//! - **Argument parsing**: That's the CLI layer's job
//! - **User interaction**: No prompts or confirmations
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `listed`: Records to display, already filtered and sorted
//! - `affected`: Records a mutation touched
//! - `summary` / `breakdowns`: Aggregations for stat cards
//! - `messages`: Structured messages with levels (info, success, warning, error)
//!
//! An empty `listed` with an info message is the "no results" path; UIs render
//! their placeholder from it rather than from an error.
//!
//! ## Mutation Contract
//!
//! Mutations never report success they did not get. A store failure comes back
//! as [`ShopdeckError::MutationFailed`](crate::error::ShopdeckError::MutationFailed).
//! A success carries a success message and the refreshed full list in `listed`,
//! so the caller can re-apply its own filter without a second round trip.
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests run
//! against `InMemoryStore` and cover every branch, including failing writes.
//!
//! ## Command Modules
//!
//! - [`list`]: Filtered, sorted rows
//! - [`stats`]: Stat-card aggregations
//! - [`mutate`]: Add, edit and delete records
//! - [`export`]: Serialize the filtered rows

use crate::aggregate::{Bucket, Summary};
use crate::model::EntityRecord;
use serde::Serialize;

pub mod export;
pub mod list;
pub mod mutate;
pub mod stats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Per-dimension counts shown next to a stat card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub dimension: String,
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub listed: Vec<EntityRecord>,
    pub affected: Vec<EntityRecord>,
    pub summary: Option<Summary>,
    pub breakdowns: Vec<Breakdown>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, records: Vec<EntityRecord>) -> Self {
        self.listed = records;
        self
    }

    pub fn with_affected(mut self, records: Vec<EntityRecord>) -> Self {
        self.affected = records;
        self
    }

    /// True when the "no results" placeholder should be shown.
    pub fn is_empty_result(&self) -> bool {
        self.listed.is_empty()
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
