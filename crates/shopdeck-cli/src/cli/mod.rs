//! # CLI Behavior
//!
//! This is **one possible UI client** for shopdeck, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! ## One Command, One Screen
//!
//! `shopdeck list orders --search john --filter status=pending` does what an
//! orders screen does: load the list, narrow it, render the survivors. When
//! nothing survives, the "no results" message is printed instead of a table.
//!
//! ## Output Modes
//!
//! - Default: styled tables. Colors follow the light/dark theme, which comes
//!   from config or is detected from the terminal.
//! - `--json`: the raw `CmdResult` as JSON, for scripting.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Tables, stat cards and messages
//! - `setup`: Argument parsing via clap
//! - `styles`: Mapping from palette colors to terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
