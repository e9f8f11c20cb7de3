//! # Shopdeck CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/shopdeck/`: Core library: filtering, sorting, aggregation, storage
//! - `crates/shopdeck-cli/`: This CLI tool, depends on the `shopdeck` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/shopdeck-cli/src/cli/)                   │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config, logging and theme wiring + dispatch (commands.rs)│
//! │  - Terminal rendering with console styles (render.rs)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/shopdeck/src/api.rs)                     │
//! │  - Normalizes string inputs into filters and records        │
//! │  - Dispatches to command modules                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI plays the part of one dashboard screen: it loads a list, applies
//! the user's filter, and prints the rows and stat cards.
//!
//! ## Testing Approach
//!
//! - **Library**: heavy unit and property testing.
//! - **CLI (`tests/cli.rs`)**: runs the real binary against a temporary data
//!   directory and checks its output.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
