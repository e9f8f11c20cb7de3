use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "shopdeck",
    bin_name = "shopdeck",
    version,
    disable_help_subcommand = true,
    after_help = "Entity kinds: customers, vendors, orders, products, shipments, transactions,\npayments, invoices, security-events, app-versions, budgets, users"
)]
#[command(about = "Filter, sort and summarize store-management lists", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the JSON lists (overrides config)
    #[arg(long, global = true, help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Config file to load instead of the default location
    #[arg(long, global = true, help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

/// The filter controls every list screen has.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Case-insensitive search over the searchable fields
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category filter, repeatable (e.g. status=active, priority=all)
    #[arg(short, long = "filter", value_name = "DIM=VALUE")]
    pub filters: Vec<String>,

    /// Earliest date, inclusive (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date, inclusive (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub to: Option<String>,

    /// Timestamp the date range applies to
    #[arg(long, default_value = "created_at")]
    pub date_field: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List records, narrowed by search, category and date filters
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Entity kind (e.g. orders, customers)
        kind: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Sort key with optional direction (e.g. amount:desc, name)
        #[arg(long)]
        sort: Option<String>,
    },

    /// Stat cards for one metric plus per-category breakdowns
    #[command(display_order = 2)]
    Stats {
        kind: String,

        /// Metric to summarize (e.g. amount, total_spent)
        #[arg(short, long)]
        metric: String,

        /// Reduce over the filtered rows instead of the full list
        #[arg(long)]
        filtered: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Add a record
    #[command(display_order = 10)]
    Add {
        kind: String,

        /// Record id (a UUID is generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Searchable text field, repeatable (e.g. name="Jane Smith")
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// Category value, repeatable (e.g. status=active)
        #[arg(long = "category", value_name = "DIM=VALUE")]
        categories: Vec<String>,

        /// Numeric metric, repeatable (e.g. amount=42.5)
        #[arg(long = "metric", value_name = "NAME=NUMBER")]
        metrics: Vec<String>,
    },

    /// Delete a record by id
    #[command(alias = "rm", display_order = 11)]
    Delete { kind: String, id: String },

    /// Export the filtered rows
    #[command(display_order = 20)]
    Export {
        kind: String,

        /// json or jsonl
        #[arg(long, default_value = "json")]
        format: String,

        #[arg(long)]
        sort: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Render a 0-5 rating as stars
    #[command(display_order = 30)]
    Rating {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Show storefront category names
    #[command(display_order = 31)]
    Category {
        /// Category slug; all categories when omitted
        slug: Option<String>,

        /// Language tag (e.g. es, fr-CA); defaults to the configured locale
        #[arg(long)]
        locale: Option<String>,
    },

    /// Show or change the theme for this run
    #[command(display_order = 32)]
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },

    /// Show the resolved configuration
    #[command(display_order = 40)]
    Config {
        /// Print a commented sample config file instead
        #[arg(long)]
        gen: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_collects_repeated_filters() {
        let cli = Cli::parse_from([
            "shopdeck", "list", "orders", "-f", "status=pending", "-f", "priority=high", "--sort",
            "amount:desc",
        ]);
        match cli.command {
            Commands::List { kind, filter, sort } => {
                assert_eq!(kind, "orders");
                assert_eq!(filter.filters, vec!["status=pending", "priority=high"]);
                assert_eq!(filter.date_field, "created_at");
                assert_eq!(sort.as_deref(), Some("amount:desc"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["shopdeck", "stats", "orders", "-m", "amount", "--json", "-vv"]);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rating_accepts_negative_values() {
        let cli = Cli::parse_from(["shopdeck", "rating", "-1"]);
        assert!(matches!(cli.command, Commands::Rating { value } if value == -1.0));
    }
}
