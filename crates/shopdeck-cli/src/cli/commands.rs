//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Load config, install logging, settle the theme
//! 3. **Dispatch**: Route each command to the API facade
//! 4. **Output Formatting**: Styled tables, or JSON with `--json`
//! 5. **Error Handling**: Errors bubble up to `main`, which prints them and exits 1

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Parser;
use serde::Serialize;
use shopdeck::aggregate::AggregateScope;
use shopdeck::api::{self, ShopdeckApi};
use shopdeck::commands::export::ExportFormat;
use shopdeck::commands::CmdResult;
use shopdeck::config::{self, ShopdeckConfig};
use shopdeck::filter::FilterState;
use shopdeck::locale::{self, Locale};
use shopdeck::model::EntityKind;
use shopdeck::sort::SortSpec;
use shopdeck::store::fs::FileStore;
use shopdeck::theme::{self, Theme};
use tracing_subscriber::EnvFilter;

use super::render;
use super::setup::{Cli, Commands, FilterArgs, ThemeAction};
use super::styles;

struct Context {
    config: ShopdeckConfig,
    data_dir: Option<PathBuf>,
    json: bool,
}

impl Context {
    fn api(&self) -> Result<ShopdeckApi<FileStore>> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => self.config.data_dir()?,
        };
        tracing::debug!(data_dir = %dir.display(), "opening store");
        Ok(ShopdeckApi::new(FileStore::new(dir)))
    }

    fn decimals(&self) -> u8 {
        self.config.decimals
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    init_theme(&config)?;

    let ctx = Context {
        config,
        data_dir: cli.data_dir,
        json: cli.json,
    };

    match cli.command {
        Commands::List { kind, filter, sort } => handle_list(&ctx, &kind, &filter, sort.as_deref()),
        Commands::Stats {
            kind,
            metric,
            filtered,
            filter,
        } => handle_stats(&ctx, &kind, &metric, filtered, &filter),
        Commands::Add {
            kind,
            id,
            fields,
            categories,
            metrics,
        } => handle_add(&ctx, &kind, id.as_deref(), &fields, &categories, &metrics),
        Commands::Delete { kind, id } => handle_delete(&ctx, &kind, &id),
        Commands::Export {
            kind,
            format,
            sort,
            filter,
        } => handle_export(&ctx, &kind, &format, sort.as_deref(), &filter),
        Commands::Rating { value } => handle_rating(&ctx, value),
        Commands::Category { slug, locale } => {
            handle_category(&ctx, slug.as_deref(), locale.as_deref())
        }
        Commands::Theme { action } => handle_theme(&ctx, action),
        Commands::Config { gen } => handle_config(&ctx, gen),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<ShopdeckConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config::default_config_path()?,
    };
    config::load(&path).with_context(|| format!("loading {}", path.display()))
}

fn init_theme(config: &ShopdeckConfig) -> Result<()> {
    let theme = match config.theme()? {
        Some(theme) => theme,
        None => detect_theme(),
    };
    let store = theme::global();
    store.subscribe(|theme| tracing::debug!(%theme, "theme changed"));
    store.set(theme);
    Ok(())
}

fn detect_theme() -> Theme {
    match dark_light::detect() {
        dark_light::Mode::Dark => Theme::Dark,
        _ => Theme::Light,
    }
}

fn parse_kind(kind: &str) -> Result<EntityKind> {
    Ok(kind.parse::<EntityKind>()?)
}

fn build_filter(args: &FilterArgs) -> Result<FilterState> {
    let range = api::parse_date_range(&args.date_field, args.from.as_deref(), args.to.as_deref())?;
    Ok(api::build_filter(args.search.as_deref(), &args.filters, range)?)
}

fn parse_sort(sort: Option<&str>) -> Result<Option<SortSpec>> {
    Ok(sort.map(SortSpec::parse).transpose()?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_result(ctx: &Context, kind: EntityKind, result: &CmdResult, show_rows: bool) -> Result<()> {
    if ctx.json {
        return print_json(result);
    }
    let styles = styles::current();
    if show_rows {
        print!(
            "{}",
            render::render_records(kind, &result.listed, ctx.decimals(), styles)
        );
    }
    if let Some(summary) = &result.summary {
        print!(
            "{}",
            render::render_summary(summary, &result.breakdowns, ctx.decimals(), styles)
        );
    }
    print!("{}", render::render_messages(&result.messages, styles));
    Ok(())
}

fn handle_list(ctx: &Context, kind: &str, args: &FilterArgs, sort: Option<&str>) -> Result<()> {
    let kind = parse_kind(kind)?;
    let filter = build_filter(args)?;
    let sort = parse_sort(sort)?;
    let result = ctx.api()?.list(kind, &filter, sort.as_ref())?;
    print_result(ctx, kind, &result, true)
}

fn handle_stats(
    ctx: &Context,
    kind: &str,
    metric: &str,
    filtered: bool,
    args: &FilterArgs,
) -> Result<()> {
    let kind = parse_kind(kind)?;
    let filter = build_filter(args)?;
    let scope = if filtered {
        AggregateScope::Filtered
    } else {
        ctx.config.aggregate_scope()?
    };
    let result = ctx.api()?.stats(kind, metric, &filter, scope)?;
    print_result(ctx, kind, &result, false)
}

fn handle_add(
    ctx: &Context,
    kind: &str,
    id: Option<&str>,
    fields: &[String],
    categories: &[String],
    metrics: &[String],
) -> Result<()> {
    let kind = parse_kind(kind)?;
    let record = api::record_from_pairs(id.unwrap_or_default(), fields, categories, metrics)?;
    let result = ctx.api()?.add(kind, record)?;
    print_result(ctx, kind, &result, false)
}

fn handle_delete(ctx: &Context, kind: &str, id: &str) -> Result<()> {
    let kind = parse_kind(kind)?;
    let result = ctx.api()?.delete(kind, id)?;
    print_result(ctx, kind, &result, false)
}

fn handle_export(
    ctx: &Context,
    kind: &str,
    format: &str,
    sort: Option<&str>,
    args: &FilterArgs,
) -> Result<()> {
    let kind = parse_kind(kind)?;
    let format: ExportFormat = format.parse()?;
    let filter = build_filter(args)?;
    let sort = parse_sort(sort)?;
    let out = ctx.api()?.export(kind, &filter, sort.as_ref(), format)?;
    match format {
        ExportFormat::Json => println!("{}", out),
        ExportFormat::JsonLines => print!("{}", out),
    }
    Ok(())
}

#[derive(Serialize)]
struct RatingOutput {
    rating: f64,
    filled: usize,
    stars: [bool; shopdeck::rating::MAX_STARS],
}

fn handle_rating(ctx: &Context, value: f64) -> Result<()> {
    if ctx.json {
        return print_json(&RatingOutput {
            rating: value,
            filled: shopdeck::rating::filled_count(value),
            stars: shopdeck::rating::stars(value),
        });
    }
    print!("{}", render::render_stars(value, styles::current()));
    Ok(())
}

fn handle_category(ctx: &Context, slug: Option<&str>, tag: Option<&str>) -> Result<()> {
    let locale = match tag {
        Some(tag) => Locale::from_tag(tag),
        None => ctx.config.locale(),
    };
    let names: Vec<(String, String)> = match slug {
        Some(slug) => vec![(slug.to_string(), locale::category_name(slug, locale))],
        None => locale::category_slugs()
            .map(|slug| (slug.to_string(), locale::category_name(slug, locale)))
            .collect(),
    };

    if ctx.json {
        let map: serde_json::Map<String, serde_json::Value> = names
            .into_iter()
            .map(|(slug, name)| (slug, serde_json::Value::String(name)))
            .collect();
        return print_json(&map);
    }
    let styles = styles::current();
    match slug {
        Some(_) => {
            for (_, name) in names {
                println!("{}", name);
            }
        }
        None => {
            for (slug, name) in names {
                println!("{}  {}", styles.muted.apply_to(format!("{:<12}", slug)), name);
            }
        }
    }
    Ok(())
}

fn handle_theme(ctx: &Context, action: Option<ThemeAction>) -> Result<()> {
    let store = theme::global();
    match action {
        Some(ThemeAction::Light) => {
            store.set(Theme::Light);
        }
        Some(ThemeAction::Dark) => {
            store.set(Theme::Dark);
        }
        Some(ThemeAction::Toggle) => {
            store.toggle();
        }
        None => {}
    }
    let current = store.current();
    if ctx.json {
        return print_json(&serde_json::json!({ "theme": current }));
    }
    println!("{}", styles::current().accent.apply_to(current));
    Ok(())
}

fn handle_config(ctx: &Context, gen: bool) -> Result<()> {
    if gen {
        print!("{}", config::template());
        return Ok(());
    }
    if ctx.json {
        return print_json(&ctx.config);
    }
    let data_dir = match &ctx.data_dir {
        Some(dir) => dir.clone(),
        None => ctx.config.data_dir()?,
    };
    println!("data_dir = {}", data_dir.display());
    println!(
        "theme = {}",
        ctx.config.theme.as_deref().unwrap_or("(detected)")
    );
    println!("locale = {}", ctx.config.locale);
    println!("decimals = {}", ctx.config.decimals);
    println!("aggregate_scope = {}", ctx.config.aggregate_scope);
    Ok(())
}
