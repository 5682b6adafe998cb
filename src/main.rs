use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use step_palette::catalog::{assemble, InsertionContext, SelectableElement, StaticCatalog};
use step_palette::config::{self, PaletteConfig};
use step_palette::engine::{CategoryToken, EngineOptions};
use step_palette::logging;
use step_palette::preferences::JsonPreferenceStore;
use step_palette::selector::{Selector, SelectorView};

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse the step palette for a route insertion point", long_about = None)]
struct Cli {
    /// Catalog JSON file (`{"elements": [...]}`)
    #[arg(long, value_name = "FILE")]
    catalog: PathBuf,

    /// Config file (default: ~/.step-palette/config.json)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Preference file (overrides the config)
    #[arg(long, value_name = "FILE")]
    preferences: Option<PathBuf>,

    /// Parent definition; omit to pick a route source
    #[arg(long)]
    parent: Option<String>,

    /// The insertion point does not accept steps with nested step lists
    #[arg(long)]
    no_nested: bool,

    /// Only these category toggles (repeatable); default is every available toggle
    #[arg(long = "toggle", value_name = "TOKEN")]
    toggles: Vec<String>,

    /// Free-text query
    #[arg(long, default_value = "")]
    query: String,

    /// Only custom snippets
    #[arg(long)]
    custom_only: bool,

    /// Print the view as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the palette (default)
    View,
    /// Choose an element and pin it
    Select { identity: String },
    /// Remove an element from the pinned list
    Unpin { identity: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => config::load_config(),
    };

    let mut selector = build_selector(&cli, &config)?;
    selector.open()?;

    if !cli.toggles.is_empty() {
        for token in CategoryToken::ALL {
            selector.set_toggle(token, false);
        }
        for raw in &cli.toggles {
            let token: CategoryToken = raw.parse()?;
            selector.set_toggle(token, true);
        }
    }
    selector.set_query(cli.query.as_str());
    selector.set_custom_only(cli.custom_only);

    match cli.command.unwrap_or(Command::View) {
        Command::View => {
            let view = selector.view()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_view(&view);
            }
        }
        Command::Select { identity } => {
            let element = find(&selector, &identity)?;
            let mut sink = |e: &SelectableElement, ctx: &InsertionContext| {
                println!("selected {} ({})", e.title, ctx.parent.as_deref().unwrap_or("route"));
            };
            selector
                .select(&element, &mut sink)
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
        }
        Command::Unpin { identity } => {
            let element = find(&selector, &identity)?;
            if selector.unpin(&element)? {
                println!("unpinned {}", element.title);
            } else {
                println!("{} was not pinned", element.title);
            }
        }
    }
    Ok(())
}

fn build_selector(cli: &Cli, config: &PaletteConfig) -> Result<Selector<JsonPreferenceStore>> {
    let catalog = StaticCatalog::load(&cli.catalog)
        .with_context(|| format!("Failed to load catalog {}", cli.catalog.display()))?;

    let context = InsertionContext {
        parent: cli.parent.clone(),
        accepts_nested_steps: !cli.no_nested,
    };
    let elements = assemble(
        &catalog,
        &context,
        &config.blocklist(),
        &config.specialized_prefix,
    )?;

    let store = match cli.preferences.clone().or_else(|| config.preferences_path()) {
        Some(path) => JsonPreferenceStore::open(&path)
            .with_context(|| format!("Failed to open preferences {}", path.display()))?,
        None => JsonPreferenceStore::open_default().with_context(|| {
            format!(
                "Failed to open preferences {}",
                JsonPreferenceStore::default_path().display()
            )
        })?,
    };

    info!(elements = elements.len(), parent = ?context.parent, "Palette assembled");
    Ok(Selector::new(
        context,
        elements,
        store,
        EngineOptions::from_config(config),
    ))
}

fn find(selector: &Selector<JsonPreferenceStore>, identity: &str) -> Result<Arc<SelectableElement>> {
    match selector.find(identity) {
        Some(element) => Ok(element),
        None => bail!("No element '{}' in this context", identity),
    }
}

fn print_view(view: &SelectorView) {
    println!("{}", view.title);
    let toggles: Vec<String> = view
        .toggles
        .iter()
        .map(|t| {
            let mark = if t.selected { "x" } else { " " };
            format!("[{}] {} ({})", mark, t.label, t.count)
        })
        .collect();
    println!("{}", toggles.join("  "));

    if !view.fast.is_empty() {
        println!();
        println!("Pinned:");
        for element in &view.fast {
            println!("  * {}", element.title);
        }
    }

    println!();
    for element in &view.elements {
        if element.description.is_empty() {
            println!("  {}", element.title);
        } else {
            println!("  {} - {}", element.title, element.description);
        }
    }
}
