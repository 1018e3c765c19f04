//! Arcade Hub shell
//!
//! A line-oriented frontend over the catalog controller. Reads one command
//! per line from stdin, prints the resulting game list and any notification.

use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{error, info};

use arcade_catalog::{
    ActionOutcome, CatalogController, CatalogStore, Collection, FieldUpdate, FilterPatch, GameRef,
    KeyValueStore, MemoryStore, SortOption, SqliteStore, sample,
};
use arcade_config::{HubConfig, StorageBackend};

const HELP: &str = "\
Commands:
  list                         show the current result view
  search <term>                search titles, descriptions and tags (empty clears)
  filter key=value ...         category=, tag=, rating= (empty value clears a field)
  clear                        clear all filters
  sort <popular|newest|rating|views>
  category <name|all>          browse one category
  fav <id>                     toggle favorite
  play <id>                    play a game
  random                       play a random game
  show <all|featured|favorites|recent|category name>
  categories | tags            list catalog facets
  help | quit";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
enum Command {
    List,
    Search(String),
    Filter(FilterPatch),
    ClearFilters,
    Sort(SortOption),
    Category(String),
    Favorite(String),
    Play(String),
    Random,
    Show(Collection),
    Categories,
    Tags,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line
    fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word.to_lowercase().as_str() {
            "" | "list" | "ls" => Command::List,
            "search" | "/" => Command::Search(rest.to_string()),
            "filter" => Command::Filter(parse_filter(rest)?),
            "clear" => Command::ClearFilters,
            "sort" => Command::Sort(rest.parse().map_err(anyhow::Error::msg)?),
            "category" | "cat" => Command::Category(required(rest, "category")?),
            "fav" | "favorite" => Command::Favorite(required(rest, "game id")?),
            "play" => Command::Play(required(rest, "game id")?),
            "random" => Command::Random,
            "show" => Command::Show(parse_collection(rest)),
            "categories" => Command::Categories,
            "tags" => Command::Tags,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("Unknown command: {} (try 'help')", other),
        };

        Ok(command)
    }
}

fn required(arg: &str, what: &str) -> Result<String> {
    if arg.is_empty() {
        bail!("Missing {}", what);
    }
    Ok(arg.to_string())
}

/// Parse `key=value` pairs into a sticky filter update
fn parse_filter(args: &str) -> Result<FilterPatch> {
    let mut patch = FilterPatch::default();

    for pair in args.split_whitespace() {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Expected key=value, got '{}'", pair))?;

        match key {
            "category" => patch.category = text_update(value),
            "tag" => patch.tag = text_update(value),
            "rating" if value.is_empty() => patch.rating = FieldUpdate::Clear,
            "rating" => {
                let rating: f64 = value
                    .parse()
                    .with_context(|| format!("Invalid rating '{}'", value))?;
                if !rating.is_finite() {
                    bail!("Invalid rating '{}'", value);
                }
                patch.rating = FieldUpdate::Set(rating);
            }
            other => bail!("Unknown filter field: {}", other),
        }
    }

    Ok(patch)
}

fn text_update(value: &str) -> FieldUpdate<String> {
    if value.is_empty() {
        FieldUpdate::Clear
    } else {
        FieldUpdate::Set(value.to_string())
    }
}

fn parse_collection(arg: &str) -> Collection {
    match arg.to_lowercase().as_str() {
        "" | "all" => Collection::All,
        "featured" | "hot" => Collection::Featured,
        "favorites" | "favs" => Collection::Favorites,
        "recent" | "history" => Collection::RecentlyPlayed,
        _ => Collection::Category(arg.to_string()),
    }
}

/// Application state
struct Shell {
    /// Catalog controller
    controller: CatalogController,

    /// Should quit
    should_quit: bool,
}

impl Shell {
    /// Create the shell from configuration
    fn new(config: &HubConfig) -> Result<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => CatalogStore::load(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?,
            None => sample::catalog()?,
        };

        let store: Box<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Sqlite => {
                let path = &config.storage.path;
                // Create directory if needed
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                Box::new(
                    SqliteStore::open(path)
                        .with_context(|| format!("Failed to open {}", path.display()))?,
                )
            }
            StorageBackend::Memory => Box::new(MemoryStore::new()),
        };

        let mut controller =
            CatalogController::new(Arc::new(catalog), store, config.history.capacity)?;
        if let Some(seed) = config.random_seed {
            controller = controller.with_seed(seed);
        }

        Ok(Self {
            controller,
            should_quit: false,
        })
    }

    /// Run one command, writing its output
    fn handle_command(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::List => {
                let view = self.controller.view();
                self.print_games(out, &view)?;
            }
            Command::Search(term) => {
                let outcome = self.controller.on_search(&term);
                self.print_outcome(out, &outcome)?;
            }
            Command::Filter(patch) => {
                let outcome = self.controller.on_filter(patch);
                self.print_outcome(out, &outcome)?;
            }
            Command::ClearFilters => {
                let outcome = self.controller.on_clear_filters();
                self.print_outcome(out, &outcome)?;
            }
            Command::Sort(option) => {
                let outcome = self.controller.on_sort(option);
                self.print_outcome(out, &outcome)?;
            }
            Command::Category(category) => {
                let outcome = self.controller.on_select_category(&category);
                self.print_outcome(out, &outcome)?;
            }
            Command::Favorite(id) => {
                if !self.controller.catalog().contains(&id) {
                    writeln!(out, "No game with id {}", id)?;
                    return Ok(());
                }
                let outcome = self.controller.on_toggle_favorite(&id)?;
                self.print_notification(out, &outcome)?;
            }
            Command::Play(id) => {
                let Some(game) = self.controller.catalog().by_id(&id).cloned() else {
                    writeln!(out, "No game with id {}", id)?;
                    return Ok(());
                };
                let outcome = self.controller.on_play(&game)?;
                self.print_notification(out, &outcome)?;
            }
            Command::Random => {
                let outcome = self.controller.on_random()?;
                self.print_notification(out, &outcome)?;
            }
            Command::Show(collection) => {
                let games = self.controller.collection(&collection);
                self.print_games(out, &games)?;
            }
            Command::Categories => {
                writeln!(out, "{}", self.controller.catalog().categories().join(", "))?;
            }
            Command::Tags => {
                writeln!(out, "{}", self.controller.catalog().tags().join(", "))?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn print_outcome(&self, out: &mut impl Write, outcome: &ActionOutcome) -> Result<()> {
        self.print_notification(out, outcome)?;
        self.print_games(out, &outcome.view)
    }

    fn print_notification(&self, out: &mut impl Write, outcome: &ActionOutcome) -> Result<()> {
        if let Some(notification) = &outcome.notification {
            writeln!(out, "* {}", notification)?;
        }
        Ok(())
    }

    fn print_games(&self, out: &mut impl Write, games: &[GameRef]) -> Result<()> {
        if games.is_empty() {
            writeln!(out, "No games found. Try adjusting your search or filters.")?;
            return Ok(());
        }

        for game in games {
            let mut badges = String::new();
            if game.is_new {
                badges.push_str(" [New]");
            }
            if game.is_hot {
                badges.push_str(" [Hot]");
            }
            let heart = if self.controller.is_favorite(&game.id) { "♥" } else { " " };

            writeln!(
                out,
                "{} {:>3}  {:<20} {:<8} {:.1}★ {:>6} views {:>4} comments{}",
                heart,
                game.id,
                game.title,
                game.category,
                game.rating,
                game.views,
                game.comments,
                badges
            )?;
        }
        Ok(())
    }
}

/// Warn-level subscriber used until the configured one is installed
fn bootstrap_subscriber<W>(make_writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'a> tracing_subscriber::fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_target(false)
        .with_writer(make_writer)
        .finish()
}

/// Setup logging to stderr
fn setup_logging(default_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    // Load configuration; the log level lives in it, so loading reports
    // through a bootstrap subscriber
    let config = tracing::subscriber::with_default(bootstrap_subscriber(io::stderr), || {
        match std::env::args_os().nth(1) {
            Some(path) => HubConfig::load(path.as_ref()),
            None => HubConfig::load_default(),
        }
    })?;

    // Setup logging
    setup_logging(&config.logging.level);

    info!("Arcade Hub starting...");

    let mut shell = Shell::new(&config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "Arcade Hub - type 'help' for commands")?;

    // Main loop
    for line in stdin.lock().lines() {
        let line = line?;

        match Command::parse(&line) {
            Ok(command) => {
                if let Err(e) = shell.handle_command(command, &mut stdout) {
                    error!("Command failed: {:#}", e);
                    writeln!(stdout, "Error: {:#}", e)?;
                }
            }
            Err(e) => writeln!(stdout, "{}", e)?,
        }

        if shell.should_quit {
            break;
        }
    }

    info!("Arcade Hub shutting down");
    Ok(())
}
