//! CLI entry point for the postdeck tool.
//!
//! This binary drives a selection session the way the dashboard does: it loads
//! a destination feed, replays a script of user commands, optionally refreshes
//! the feed, and reports the result.
//!
//! # Usage
//!
//! ```bash
//! postdeck [OPTIONS] <COMMAND>
//!
//! # Show the tri-state of every category after a script
//! postdeck status --feed feed.json --script clicks.json
//!
//! # Refresh the feed and print the create-post batch
//! postdeck plan --feed feed.json --script clicks.json --refresh feed-new.json
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::fmt::Write as _;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pd_core::{Config, CreatePost, FeedEntry, PostConfig, PostDetails, PostRequest};
use pd_select::{Command, RawItem, SelectionHandle, SelectionStore, Snapshot};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Plan a batch of scheduled posts from a categorized destination feed.
#[derive(Parser)]
#[command(name = "postdeck", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON configuration file.
    #[arg(short, long, global = true, env = "POSTDECK_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Inputs shared by every command that runs a session.
#[derive(Args)]
struct SessionArgs {
    /// Destination feed (JSON array of feed entries).
    #[arg(short, long)]
    feed: Utf8PathBuf,

    /// Script of selection commands to replay (JSON array).
    #[arg(short, long)]
    script: Option<Utf8PathBuf>,

    /// Refreshed feed to reconcile after the script.
    #[arg(short, long)]
    refresh: Option<Utf8PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show each category's selection state.
    Status {
        #[command(flatten)]
        session: SessionArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the create-post batch for all selected destinations.
    Plan {
        #[command(flatten)]
        session: SessionArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Title for destinations without their own title.
        #[arg(long)]
        title: Option<String>,

        /// Comment posted under every submission.
        #[arg(long)]
        comment: Option<String>,

        /// Link to the image being posted.
        #[arg(long)]
        image_link: Option<String>,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
}

/// Report output format.
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text.
    Text,
    /// JSON.
    Json,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default. Logs go to
/// stderr so reports on stdout stay machine-readable.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(level)
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Loads the configuration file if one was given, or the defaults.
fn load_config(path: Option<&Utf8Path>) -> color_eyre::Result<Config> {
    match path {
        Some(path) => {
            let config = Config::load(path)?;
            info!(path = %path, "Loaded configuration");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Reads and parses a JSON input file.
fn read_json<T: DeserializeOwned>(path: &Utf8Path, what: &str) -> color_eyre::Result<T> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read {what} {path}: {e}"))?;
    serde_json::from_str(&contents)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to parse {what} {path}: {e}"))
}

/// Turns feed entries into raw items for reconciliation.
///
/// New destinations start with their first flair (or the configured fallback).
/// Destinations already in the store keep whatever the user set.
fn feed_to_raw(entries: Vec<FeedEntry>, post: &PostConfig) -> Vec<RawItem<PostDetails>> {
    entries
        .into_iter()
        .map(|entry| {
            let properties = PostDetails::for_entry(&entry, &post.fallback_flair);
            RawItem {
                section: entry.category,
                name: entry.name,
                properties: Some(properties),
                selected: entry.selected,
            }
        })
        .collect()
}

/// Builds the store, replays the script, and applies the refresh.
fn run_session(
    args: &SessionArgs,
    config: &Config,
) -> color_eyre::Result<SelectionHandle<PostDetails>> {
    let feed: Vec<FeedEntry> = read_json(&args.feed, "feed")?;
    info!(path = %args.feed, destinations = feed.len(), "Loaded feed");

    let store = SelectionStore::from_raw(feed_to_raw(feed, &config.post));
    let mut handle = SelectionHandle::new(store);
    handle.subscribe(|snapshot: &Snapshot<PostDetails>| {
        debug!(
            version = snapshot.version(),
            selected = snapshot.selected_count(),
            "Snapshot published"
        );
    });

    if let Some(path) = &args.script {
        let script: Vec<Command<PostDetails>> = read_json(path, "script")?;
        let total = script.len();
        let mut rejected = 0_usize;
        for (index, command) in script.into_iter().enumerate() {
            let op = command.name();
            if let Err(error) = handle.apply(command) {
                warn!(index, op, %error, "Script command rejected");
                rejected += 1;
            }
        }
        info!(path = %path, total, rejected, "Replayed script");
    }

    if let Some(path) = &args.refresh {
        let feed: Vec<FeedEntry> = read_json(path, "refreshed feed")?;
        let summary = handle.reconcile(feed_to_raw(feed, &config.post));
        info!(
            path = %path,
            retained = summary.retained,
            added = summary.added,
            dropped = summary.dropped,
            skipped = summary.skipped,
            "Refreshed feed"
        );
    }

    Ok(handle)
}

/// Resolves every checked destination into a post request.
fn build_batch(store: &SelectionStore<PostDetails>, batch: &CreatePost) -> Vec<PostRequest> {
    store
        .all_checked()
        .map(|(section, item)| batch.request(section.name(), &item.name, &item.properties))
        .collect()
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Renders the per-category tri-state view.
fn render_status(store: &SelectionStore<PostDetails>) -> String {
    let mut output = String::new();
    for section in store.sections() {
        let selected = section.selected_items().count();
        let _ = writeln!(
            output,
            "{} {} ({selected}/{})",
            section.state().marker(),
            section.name(),
            section.len()
        );
        for item in section.items() {
            let mark = if item.selected { "[x]" } else { "[ ]" };
            let _ = writeln!(
                output,
                "    {mark} {} (flair: {})",
                item.name, item.properties.flair
            );
        }
    }
    let _ = writeln!(
        output,
        "{} of {} destinations selected",
        store.selected_count(),
        store.item_count()
    );
    output
}

/// Renders a batch as text.
fn render_plan(batch: &CreatePost, requests: &[PostRequest]) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{} posts scheduled in {} minutes",
        requests.len(),
        batch.delay_minutes
    );
    for request in requests {
        let tags = request
            .tags
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(
            output,
            "  {}/{} \"{}\" flair={} tags=[{tags}]",
            request.category, request.destination, request.title, request.flair
        );
    }
    output
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> color_eyre::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(|e| color_eyre::eyre::eyre!("Failed to serialize JSON: {}", e))
}

fn write_output(content: &str, output: Option<&Utf8Path>) -> color_eyre::Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
        info!(path = %path, "Report written");
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{content}")?;
        if !content.ends_with('\n') {
            writeln!(handle)?;
        }
    }
    Ok(())
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn run_status(
    session: &SessionArgs,
    format: OutputFormat,
    config: &Config,
) -> color_eyre::Result<()> {
    let handle = run_session(session, config)?;
    let content = match format {
        OutputFormat::Text => render_status(handle.store()),
        OutputFormat::Json => to_json(&handle.snapshot(), config.output.pretty)?,
    };
    write_output(&content, None)
}

/// Overrides from the `plan` command line.
struct PlanOverrides {
    title: Option<String>,
    comment: Option<String>,
    image_link: Option<String>,
}

fn run_plan(
    session: &SessionArgs,
    format: OutputFormat,
    overrides: PlanOverrides,
    output: Option<&Utf8Path>,
    config: &Config,
) -> color_eyre::Result<()> {
    let handle = run_session(session, config)?;

    let mut batch = CreatePost::from_config(&config.post);
    if let Some(title) = overrides.title {
        batch.default_title = title;
    }
    if let Some(comment) = overrides.comment {
        batch.comment = comment;
    }
    if let Some(image_link) = overrides.image_link {
        batch.image_link = image_link;
    }

    let requests = build_batch(handle.store(), &batch);
    if requests.is_empty() {
        warn!("No destinations selected");
    }
    info!(requests = requests.len(), "Built create-post batch");

    let content = match format {
        OutputFormat::Text => render_plan(&batch, &requests),
        OutputFormat::Json => to_json(&requests, config.output.pretty)?,
    };
    write_output(&content, output)
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Load configuration
    let config = load_config(cli.config.as_deref())?;

    // 5. Route to appropriate command
    match cli.command {
        Commands::Status { session, format } => run_status(&session, format, &config),
        Commands::Plan {
            session,
            format,
            title,
            comment,
            image_link,
            output,
        } => run_plan(
            &session,
            format,
            PlanOverrides {
                title,
                comment,
                image_link,
            },
            output.as_deref(),
            &config,
        ),
    }
}

#[cfg(test)]
mod tests {
    use pd_core::{Flair, Tag};

    use super::*;

    fn feed() -> Vec<FeedEntry> {
        let mut pics = FeedEntry::new("art", "r/pics");
        pics.flairs.push(Flair::named("OC"));
        let mut rust = FeedEntry::new("tech", "r/rust");
        rust.selected = Some(true);
        vec![pics, FeedEntry::new("art", "r/art"), rust]
    }

    fn store() -> SelectionStore<PostDetails> {
        SelectionStore::from_raw(feed_to_raw(feed(), &PostConfig::default()))
    }

    #[test]
    fn test_cli_parses_plan() {
        let cli = Cli::try_parse_from([
            "postdeck",
            "plan",
            "--feed",
            "feed.json",
            "--refresh",
            "new.json",
            "--title",
            "Weekly",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Plan { ref session, ref title, format: OutputFormat::Json, .. }
                if session.feed == "feed.json"
                    && session.refresh.as_deref().map(Utf8Path::as_str) == Some("new.json")
                    && title.as_deref() == Some("Weekly")
        ));
    }

    #[test]
    fn test_feed_to_raw_uses_flair_fallback() {
        let raw = feed_to_raw(feed(), &PostConfig::default());
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[0].properties.as_ref().map(|p| p.flair.as_str()), Some("OC"));
        assert_eq!(raw[1].properties.as_ref().map(|p| p.flair.as_str()), Some("n/a"));
        assert_eq!(raw[2].selected, Some(true));
    }

    #[test]
    fn test_refresh_keeps_edited_details() {
        let store = store()
            .select_item("art", "r/pics")
            .and_then(|s| {
                s.set_item_properties(
                    "art",
                    "r/pics",
                    PostDetails::default().with_flair("Meta").with_title("Mine"),
                )
            })
            .unwrap();
        let refreshed = store.reconcile(feed_to_raw(feed(), &PostConfig::default()));
        let item = refreshed.item("art", "r/pics").unwrap();
        assert!(item.selected);
        assert_eq!(item.properties.flair, "Meta");
        assert_eq!(item.properties.title, "Mine");
    }

    #[test]
    fn test_build_batch_follows_store_order() {
        let store = store().select_all_in_section("art").unwrap();
        let batch = CreatePost {
            default_title: "Weekly".to_owned(),
            default_tags: [Tag::Oc].into_iter().collect(),
            delay_minutes: 30,
            ..CreatePost::default()
        };
        let requests = build_batch(&store, &batch);
        let names: Vec<&str> = requests.iter().map(|r| r.destination.as_str()).collect();
        assert_eq!(names, ["r/pics", "r/art", "r/rust"]);
        assert!(requests.iter().all(|r| r.title == "Weekly"));
        assert_eq!(
            render_plan(&batch, &requests[..1]),
            "1 posts scheduled in 30 minutes\n  art/r/pics \"Weekly\" flair=OC tags=[OC]\n"
        );
    }

    #[test]
    fn test_render_status() {
        let store = store().select_item("art", "r/art").unwrap();
        insta::assert_snapshot!(render_status(&store), @r"
        [-] art (1/2)
            [ ] r/pics (flair: OC)
            [x] r/art (flair: n/a)
        [x] tech (1/1)
            [x] r/rust (flair: n/a)
        2 of 3 destinations selected
        ");
    }
}
