//! taskdeck — track your assigned tracker tasks from the terminal.
//!
//! Subcommands:
//! - `list`: fetch assigned tasks and print the grouped version tree
//! - `watch`: poll for newly assigned tasks until interrupted
//! - `checklist`: view and edit the per-task checklist
//! - `export`: render a checklist as Markdown

mod config;
mod tree;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use checklist::{export_markdown, Checklist, ChecklistStore, ItemState};
use config::Config;
use tracker::TrackerClient;
use triage::{categorize, AssignmentWatcher, NewTasksCallback};

#[derive(Parser)]
#[command(name = "taskdeck", version, about = "Assigned-task tracking and checklists")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch assigned tasks and show the grouped tree
    List,
    /// Poll for newly assigned tasks until interrupted
    Watch {
        /// Override the configured polling interval, in minutes
        #[arg(long)]
        interval: Option<u64>,
    },
    /// View and edit a task's checklist
    #[command(subcommand)]
    Checklist(ChecklistCommand),
    /// Export a task's checklist as a Markdown document
    Export {
        /// Ticket code, e.g. PROJ-123
        key: String,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ChecklistCommand {
    /// Print the checklist, creating it from the template if absent
    Show { key: String },
    /// Create a fresh checklist from the template
    Init { key: String },
    /// Mark an item done (items are numbered from 1)
    Check { key: String, item: usize },
    /// Mark an item skipped
    Skip { key: String, item: usize },
    /// Reset every item to pending
    Reset { key: String },
    /// Attach a note to an item; empty text clears it
    Note {
        key: String,
        item: usize,
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .init();

    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Command::List => list(&config).await,
        Command::Watch { interval } => watch(&config, interval).await,
        Command::Checklist(cmd) => run_checklist(&config, cmd).await,
        Command::Export { key, output } => export(&config, &key, output.as_deref()).await,
    }
}

/// Build the tracker client from config, requiring a base URL.
fn build_client(config: &Config) -> Result<TrackerClient> {
    if config.base_url.is_empty() {
        bail!("tracker base_url is not configured; set it in taskdeck.toml or TASKDECK_BASE_URL");
    }
    TrackerClient::new(
        &config.base_url,
        config.email.as_deref(),
        config.api_token.as_deref(),
    )
    .context("Failed to build tracker client")
}

async fn list(config: &Config) -> Result<()> {
    let client = build_client(config)?;
    let tasks = client
        .fetch_assigned()
        .await
        .context("Failed to fetch assigned tasks")?;

    print!("{}", tree::render_tree(&categorize(&tasks)));
    Ok(())
}

async fn watch(config: &Config, interval_override: Option<u64>) -> Result<()> {
    if !config.notifications_enabled {
        bail!("notifications are disabled; enable them in taskdeck.toml or TASKDECK_NOTIFICATIONS");
    }

    let client = build_client(config)?;
    let minutes = interval_override
        .unwrap_or(config.polling_interval_minutes)
        .max(1);

    let on_new: NewTasksCallback = Arc::new(|tasks| {
        for task in tasks {
            println!(
                "{} {}  {}",
                "New assignment:".green().bold(),
                task.key.yellow(),
                task.summary
            );
        }
    });

    let mut watcher = AssignmentWatcher::new(Arc::new(client));
    watcher.start(std::time::Duration::from_secs(minutes * 60), on_new);
    println!(
        "Watching for new assignments every {minutes} min. {}",
        "Ctrl-C to stop.".dimmed()
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Interrupted; stopping watcher");
    watcher.stop();
    Ok(())
}

async fn run_checklist(config: &Config, cmd: ChecklistCommand) -> Result<()> {
    let store = ChecklistStore::new(&config.checklist_root);

    match cmd {
        ChecklistCommand::Show { key } => {
            let list = store.load_or_create(&key).await?;
            print_checklist(&list);
        }
        ChecklistCommand::Init { key } => {
            if store.exists(&key).await {
                bail!("checklist for {key} already exists; use `checklist reset` to start over");
            }
            let list = store.load_or_create(&key).await?;
            println!("Created checklist for {} ({} items)", key, list.items.len());
        }
        ChecklistCommand::Check { key, item } => {
            set_item_state(&store, &key, item, ItemState::Done).await?;
        }
        ChecklistCommand::Skip { key, item } => {
            set_item_state(&store, &key, item, ItemState::Skipped).await?;
        }
        ChecklistCommand::Reset { key } => {
            let mut list = store.load(&key).await?;
            list.reset();
            store.save(&list).await?;
            println!("Reset checklist for {key}");
        }
        ChecklistCommand::Note { key, item, text } => {
            let index = item_index(item)?;
            let mut list = store.load(&key).await?;
            list.set_notes(index, Some(text))?;
            store.save(&list).await?;
            print_checklist(&list);
        }
    }
    Ok(())
}

async fn set_item_state(
    store: &ChecklistStore,
    key: &str,
    item: usize,
    state: ItemState,
) -> Result<()> {
    let index = item_index(item)?;
    let mut list = store.load(key).await?;
    list.set_state(index, state)?;
    store.save(&list).await?;
    print_checklist(&list);
    Ok(())
}

/// Convert a 1-based CLI item number to a zero-based index.
fn item_index(item: usize) -> Result<usize> {
    item.checked_sub(1)
        .with_context(|| "items are numbered from 1")
}

fn print_checklist(list: &Checklist) {
    let (settled, total) = list.progress();
    println!(
        "{}  {}",
        list.task_key.yellow().bold(),
        format!("{settled}/{total}").dimmed()
    );

    for (i, item) in list.items.iter().enumerate() {
        let marker = match item.state {
            ItemState::Pending => "[ ]".normal(),
            ItemState::Done => "[x]".green(),
            ItemState::Skipped => "[-]".dimmed(),
        };
        println!("  {:>2}. {} {}", i + 1, marker, item.title);
        if let Some(notes) = &item.notes {
            for line in notes.lines() {
                println!("        {}", line.dimmed());
            }
        }
    }
}

async fn export(config: &Config, key: &str, output: Option<&std::path::Path>) -> Result<()> {
    let store = ChecklistStore::new(&config.checklist_root);
    let list = store.load(key).await?;
    let document = export_markdown(&list);

    match output {
        Some(path) => {
            tokio::fs::write(path, &document)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported checklist for {} to {}", key, path.display());
        }
        None => print!("{document}"),
    }
    Ok(())
}
