use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::{ArgGroup, Parser, Subcommand};
use pressdesk::cli::{
    run_bulk, run_import, run_init, run_list, BulkOptions, ListKind, ListOptions, Selection,
};
use pressdesk::listing::{BulkAction, ListStatus};
use pressdesk::logging::{init_logging, LOG_ENV};
use pressdesk::tui::run_tui;

#[derive(Parser)]
#[command(name = "pressdesk")]
#[command(about = "Content and website list management for a publishing dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the workspace database
    Init {
        /// Workspace directory (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Load contents and websites from a JSON fixtures file
    Import {
        /// Workspace directory
        path: PathBuf,
        /// JSON file with "contents" and "websites" arrays
        file: PathBuf,
    },
    /// Print the filtered list
    List {
        /// Workspace directory
        path: PathBuf,
        /// Which list to show
        #[arg(value_enum)]
        kind: ListKind,
        /// Dimension filter as key=value (repeatable)
        #[arg(short, long = "filter")]
        filters: Vec<String>,
        /// Case-insensitive text search
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Select records in the filtered list and apply one bulk action
    #[command(group(ArgGroup::new("action").required(true).args(["status", "delete", "export"])))]
    Bulk {
        /// Workspace directory
        path: PathBuf,
        #[arg(value_enum)]
        kind: ListKind,
        /// Dimension filter as key=value (repeatable)
        #[arg(short, long = "filter")]
        filters: Vec<String>,
        /// Case-insensitive text search
        #[arg(short, long)]
        search: Option<String>,
        /// Select every record in the filtered list
        #[arg(long, conflicts_with = "ids")]
        all: bool,
        /// Select a record by id (repeatable)
        #[arg(long = "id")]
        ids: Vec<String>,
        /// Move the selection to this status
        #[arg(long)]
        status: Option<String>,
        /// Delete the selection
        #[arg(long)]
        delete: bool,
        /// Write the selection (or the whole filtered list) to a JSON file
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// Interactive list view
    Browse {
        /// Workspace directory (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
        /// List to open first
        #[arg(long, value_enum, default_value_t = ListKind::Content)]
        kind: ListKind,
    },
}

fn main() -> Result<()> {
    // Guard must be held for logs to flush
    let _guard = init_logging().ok();
    let verbose = std::env::var(LOG_ENV).is_ok();
    let start = Instant::now();

    let cli = Cli::parse();

    let result = run_command(cli);

    if verbose {
        eprintln!("Completed in {:.2?}", start.elapsed());
    }

    result
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let db_path = run_init(&path)?;
            println!("Initialized workspace: {}", db_path.display());
        }
        Commands::Import { path, file } => {
            let stats = run_import(&path, &file)?;
            println!(
                "Imported: {} contents, {} websites",
                stats.contents, stats.websites
            );
        }
        Commands::List {
            path,
            kind,
            filters,
            search,
        } => {
            let report = run_list(&path, &ListOptions { kind, filters, search })?;
            if !report.chips.is_empty() {
                println!("Filters: {}", report.chips.join(" | "));
            }
            for row in &report.rows {
                println!("{}\t{}\t{}", row.id, row.title, row.fields.join(", "));
            }
            match report.status {
                ListStatus::Ready => println!("{}", report.summary),
                status => println!("{}", status.message().unwrap_or_default()),
            }
        }
        Commands::Bulk {
            path,
            kind,
            filters,
            search,
            all,
            ids,
            status,
            delete,
            export,
        } => {
            let selection = if all {
                Selection::All
            } else if !ids.is_empty() {
                Selection::Ids(ids)
            } else {
                Selection::Nothing
            };
            let action = match (status, delete, export) {
                (Some(status), _, _) => BulkAction::StatusChange(status),
                (_, true, _) => BulkAction::Delete,
                (_, _, Some(file)) => BulkAction::Export(file),
                (None, false, None) => bail!("One of --status, --delete or --export is required"),
            };
            let report = run_bulk(
                &path,
                &BulkOptions {
                    kind,
                    filters,
                    search,
                    selection,
                    action,
                },
            )?;
            println!("{}: {} {} record(s)", report.action, report.affected, kind);
        }
        Commands::Browse { path, kind } => {
            run_tui(&path, kind)?;
        }
    }

    Ok(())
}
