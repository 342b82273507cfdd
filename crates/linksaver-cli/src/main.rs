//! LinkSaver CLI
//!
//! Command-line interface for LinkSaver - save, tag, and organize links.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use linksaver_core::{SortOrder, Store};

mod commands;
mod metadata;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "linksaver")]
#[command(about = "LinkSaver - save, auto-tag, and organize links")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a link (fetches page title and favicon unless disabled)
    #[command(alias = "add")]
    Save {
        /// URL to save
        url: String,
        /// Title (skips metadata fetching for the title)
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// Note to attach
        #[arg(short, long)]
        note: Option<String>,
        /// Tags to add (merged with auto-tags)
        #[arg(short, long)]
        tag: Vec<String>,
        /// Folder to file under (id prefix or exact name)
        #[arg(short, long)]
        folder: Option<String>,
        /// Skip fetching page metadata
        #[arg(long)]
        no_fetch: bool,
    },
    /// List links (the dashboard view)
    #[command(alias = "ls")]
    List {
        /// Search text (matches title, domain, note, and tags)
        #[arg(short, long)]
        search: Option<String>,
        /// Only favorites
        #[arg(long, conflicts_with_all = ["pinned", "recent", "folder"])]
        favorites: bool,
        /// Only pinned links
        #[arg(long, conflicts_with_all = ["recent", "folder"])]
        pinned: bool,
        /// Only links saved in the last 7 days
        #[arg(long, conflicts_with = "folder")]
        recent: bool,
        /// Only links in this folder (id prefix or exact name)
        #[arg(long)]
        folder: Option<String>,
        /// Require at least one of these tags
        #[arg(short, long)]
        tag: Vec<String>,
        /// Sort order
        #[arg(long, value_enum, default_value_t = SortArg::Newest)]
        sort: SortArg,
    },
    /// Show link details
    Show {
        /// Link ID (full id or prefix)
        id: String,
    },
    /// Open a link in the browser and record the visit
    Open {
        /// Link ID (full id or prefix)
        id: String,
    },
    /// Edit a link
    Edit {
        /// Link ID (full id or prefix)
        id: String,
        /// New title
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// New URL (domain is recomputed)
        #[arg(short, long)]
        url: Option<String>,
        /// New note
        #[arg(short, long)]
        note: Option<String>,
        /// Replace tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,
        /// Move to folder (id prefix or exact name)
        #[arg(short, long, conflicts_with = "unfile")]
        folder: Option<String>,
        /// Remove from its folder
        #[arg(long)]
        unfile: bool,
        /// Re-run auto-tagging and merge the result in
        #[arg(long)]
        retag: bool,
    },
    /// Move links into a folder, or unfile them
    #[command(alias = "mv")]
    Move {
        /// Link IDs (full ids or prefixes)
        #[arg(required = true)]
        ids: Vec<String>,
        /// Target folder (id prefix or exact name)
        #[arg(short, long, conflicts_with = "unfile")]
        folder: Option<String>,
        /// Remove the links from their folders
        #[arg(long)]
        unfile: bool,
    },
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID (full id or prefix)
        id: String,
    },
    /// Toggle a link's favorite flag
    #[command(alias = "fav")]
    Favorite {
        /// Link ID (full id or prefix)
        id: String,
    },
    /// Toggle a link's pinned flag
    Pin {
        /// Link ID (full id or prefix)
        id: String,
    },
    /// Manage folders
    Folder {
        #[command(subcommand)]
        command: FolderCommands,
    },
    /// Show the tag cloud (most-used tags)
    Tags {
        /// Maximum number of tags to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Export all links and folders as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import links and folders from an export file
    Import {
        /// Export file to import
        file: PathBuf,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum FolderCommands {
    /// Create a folder
    #[command(alias = "add")]
    Create {
        /// Folder name
        name: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Display color (e.g. "#dc2626")
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List folders with their link counts
    #[command(alias = "ls")]
    List,
    /// Delete a folder (its links become unfiled)
    #[command(alias = "rm")]
    Delete {
        /// Folder ID (full id or prefix) or exact name
        id: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, auto_tag, fetch_metadata)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Newest,
    Oldest,
    Title,
    Domain,
    Visits,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => SortOrder::Newest,
            SortArg::Oldest => SortOrder::Oldest,
            SortArg::Title => SortOrder::Title,
            SortArg::Domain => SortOrder::Domain,
            SortArg::Visits => SortOrder::Visits,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(&output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, &output)
            }
        };
    }

    let mut store = Store::open()?;

    match cli.command {
        Commands::Save {
            url,
            title,
            note,
            tag,
            folder,
            no_fetch,
        } => commands::link::save(&mut store, url, title, note, tag, folder, no_fetch, &output)
            .await,
        Commands::List {
            search,
            favorites,
            pinned,
            recent,
            folder,
            tag,
            sort,
        } => commands::link::list(
            &store,
            search,
            favorites,
            pinned,
            recent,
            folder,
            tag,
            sort.into(),
            &output,
        ),
        Commands::Show { id } => commands::link::show(&store, id, &output),
        Commands::Open { id } => commands::link::open(&mut store, id, &output),
        Commands::Edit {
            id,
            title,
            url,
            note,
            tags,
            folder,
            unfile,
            retag,
        } => commands::link::edit(
            &mut store, id, title, url, note, tags, folder, unfile, retag, &output,
        ),
        Commands::Move { ids, folder, unfile } => {
            commands::link::move_links(&mut store, ids, folder, unfile, &output)
        }
        Commands::Delete { id } => commands::link::delete(&mut store, id, &output),
        Commands::Favorite { id } => commands::link::favorite(&mut store, id, &output),
        Commands::Pin { id } => commands::link::pin(&mut store, id, &output),
        Commands::Folder { command } => match command {
            FolderCommands::Create {
                name,
                description,
                color,
            } => commands::folder::create(&mut store, name, description, color, &output),
            FolderCommands::List => commands::folder::list(&store, &output),
            FolderCommands::Delete { id } => commands::folder::delete(&mut store, id, &output),
        },
        Commands::Tags { limit } => commands::tag::cloud(&store, limit, &output),
        Commands::Export { output: file } => commands::transfer::export(&store, file, &output),
        Commands::Import { file } => commands::transfer::import(&mut store, file, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LINKSAVER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
