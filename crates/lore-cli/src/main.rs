//! CLI frontend for lorebook stores.

mod commands;
mod settings;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use lore_core::FsStore;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "lore",
    about = "Lorebook store for interactive fiction worlds",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding user lorebooks (overrides LORE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory holding read-only preset lorebooks (overrides LORE_PRESETS_DIR)
    #[arg(long, global = true)]
    presets_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all lorebooks, user and preset
    List,

    /// Create a new user lorebook
    Create {
        /// Display name of the lorebook
        name: String,

        /// Slug to store it under (default: derived from the name)
        #[arg(short, long)]
        slug: Option<String>,

        /// Mark the lorebook as a template
        #[arg(short, long)]
        template: bool,
    },

    /// Delete a user lorebook
    Delete {
        /// Lorebook slug
        slug: String,
    },

    /// Copy a lorebook (user or preset) into a new user lorebook
    Copy {
        /// Source slug
        src: String,

        /// Destination slug (default: first free variant of the source slug)
        dst: Option<String>,

        /// Display name of the copy (default: the source name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Change the display name or template flag of a lorebook
    Rename {
        /// Lorebook slug
        slug: String,

        /// New display name
        name: String,

        /// Mark the lorebook as a template
        #[arg(short, long, conflicts_with = "no_template")]
        template: bool,

        /// Clear the template mark
        #[arg(long)]
        no_template: bool,
    },

    /// Show the entries and folders of a lorebook as a tree
    Tree {
        /// Lorebook slug
        slug: String,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single entry
    Show {
        /// Lorebook slug
        slug: String,

        /// Entry path, e.g. characters/sage
        path: String,

        /// Print the raw JSON record
        #[arg(long)]
        json: bool,
    },

    /// Create or update an entry
    Set {
        /// Lorebook slug
        slug: String,

        /// Entry path, e.g. characters/sage
        path: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Lore text
        #[arg(long)]
        content: Option<String>,

        /// Trigger keyword (repeatable; replaces existing keywords)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,

        /// Trigger pattern (empty string clears it)
        #[arg(long)]
        regex: Option<String>,

        /// Ranking priority
        #[arg(short, long, allow_negative_numbers = true)]
        priority: Option<i64>,

        /// Exclude the entry from matching
        #[arg(long, conflicts_with = "enabled")]
        disabled: bool,

        /// Include the entry in matching again
        #[arg(long)]
        enabled: bool,
    },

    /// Delete an entry
    Rm {
        /// Lorebook slug
        slug: String,

        /// Entry path
        path: String,
    },

    /// Create a folder
    Mkdir {
        /// Lorebook slug
        slug: String,

        /// Folder path
        path: String,
    },

    /// Delete a folder with everything in it
    Rmdir {
        /// Lorebook slug
        slug: String,

        /// Folder path
        path: String,
    },

    /// Rank the entries triggered by a piece of text
    Match {
        /// Lorebook slug
        slug: String,

        /// Text to scan for triggers
        text: String,
    },

    /// List the location entries of a lorebook
    Locations {
        /// Lorebook slug
        slug: String,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Collapse an `--x` / `--no-x` pair; neither flag keeps the stored value.
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings.with_overrides(cli.data_dir, cli.presets_dir),
        Err(e) => {
            eprintln!("error: invalid configuration: {e}");
            process::exit(1);
        }
    };
    tracing::debug!(?settings, "loaded settings");
    let store = FsStore::new(settings.store_config());

    let result = match cli.command {
        Commands::List => commands::list::run(&store).await,
        Commands::Create {
            name,
            slug,
            template,
        } => commands::create::run(&store, &name, slug.as_deref(), template).await,
        Commands::Delete { slug } => commands::delete::run(&store, &slug).await,
        Commands::Copy { src, dst, name } => {
            commands::copy::run(&store, &src, dst.as_deref(), name.as_deref()).await
        }
        Commands::Rename {
            slug,
            name,
            template,
            no_template,
        } => {
            let template = flag_pair(template, no_template);
            commands::rename::run(&store, &slug, &name, template).await
        }
        Commands::Tree { slug, json } => commands::tree::run(&store, &slug, json).await,
        Commands::Show { slug, path, json } => {
            commands::show::run(&store, &slug, &path, json).await
        }
        Commands::Set {
            slug,
            path,
            name,
            content,
            keywords,
            regex,
            priority,
            disabled,
            enabled,
        } => {
            let update = commands::set::EntryUpdate {
                name,
                content,
                keywords,
                regex,
                priority,
                enabled: flag_pair(enabled, disabled),
            };
            commands::set::run(&store, &slug, &path, update).await
        }
        Commands::Rm { slug, path } => commands::rm::run(&store, &slug, &path).await,
        Commands::Mkdir { slug, path } => commands::folder::create(&store, &slug, &path).await,
        Commands::Rmdir { slug, path } => commands::folder::delete(&store, &slug, &path).await,
        Commands::Match { slug, text } => commands::matches::run(&store, &slug, &text).await,
        Commands::Locations { slug } => commands::locations::run(&store, &slug).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
