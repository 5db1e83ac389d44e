//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Inspect a directory of blog posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Only list posts in this category
        #[arg(long)]
        category: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Show {
        /// Slug of the post
        slug: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the posts most related to a post
    Related {
        /// Slug of the post
        slug: String,

        /// Maximum number of posts (defaults to related_limit from the config)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        limit: Option<u64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List categories with post counts
    Categories,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category of the new post
        #[arg(long, default_value = "General")]
        category: String,

        /// Author of the new post
        #[arg(long, default_value = "Anonymous")]
        author: String,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { category, json } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&folio, category.as_deref(), json)?;
        }

        Commands::Show { slug, json } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::show::run(&folio, &slug, json)?;
        }

        Commands::Related { slug, limit, json } => {
            let folio = folio::Folio::new(&base_dir)?;
            let limit = limit.map(usize::try_from).transpose()?;
            folio::commands::related::run(&folio, &slug, limit, json)?;
        }

        Commands::Categories => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::list::categories(&folio)?;
        }

        Commands::New {
            title,
            category,
            author,
        } => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            folio::commands::new::run(&folio, &title, &category, &author)?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
