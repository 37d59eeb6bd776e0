//! CLI entry point for carnet

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "carnet")]
#[command(version)]
#[command(about = "Index, query and serve a markdown blog", long_about = None)]
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
    /// List site content
    #[command(alias = "ls")]
    List {
        /// Type of content to list (articles, categories, tags, authors)
        #[arg(default_value = "articles")]
        r#type: String,
    },

    /// Show a single article
    Show {
        /// Article slug
        slug: String,
    },

    /// Search articles by title, excerpt, tags and content
    Search {
        /// Text to look for
        query: String,
    },

    /// Generate sitemap.xml
    Sitemap {
        /// Output file (defaults to the public directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the JSON API
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "carnet=debug,info"
    } else {
        "carnet=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { r#type } => {
            let carnet = carnet::Carnet::new(&base_dir)?;
            carnet::commands::list::run(&carnet, &r#type).await?;
        }

        Commands::Show { slug } => {
            let carnet = carnet::Carnet::new(&base_dir)?;
            carnet::commands::show::run(&carnet, &slug).await?;
        }

        Commands::Search { query } => {
            let carnet = carnet::Carnet::new(&base_dir)?;
            carnet::commands::search::run(&carnet, &query).await?;
        }

        Commands::Sitemap { output } => {
            let carnet = carnet::Carnet::new(&base_dir)?;
            carnet::commands::sitemap::run(&carnet, output.as_deref()).await?;
            println!("Generated sitemap successfully!");
        }

        Commands::Serve { port, ip } => {
            let carnet = carnet::Carnet::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            carnet::server::start(&carnet, &ip, port).await?;
        }

        Commands::Version => {
            println!("carnet version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
