//! repodev - PKGBUILD repository maintenance CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use repodev::repo::Repo;
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "repodev")]
#[command(version = repodev::version())]
#[command(about = "Development tool for a PKGBUILD package repository")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a package directory from the scaffold templates
    New {
        /// Package name
        name: String,
    },
    /// Build one package (or every package) with makepkg
    Test {
        /// Package name; builds everything when omitted
        name: Option<String>,
    },
    /// Rebuild the packages.json index
    Update,
    /// Rebuild the index, then commit and push any changes
    Publish,
    /// Validate every package manifest
    Check,
    /// Remove makepkg build artifacts
    Clean,
    /// List packages with version and description
    List,
    /// Refresh source checksums for one package
    Updpkgsums {
        /// Package name
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let repo = Repo::open_current_dir()?;

    match cli.command {
        Commands::New { name } => cmd::new::new(&repo, &name),
        Commands::Test { name } => cmd::test::test(&repo, name.as_deref()),
        Commands::Update => cmd::update::update(&repo).await,
        Commands::Publish => cmd::publish::publish(&repo).await,
        Commands::Check => cmd::check::check(&repo),
        Commands::Clean => cmd::clean::clean(&repo),
        Commands::List => cmd::list::list(&repo),
        Commands::Updpkgsums { name } => cmd::updpkgsums::updpkgsums(&repo, &name),
    }
}
