//! CLI administration tool for url-redirector.
//!
//! Manages redirections directly against the database, applying the same
//! uniqueness rules as the HTTP API. Pending migrations are applied on
//! connect, so a fresh database works without starting the server first.
//!
//! # Usage
//!
//! ```bash
//! # List all redirections
//! cargo run --bin admin -- list
//!
//! # Register a redirection (short id derived from the URL)
//! cargo run --bin admin -- add https://example.com/docs
//!
//! # Register under a chosen short id
//! cargo run --bin admin -- add https://example.com/docs --short-id docs
//!
//! # Point an existing short id somewhere else
//! cargo run --bin admin -- update docs https://example.com/v2/docs
//!
//! # Remove a redirection
//! cargo run --bin admin -- remove docs
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `DB_MAX_CONNECTIONS`, `DB_CONNECT_TIMEOUT` (optional pool settings)

use url_redirector::application::services::Registry;
use url_redirector::config::Config;
use url_redirector::domain::entities::{Mapping, MappingCandidate};
use url_redirector::domain::repositories::MappingFilter;
use url_redirector::infrastructure::persistence::PgMappingStore;
use url_redirector::server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-redirector.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// List redirections
    List {
        /// Only show the redirection targeting this URL
        #[arg(long)]
        long_url: Option<String>,
    },

    /// Show a single redirection
    Get {
        /// Short id to look up
        short_id: String,
    },

    /// Register a new redirection
    Add {
        /// Target URL
        long_url: String,

        /// Short id to use (derived from the URL if omitted)
        #[arg(short, long)]
        short_id: Option<String>,
    },

    /// Change the target of a redirection
    Update {
        /// Short id to update
        short_id: String,

        /// New target URL
        long_url: String,
    },

    /// Remove a redirection
    Remove {
        /// Short id to remove
        short_id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    config.database_url = Some(Config::load_database_url()?);

    let pool = server::connect_pool(&config).await?;

    let registry = Registry::new(Arc::new(PgMappingStore::new(Arc::new(pool.clone()))));

    match cli.command {
        Commands::List { long_url } => list_redirections(&registry, long_url).await?,
        Commands::Get { short_id } => show_redirection(&registry, &short_id).await?,
        Commands::Add { long_url, short_id } => {
            add_redirection(&registry, long_url, short_id).await?
        }
        Commands::Update { short_id, long_url } => {
            update_redirection(&registry, &short_id, long_url).await?
        }
        Commands::Remove { short_id, yes } => {
            remove_redirection(&registry, &short_id, yes).await?
        }
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Lists redirections in a table.
///
/// # Output Format
///
/// ```text
/// Redirections
///
///   Short ID     Long URL
///   ───────────────────────────────────────────────────────────────
///   KhtAJCD      http://example.com/
/// ```
async fn list_redirections(
    registry: &Registry<PgMappingStore>,
    long_url: Option<String>,
) -> Result<()> {
    println!("{}", "Redirections".bright_blue().bold());
    println!();

    let filter = match long_url {
        Some(url) => MappingFilter::all().long_url_eq(url),
        None => MappingFilter::all(),
    };

    let mappings: Vec<Mapping> = registry
        .find(&filter)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list redirections: {}", e))?
        .collect();

    if mappings.is_empty() {
        println!("{}", "  No redirections found".yellow());
        println!();
        println!(
            "  Register one with: {} admin add <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<12} {}",
        "Short ID".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!("  {:<12} {}", mapping.short_id.cyan(), mapping.long_url);
    }

    println!();
    println!(
        "  Total: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn show_redirection(registry: &Registry<PgMappingStore>, short_id: &str) -> Result<()> {
    let mapping = registry
        .get(short_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_mapping(&mapping);
    Ok(())
}

async fn add_redirection(
    registry: &Registry<PgMappingStore>,
    long_url: String,
    short_id: Option<String>,
) -> Result<()> {
    println!("{}", "Register Redirection".bright_blue().bold());
    println!();

    let candidate = match short_id {
        Some(id) => MappingCandidate::with_short_id(id, long_url),
        None => MappingCandidate::from_long_url(long_url),
    };

    let mapping = registry
        .create(candidate)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to register redirection: {}", e))?;

    print_mapping(&mapping);
    println!("{}", "Redirection registered".green().bold());
    println!();

    Ok(())
}

async fn update_redirection(
    registry: &Registry<PgMappingStore>,
    short_id: &str,
    long_url: String,
) -> Result<()> {
    let mapping = registry
        .update(short_id, MappingCandidate::from_long_url(long_url))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update redirection: {}", e))?;

    print_mapping(&mapping);
    println!("{}", "Redirection updated".green().bold());
    println!();

    Ok(())
}

/// Removes a redirection after confirmation (default: No).
async fn remove_redirection(
    registry: &Registry<PgMappingStore>,
    short_id: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Remove Redirection".bright_blue().bold());
    println!();

    let mapping = registry
        .get(short_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_mapping(&mapping);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove this redirection?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    registry
        .remove(short_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to remove redirection: {}", e))?;

    println!();
    println!("{}", "Redirection removed".green().bold());
    println!();

    Ok(())
}

fn print_mapping(mapping: &Mapping) {
    println!("  Short ID: {}", mapping.short_id.cyan());
    println!("  Long URL: {}", mapping.long_url.bright_white());
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM redirections")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL:   {}", version.bright_white());
            println!(
                "  Redirections: {}",
                count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
