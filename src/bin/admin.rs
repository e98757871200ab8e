//! CLI administration tool for library-catalog.
//!
//! Provides commands for registering authors, viewing catalog counts,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Register a new author
//! cargo run --bin admin -- author create --name "Victor Hugo"
//!
//! # List all authors
//! cargo run --bin admin -- author list
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)

use library_catalog::application::services::AuthorService;
use library_catalog::config::Config;
use library_catalog::infrastructure::persistence::PgAuthorRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing library-catalog.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage authors
    Author {
        #[command(subcommand)]
        action: AuthorAction,
    },

    /// Show catalog statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Author management subcommands.
#[derive(Subcommand)]
enum AuthorAction {
    /// Register a new author
    Create {
        /// Full name (e.g., "Victor Hugo")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all authors
    List,
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

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .context("DATABASE_URL (or DB_HOST and friends) must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Author { action } => handle_author_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches author management commands.
async fn handle_author_action(action: AuthorAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgAuthorRepository::new(Arc::new(pool.clone())));
    let service = AuthorService::new(repo);

    match action {
        AuthorAction::Create { name, yes } => create_author(&service, name, yes).await?,
        AuthorAction::List => list_authors(&service).await?,
    }

    Ok(())
}

/// Registers an author, prompting for the name when `--name` is absent.
async fn create_author(
    service: &AuthorService<PgAuthorRepository>,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "✍️  Register Author".bright_blue().bold());
    println!();

    let full_name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    println!("  Name: {}", full_name.trim().cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Register this author?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let author = service
        .create(&full_name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create author: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ Author registered".green().bold(),
        author.id.to_string().bright_yellow()
    );
    println!();
    println!("{}", "Attach a book with:".bright_white());
    println!(
        "  curl -X POST -H \"Content-Type: application/json\" http://localhost:3000/api/v1/authors/{}/books -d '{{...}}'",
        author.id
    );
    println!();

    Ok(())
}

/// Lists all authors.
///
/// # Output Format
///
/// ```text
/// 📋 Authors
///
///   ID    Full name
///   ────────────────────────────────────────
///   1     Victor Hugo
///   2     Alexandre Dumas
/// ```
async fn list_authors(service: &AuthorService<PgAuthorRepository>) -> Result<()> {
    println!("{}", "📋 Authors".bright_blue().bold());
    println!();

    let authors = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list authors: {}", e))?;

    if authors.is_empty() {
        println!("{}", "  No authors found".yellow());
        println!();
        println!(
            "  Register one with: {} admin author create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {}",
        "ID".bright_white().bold(),
        "Full name".bright_white().bold()
    );
    println!("  {}", "─".repeat(40).bright_black());

    for author in &authors {
        println!(
            "  {:<5} {}",
            author.id.to_string().bright_black(),
            author.full_name.cyan()
        );
    }

    println!();
    println!(
        "  Total: {}",
        authors.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays catalog statistics.
///
/// Shows the number of books, authors and authorship links.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let books_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?;

    let authors_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
        .fetch_one(pool)
        .await?;

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_authors")
        .fetch_one(pool)
        .await?;

    println!(
        "  Books:   {}",
        books_count.to_string().bright_green().bold()
    );
    println!(
        "  Authors: {}",
        authors_count.to_string().bright_green().bold()
    );
    println!(
        "  Links:   {}",
        links_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
