//! CLI administration tool for shorten-api.
//!
//! Inspects and manages stored short URLs directly in the database, without
//! going through the HTTP API. Reads do not count as accesses.
//!
//! # Usage
//!
//! ```bash
//! # List all short URLs
//! cargo run --bin admin -- list
//!
//! # Show one short URL with its access count
//! cargo run --bin admin -- show aB3xY9
//!
//! # Delete a short URL (asks for confirmation unless -y)
//! cargo run --bin admin -- delete aB3xY9
//!
//! # View totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `shorten_api::config`.

use shorten_api::application::services::ShortenService;
use shorten_api::config;
use shorten_api::domain::entities::UrlMapping;
use shorten_api::infrastructure::database;
use shorten_api::infrastructure::persistence::SqliteUrlMappingRepository;
use shorten_api::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;
use std::sync::Arc;

type AdminService = ShortenService<SqliteUrlMappingRepository, RandomCodeGenerator>;

/// CLI tool for managing shorten-api.
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
    /// List all short URLs
    List,

    /// Show a short URL with its access count
    Show {
        /// Short code to look up
        short_code: String,
    },

    /// Delete a short URL
    Delete {
        /// Short code to delete
        short_code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics
    Stats,

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

    let config = config::load_from_env()?;
    let pool = database::connect(&config).await?;
    database::migrate(&pool).await?;

    let service: AdminService = ShortenService::new(
        Arc::new(SqliteUrlMappingRepository::new(Arc::new(pool.clone()))),
        Arc::new(RandomCodeGenerator::new()),
    );

    match cli.command {
        Commands::List => list_urls(&service).await?,
        Commands::Show { short_code } => show_url(&service, &short_code).await?,
        Commands::Delete { short_code, yes } => delete_url(&service, &short_code, yes).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Lists every short URL.
///
/// # Output Format
///
/// ```text
///   ID    Code     Hits      Created            URL
///   ─────────────────────────────────────────────────────────────────────
///   1     aB3xY9   12        2025-01-15 10:30   https://example.com
/// ```
async fn list_urls(service: &AdminService) -> Result<()> {
    println!("{}", "📋 Short URLs".bright_blue().bold());
    println!();

    let mappings = service
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list short URLs: {}", e))?;

    if mappings.is_empty() {
        println!("{}", "  No short URLs found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<8} {:<9} {:<18} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Hits".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<5} {:<8} {:<9} {:<18} {}",
            mapping.id.to_string().bright_black(),
            mapping.short_code.cyan(),
            mapping.access_count.to_string().bright_green(),
            mapping
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            truncate(&mapping.url, 60)
        );
    }

    println!();
    println!(
        "  Total: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints one mapping in detail.
async fn show_url(service: &AdminService, short_code: &str) -> Result<()> {
    let mapping = service
        .get_stats(short_code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Short URL not found")?;

    print_mapping(&mapping);
    Ok(())
}

/// Deletes a mapping after confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes`
/// - Deletion is permanent
async fn delete_url(service: &AdminService, short_code: &str, yes: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short URL".bright_blue().bold());
    println!();

    let mapping = service
        .get_stats(short_code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Short URL not found")?;

    print_mapping(&mapping);

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .delete(short_code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete short URL: {}", e))?;

    if deleted {
        println!();
        println!("{}", "✅ Short URL deleted".green().bold());
    } else {
        println!("{}", "⚠️  Short URL was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Displays totals across all mappings.
async fn handle_stats(pool: &SqlitePool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (urls, hits): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(access_count), 0) FROM url_maps")
            .fetch_one(pool)
            .await?;

    println!("  Short URLs: {}", urls.to_string().bright_green().bold());
    println!("  Accesses:   {}", hits.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("  SQLite: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

fn print_mapping(mapping: &UrlMapping) {
    println!("  Code:     {}", mapping.short_code.cyan().bold());
    println!("  URL:      {}", mapping.url);
    println!("  ID:       {}", mapping.id.to_string().bright_black());
    println!("  Accesses: {}", mapping.access_count.to_string().bright_green());
    println!(
        "  Created:  {}",
        mapping.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Updated:  {}",
        mapping.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
}

/// Shortens `s` to at most `max` characters, marking the cut with `…`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
