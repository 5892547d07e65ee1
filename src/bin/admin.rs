//! CLI administration tool for linkspan.
//!
//! Performs maintenance on the mapping store without going through the HTTP
//! API.
//!
//! # Usage
//!
//! ```bash
//! # Delete every mapping whose expiry has passed
//! cargo run --bin admin -- purge
//!
//! # Inspect a single mapping
//! cargo run --bin admin -- show aB3xY9kQ
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same database settings as the server (`DATABASE_URL` or the
//! `DB_*` parts). The admin tool always talks to PostgreSQL.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;

use linkspan::application::services::MappingService;
use linkspan::config::{self, Config, StoreBackend};
use linkspan::infrastructure::persistence::PgMappingRepository;
use linkspan::server::connect_pool;
use linkspan::utils::code_generator::RandomCodeGenerator;

/// CLI tool for managing linkspan.
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
    /// Delete mappings whose expiry has passed
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a single mapping
    Show {
        /// Short code to look up
        short_url: String,
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

    /// Show database info and mapping counts
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.store_backend == StoreBackend::Memory {
        anyhow::bail!("The admin tool needs STORE_BACKEND=postgres");
    }

    let pool = connect_pool(&config).await?;

    let result = match cli.command {
        Commands::Purge { yes } => purge(&config, &pool, yes).await,
        Commands::Show { short_url } => show(&config, &pool, &short_url).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    result
}

fn mapping_service(config: &Config, pool: &PgPool) -> MappingService {
    MappingService::new(
        Arc::new(PgMappingRepository::new(Arc::new(pool.clone()))),
        Arc::new(RandomCodeGenerator::default()),
        config.expiry_policy(),
    )
}

/// Deletes expired mappings after showing how many will go.
async fn purge(config: &Config, pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Purge expired mappings".bright_blue().bold());
    println!();

    let expired: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings WHERE expires_at <= $1")
            .bind(Utc::now())
            .fetch_one(pool)
            .await?;

    if expired == 0 {
        println!("{}", "  Nothing to purge".yellow());
        return Ok(());
    }

    println!(
        "  Expired mappings: {}",
        expired.to_string().bright_yellow().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete these mappings?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let removed = mapping_service(config, pool)
        .purge_expired()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to purge mappings: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Removed".green().bold(),
        removed.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints one mapping with its expiry status.
async fn show(config: &Config, pool: &PgPool, short_url: &str) -> Result<()> {
    let mapping = mapping_service(config, pool)
        .get_mapping(short_url)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Mapping not found")?;

    let status = if mapping.is_expired_at(Utc::now()) {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    };

    println!("{}", "🔗 Mapping".bright_blue().bold());
    println!();
    println!("  Code:        {}", mapping.short_code.cyan());
    println!("  Destination: {}", mapping.destination_url.bright_white());
    println!(
        "  Expires:     {} {}",
        mapping
            .expires_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black(),
        status
    );
    println!(
        "  Created:     {}",
        mapping
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!(
        "  Updated:     {}",
        mapping
            .updated_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
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

            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
                .fetch_one(pool)
                .await?;

            let expired: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings WHERE expires_at <= NOW()")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Mappings:   {}",
                total.to_string().bright_green().bold()
            );
            println!("  Expired:    {}", expired.to_string().bright_yellow());
            println!();
        }
    }

    Ok(())
}
