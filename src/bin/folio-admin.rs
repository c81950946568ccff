use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use folio::analytics::QueryService;
use folio::config::Config;
use folio::models::format_timestamp;
use folio::storage;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio-admin")]
#[command(about = "Folio visitor log admin CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show visit statistics
    Stats,
    /// List contact messages, newest first
    Messages,
    /// Export all visitor rows as CSV
    Export {
        /// Output file (defaults to visitor_logs_<timestamp>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let storage = storage::connect(&config.database).await?;
    let queries = QueryService::new(storage);

    match cli.command {
        Commands::Stats => {
            let stats = queries.stats(Utc::now()).await?;
            println!("Total visits:    {}", stats.total_visits);
            println!("Unique visitors: {}", stats.unique_visitors);
            println!("Messages:        {}", stats.total_messages);

            println!("\nTop pages:");
            for page in &stats.top_pages {
                println!("  {:<40} {}", page.page, page.count);
            }

            println!("\nTop browsers:");
            for browser in &stats.top_browsers {
                println!(
                    "  {:<40} {}",
                    browser.browser.as_deref().unwrap_or("-"),
                    browser.count
                );
            }

            println!("\nLast 24 hours (UTC):");
            for hour in &stats.hourly_visits {
                println!("  {}:00  {}", hour.hour, hour.count);
            }
        }
        Commands::Messages => {
            let list = queries.messages().await?;
            if list.messages.is_empty() {
                println!("No contact messages found.");
            } else {
                for msg in list.messages {
                    println!(
                        "[{}] {} <{}> from {}",
                        format_timestamp(msg.timestamp),
                        msg.name,
                        msg.email,
                        msg.ip_address
                    );
                    println!("{}", msg.message);
                    println!("{}", "-".repeat(80));
                }
            }
        }
        Commands::Export { output } => {
            let export = queries.export_csv(Utc::now()).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(&export.filename));
            tokio::fs::write(&path, export.body)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("✓ Exported visitor logs to {}", path.display());
        }
    }

    Ok(())
}
