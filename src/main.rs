//! CLI entry point for starwatch.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};

use starwatch::config::{self, Settings};
use starwatch::repository::{create_diesel_pool, migrations, SnapshotRepository};
use starwatch::scrapers::HttpClient;
use starwatch::server;
use starwatch::services::IngestService;

#[derive(Parser)]
#[command(name = "starwatch", version, about = "Starlink constellation statistics tracker")]
struct Cli {
    /// Override the data directory.
    #[arg(long, global = true, env = "STARWATCH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the scrape-and-store pipeline once.
    Scrape,
    /// Start the web server.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Show snapshot freshness and recent records.
    Status {
        /// How many recent records to display.
        #[arg(long, default_value_t = 5)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = config::load_settings().await;
    if let Some(data_dir) = cli.data_dir {
        settings.data_dir = data_dir;
    }
    settings.ensure_directories()?;

    match cli.command {
        Command::Scrape => scrape(&settings).await,
        Command::Serve { host, port } => server::serve(&settings, &host, port).await,
        Command::Status { limit } => status(&settings, limit).await,
    }
}

async fn open_repository(settings: &Settings) -> Result<SnapshotRepository> {
    let pool = create_diesel_pool(&settings.database_path())?;
    migrations::initialize_schema(pool.clone()).await?;
    Ok(SnapshotRepository::new(pool))
}

fn ingest_service(settings: &Settings, repository: SnapshotRepository) -> IngestService {
    let client = HttpClient::new(
        &settings.user_agent,
        Duration::from_secs(settings.request_timeout),
    );
    IngestService::new(client, repository, settings.source_url.clone())
}

async fn scrape(settings: &Settings) -> Result<()> {
    let ingest = ingest_service(settings, open_repository(settings).await?);
    let report = ingest.run().await?;
    println!(
        "Captured {} records in {}ms at {}",
        report.record_count,
        report.duration_ms,
        report.captured_at.to_rfc3339()
    );
    Ok(())
}

async fn status(settings: &Settings, limit: i64) -> Result<()> {
    let repository = open_repository(settings).await?;

    match repository.last_capture_time().await? {
        Some(last) => {
            let hours = (Utc::now() - last).num_hours();
            let state = if hours < settings.freshness_threshold_hours {
                "healthy"
            } else {
                "stale"
            };
            println!("Last snapshot: {} ({} hours ago, {})", last.to_rfc3339(), hours, state);
        }
        None => {
            println!("No snapshots recorded yet");
            return Ok(());
        }
    }

    for record in repository.latest_records(limit).await? {
        println!(
            "{}  {:<48}  operational: {}",
            record.captured_at.format("%Y-%m-%d %H:%M"),
            record.stats.mission,
            record
                .stats
                .total_operational
                .map(|v| v.to_string())
                .unwrap_or_else(|| "?".to_string())
        );
    }
    Ok(())
}
