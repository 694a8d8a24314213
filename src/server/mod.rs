//! Web surface for the snapshot pipeline.
//!
//! Provides:
//! - The scheduler trigger endpoint an external daily timer invokes
//! - A read-only status endpoint reporting snapshot freshness
//! - Current (unpersisted) data straight from the upstream page
//! - A small HTML dashboard over the latest snapshot

mod routes;
mod templates;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::repository::{create_diesel_pool, migrations, SnapshotRepository};
use crate::scrapers::HttpClient;
use crate::services::IngestService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub snapshot_repo: Arc<SnapshotRepository>,
    pub ingest: Arc<IngestService>,
    pub freshness_threshold_hours: i64,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let pool = create_diesel_pool(&settings.database_path())?;
        migrations::initialize_schema(pool.clone()).await?;

        let snapshot_repo = SnapshotRepository::new(pool);
        let client = HttpClient::new(
            &settings.user_agent,
            Duration::from_secs(settings.request_timeout),
        );
        let ingest = IngestService::new(
            client,
            snapshot_repo.clone(),
            settings.source_url.clone(),
        );

        Ok(Self {
            snapshot_repo: Arc::new(snapshot_repo),
            ingest: Arc::new(ingest),
            freshness_threshold_hours: settings.freshness_threshold_hours,
        })
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings).await?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
