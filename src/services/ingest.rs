//! The scrape-and-store pipeline: fetch, extract, persist.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::models::MissionStats;
use crate::repository::SnapshotRepository;
use crate::scrapers::{extract_records, FetchError, HttpClient};

/// Pipeline failure taxonomy. Per-field parse anomalies are deliberately
/// absent: a record with unparseable metric cells is still a record, and the
/// gaps travel with it into storage.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to fetch statistics page: {0}")]
    Fetch(#[from] FetchError),
    #[error("statistics page yielded no mission records")]
    EmptyResult,
    #[error("failed to persist snapshot: {0}")]
    Persistence(#[from] diesel::result::Error),
}

/// Outcome of one successful pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub captured_at: DateTime<Utc>,
    pub record_count: usize,
    pub duration_ms: u64,
}

/// One-shot scrape-and-store pipeline.
///
/// Stateless between runs and reentrant; mutual exclusion between
/// overlapping scheduled invocations is the scheduler's responsibility.
#[derive(Clone)]
pub struct IngestService {
    client: HttpClient,
    repository: SnapshotRepository,
    source_url: String,
}

impl IngestService {
    pub fn new(client: HttpClient, repository: SnapshotRepository, source_url: String) -> Self {
        Self {
            client,
            repository,
            source_url,
        }
    }

    /// Fetch the live page and persist one snapshot.
    pub async fn run(&self) -> Result<IngestReport, IngestError> {
        let started = Instant::now();
        tracing::info!(url = %self.source_url, "fetching statistics page");
        let html = self.client.get_text(&self.source_url).await?;

        let mut report = self.ingest_html(&html, Utc::now()).await?;
        report.duration_ms = started.elapsed().as_millis() as u64;
        Ok(report)
    }

    /// Extract records from already-fetched HTML and persist them as one
    /// batch. Split out from [`run`](Self::run) so tests can feed fixture
    /// documents without a network.
    pub async fn ingest_html(
        &self,
        html: &str,
        captured_at: DateTime<Utc>,
    ) -> Result<IngestReport, IngestError> {
        let started = Instant::now();

        let records = extract_records(html);
        if records.is_empty() {
            // A restructured page must not silently produce empty snapshots;
            // storage is never called with an empty batch.
            return Err(IngestError::EmptyResult);
        }

        let inserted = self.repository.insert_batch(captured_at, &records).await?;
        let report = IngestReport {
            captured_at,
            record_count: inserted,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        tracing::info!(
            records = report.record_count,
            duration_ms = report.duration_ms,
            "snapshot persisted"
        );
        Ok(report)
    }

    /// Fetch and extract the live table without persisting.
    pub async fn fetch_current(&self) -> Result<Vec<MissionStats>, IngestError> {
        let html = self.client.get_text(&self.source_url).await?;
        Ok(extract_records(&html))
    }
}
