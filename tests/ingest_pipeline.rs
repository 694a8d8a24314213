//! End-to-end checks of the ingest pipeline against a temporary database.
//!
//! The pipeline is driven through `ingest_html` with fixture documents, so
//! none of these tests touch the network.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use starwatch::repository::{create_diesel_pool, migrations, SnapshotRepository};
use starwatch::scrapers::HttpClient;
use starwatch::services::{IngestError, IngestService};

/// Create a temporary SQLite database with the schema applied.
async fn setup_test_repo() -> (SnapshotRepository, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");

    let pool = create_diesel_pool(&db_path).expect("Failed to create pool");
    migrations::initialize_schema(pool.clone())
        .await
        .expect("Failed to initialize schema");

    (SnapshotRepository::new(pool), dir)
}

/// Ingest service wired to the test repository. The source URL is never
/// contacted; tests feed HTML directly.
fn test_service(repository: SnapshotRepository) -> IngestService {
    let client = HttpClient::new("starwatch-test", Duration::from_secs(5));
    IngestService::new(
        client,
        repository,
        "http://127.0.0.1:9/stats.html".to_string(),
    )
}

/// A trimmed rendition of the upstream page: navigation table first, data
/// table last, data rows with 23 cells among header and footer rows.
fn fixture_page() -> String {
    let tintin_metrics = "<td>2</td><td>0</td><td>0</td><td>2</td><td>0</td><td>2</td>\
                          <td>0</td><td>0</td><td>0</td><td>0</td><td>0</td><td>0</td>\
                          <td>0</td><td>0</td><td>0</td><td>0</td><td>0</td><td>0</td><td>0</td>";
    let group_metrics = "<td>23</td><td>0</td><td>0</td><td>0</td><td>0</td><td>0</td>\
                         <td>23</td><td>0</td><td>0</td><td>0</td><td>23</td><td>0</td>\
                         <td>0</td><td>1</td><td>0</td><td>0</td><td>0</td><td>2</td><td>20</td>";
    format!(
        "<html><body>\
         <table><tr><td>Home</td><td>Stats</td></tr></table>\
         <table>\
         <tr><th>Mission</th><th>Up</th><th>Down</th></tr>\
         <tr><td>Tintin Prototypes (Launch 0, 2018-020)</td>{tintin_metrics}\
         <td></td><td></td><td></td></tr>\
         <tr><td>Starlink Group 10-13 (Launch 203, 2024-196)</td>{group_metrics}\
         <td><img src=\"heights.png\"></td><td><img src=\"phase.png\"></td><td></td></tr>\
         <tr><td>Totals</td><td>25</td></tr>\
         </table></body></html>"
    )
}

#[tokio::test]
async fn ingest_persists_every_data_row_as_one_batch() {
    let (repo, _dir) = setup_test_repo().await;
    let service = test_service(repo.clone());
    let captured_at = Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap();

    let report = service
        .ingest_html(&fixture_page(), captured_at)
        .await
        .unwrap();
    assert_eq!(report.record_count, 2);
    assert_eq!(report.captured_at, captured_at);

    let batch = repo.latest_batch().await.unwrap();
    assert_eq!(batch.len(), 2);

    let tintin = &batch[0].stats;
    assert_eq!(tintin.mission, "Tintin Prototypes (Launch 0, 2018-020)");
    assert_eq!(tintin.number, 0);
    assert_eq!(tintin.year, 2018);
    assert_eq!(tintin.day, 20);
    assert_eq!(tintin.date, "2018-01-20");

    let group = &batch[1].stats;
    assert_eq!(group.number, 203);
    assert_eq!(group.date, "2024-07-14");
    assert_eq!(group.total_in_orbit, Some(23));
    // 23 working - 1 anomaly - 2 ascent
    assert_eq!(group.total_operational, Some(20));
}

#[tokio::test]
async fn pages_without_data_rows_fail_without_touching_storage() {
    let (repo, _dir) = setup_test_repo().await;
    let service = test_service(repo.clone());

    let err = service
        .ingest_html("<html><body><p>redesign</p></body></html>", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::EmptyResult));

    assert_eq!(repo.count().await.unwrap(), 0);
    assert_eq!(repo.last_capture_time().await.unwrap(), None);
}

#[tokio::test]
async fn repeated_runs_accumulate_timestamped_snapshots() {
    let (repo, _dir) = setup_test_repo().await;
    let service = test_service(repo.clone());
    let page = fixture_page();

    let first = Utc.with_ymd_and_hms(2024, 7, 14, 0, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap();
    service.ingest_html(&page, first).await.unwrap();
    service.ingest_html(&page, second).await.unwrap();

    // Duplicate missions across snapshots are expected; this is a time
    // series, not an upsert.
    assert_eq!(repo.count().await.unwrap(), 4);
    assert_eq!(repo.last_capture_time().await.unwrap(), Some(second));

    let batch = repo.latest_batch().await.unwrap();
    assert_eq!(batch.len(), 2);
    assert!(batch.iter().all(|record| record.captured_at == second));
}

#[tokio::test]
async fn snapshot_age_supports_staleness_checks() {
    let (repo, _dir) = setup_test_repo().await;
    let service = test_service(repo.clone());

    let thirty_hours_ago = Utc::now() - chrono::Duration::hours(30);
    service
        .ingest_html(&fixture_page(), thirty_hours_ago)
        .await
        .unwrap();

    let last = repo.last_capture_time().await.unwrap().unwrap();
    let hours_since = (Utc::now() - last).num_hours();
    assert!(hours_since >= 25, "snapshot should read as stale");
}
