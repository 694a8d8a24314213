//! SQLite persistence for constellation snapshots.

pub mod diesel_models;
pub mod diesel_pool;
pub mod diesel_snapshot;
pub mod migrations;

pub use diesel_pool::{create_diesel_pool, SqlitePool};
pub use diesel_snapshot::DieselSnapshotRepository as SnapshotRepository;

use chrono::{DateTime, Utc};

/// Parse an RFC 3339 timestamp stored as text. Rows with a hand-edited or
/// truncated timestamp fall back to the epoch rather than poisoning a read.
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}
