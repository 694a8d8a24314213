//! Schema bootstrap for the snapshot database.
//!
//! The schema is one append-only table, so creation is idempotent and runs
//! at startup rather than as a separate migration step.

use diesel::prelude::*;
use diesel::sql_query;

use super::diesel_pool::{run_blocking, SqlitePool};

const CREATE_MISSION_STATS: &str = r#"
CREATE TABLE IF NOT EXISTS mission_stats (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    captured_at TEXT NOT NULL,
    mission TEXT NOT NULL,
    number INTEGER NOT NULL,
    year INTEGER NOT NULL,
    day INTEGER NOT NULL,
    date TEXT NOT NULL,
    total_sats_launched BIGINT,
    failed_to_orbit BIGINT,
    early_deorbit BIGINT,
    disposal_complete BIGINT,
    reentry_after_fail BIGINT,
    total_down BIGINT,
    total_in_orbit BIGINT,
    screened BIGINT,
    failed_decaying BIGINT,
    graveyard BIGINT,
    total_working BIGINT,
    disposal_underway BIGINT,
    out_of_constellation BIGINT,
    anomaly BIGINT,
    reserve_relocating BIGINT,
    special BIGINT,
    drift BIGINT,
    ascent BIGINT,
    operational_orbit BIGINT,
    total_operational BIGINT
)"#;

const CREATE_CAPTURED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_mission_stats_captured_at \
     ON mission_stats (captured_at)";

/// Create the snapshot table and its index if missing, and set journaling
/// pragmas for concurrent reads during the daily write.
pub async fn initialize_schema(pool: SqlitePool) -> Result<(), diesel::result::Error> {
    run_blocking(pool, |conn| {
        sql_query("PRAGMA journal_mode = WAL").execute(conn)?;
        sql_query("PRAGMA synchronous = NORMAL").execute(conn)?;
        sql_query(CREATE_MISSION_STATS).execute(conn)?;
        sql_query(CREATE_CAPTURED_AT_INDEX).execute(conn)?;
        Ok(())
    })
    .await
}
