//! Diesel-based snapshot repository for SQLite.
//!
//! One extraction run produces one batch of rows sharing a capture
//! timestamp. Batches are append-only: nothing here updates or deletes a
//! persisted row.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::diesel_models::{MissionStatsRecord, NewMissionStatsRow};
use super::diesel_pool::{run_blocking, SqlitePool};
use super::parse_datetime;
use crate::models::{MissionStats, SnapshotRecord};
use crate::schema::mission_stats;

/// Convert a database row to a domain model.
impl From<MissionStatsRecord> for SnapshotRecord {
    fn from(record: MissionStatsRecord) -> Self {
        SnapshotRecord {
            captured_at: parse_datetime(&record.captured_at),
            stats: MissionStats {
                mission: record.mission,
                number: record.number,
                year: record.year,
                day: record.day as u32,
                date: record.date,
                total_sats_launched: record.total_sats_launched,
                failed_to_orbit: record.failed_to_orbit,
                early_deorbit: record.early_deorbit,
                disposal_complete: record.disposal_complete,
                reentry_after_fail: record.reentry_after_fail,
                total_down: record.total_down,
                total_in_orbit: record.total_in_orbit,
                screened: record.screened,
                failed_decaying: record.failed_decaying,
                graveyard: record.graveyard,
                total_working: record.total_working,
                disposal_underway: record.disposal_underway,
                out_of_constellation: record.out_of_constellation,
                anomaly: record.anomaly,
                reserve_relocating: record.reserve_relocating,
                special: record.special,
                drift: record.drift,
                ascent: record.ascent,
                operational_orbit: record.operational_orbit,
                orbit_heights: String::new(),
                phase_vs_plane: String::new(),
                plane_vs_time: String::new(),
                total_operational: record.total_operational,
            },
        }
    }
}

/// Snapshot repository with compile-time query checking.
#[derive(Clone)]
pub struct DieselSnapshotRepository {
    pool: SqlitePool,
}

impl DieselSnapshotRepository {
    /// Create a new snapshot repository with an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append one extraction run as an immutable batch. Every row carries
    /// `captured_at`, and the insert runs in a single transaction: the batch
    /// lands entirely or not at all.
    pub async fn insert_batch(
        &self,
        captured_at: DateTime<Utc>,
        records: &[MissionStats],
    ) -> Result<usize, diesel::result::Error> {
        let rows: Vec<NewMissionStatsRow> = records
            .iter()
            .map(|stats| NewMissionStatsRow::from_stats(captured_at, stats))
            .collect();
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            conn.transaction::<_, diesel::result::Error, _>(|conn| {
                diesel::insert_into(mission_stats::table)
                    .values(&rows)
                    .execute(conn)
            })
        })
        .await
    }

    /// Most recent rows across all snapshots, newest capture first.
    pub async fn latest_records(
        &self,
        limit: i64,
    ) -> Result<Vec<SnapshotRecord>, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            mission_stats::table
                .order((mission_stats::captured_at.desc(), mission_stats::id.desc()))
                .limit(limit)
                .load::<MissionStatsRecord>(conn)
        })
        .await
        .map(|records| records.into_iter().map(SnapshotRecord::from).collect())
    }

    /// Capture time of the newest snapshot, if any rows exist.
    pub async fn last_capture_time(
        &self,
    ) -> Result<Option<DateTime<Utc>>, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            mission_stats::table
                .select(diesel::dsl::max(mission_stats::captured_at))
                .first::<Option<String>>(conn)
        })
        .await
        .map(|opt| opt.map(|ts| parse_datetime(&ts)))
    }

    /// Every row of the newest snapshot, in insertion (launch) order.
    pub async fn latest_batch(&self) -> Result<Vec<SnapshotRecord>, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            let newest = mission_stats::table
                .select(diesel::dsl::max(mission_stats::captured_at))
                .first::<Option<String>>(conn)?;
            match newest {
                Some(ts) => mission_stats::table
                    .filter(mission_stats::captured_at.eq(&ts))
                    .order(mission_stats::id.asc())
                    .load::<MissionStatsRecord>(conn),
                None => Ok(Vec::new()),
            }
        })
        .await
        .map(|records| records.into_iter().map(SnapshotRecord::from).collect())
    }

    /// Total persisted rows, across all snapshots.
    pub async fn count(&self) -> Result<i64, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            use diesel::dsl::count_star;
            mission_stats::table.select(count_star()).first(conn)
        })
        .await
    }
}
