//! Diesel ORM models for the mission_stats table.
//!
//! These models provide compile-time type checking for database operations.
//! Metric columns are nullable: a NULL is a cell that did not parse, which
//! is not the same row as one that recorded a zero.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::models::MissionStats;
use crate::schema;

/// Persisted snapshot row from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::mission_stats)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MissionStatsRecord {
    pub id: i32,
    pub captured_at: String,
    pub mission: String,
    pub number: i32,
    pub year: i32,
    pub day: i32,
    pub date: String,
    pub total_sats_launched: Option<i64>,
    pub failed_to_orbit: Option<i64>,
    pub early_deorbit: Option<i64>,
    pub disposal_complete: Option<i64>,
    pub reentry_after_fail: Option<i64>,
    pub total_down: Option<i64>,
    pub total_in_orbit: Option<i64>,
    pub screened: Option<i64>,
    pub failed_decaying: Option<i64>,
    pub graveyard: Option<i64>,
    pub total_working: Option<i64>,
    pub disposal_underway: Option<i64>,
    pub out_of_constellation: Option<i64>,
    pub anomaly: Option<i64>,
    pub reserve_relocating: Option<i64>,
    pub special: Option<i64>,
    pub drift: Option<i64>,
    pub ascent: Option<i64>,
    pub operational_orbit: Option<i64>,
    pub total_operational: Option<i64>,
}

/// New snapshot row for insertion; SQLite assigns the id.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::mission_stats)]
pub struct NewMissionStatsRow {
    pub captured_at: String,
    pub mission: String,
    pub number: i32,
    pub year: i32,
    pub day: i32,
    pub date: String,
    pub total_sats_launched: Option<i64>,
    pub failed_to_orbit: Option<i64>,
    pub early_deorbit: Option<i64>,
    pub disposal_complete: Option<i64>,
    pub reentry_after_fail: Option<i64>,
    pub total_down: Option<i64>,
    pub total_in_orbit: Option<i64>,
    pub screened: Option<i64>,
    pub failed_decaying: Option<i64>,
    pub graveyard: Option<i64>,
    pub total_working: Option<i64>,
    pub disposal_underway: Option<i64>,
    pub out_of_constellation: Option<i64>,
    pub anomaly: Option<i64>,
    pub reserve_relocating: Option<i64>,
    pub special: Option<i64>,
    pub drift: Option<i64>,
    pub ascent: Option<i64>,
    pub operational_orbit: Option<i64>,
    pub total_operational: Option<i64>,
}

impl NewMissionStatsRow {
    /// Build an insertable row from an extracted record and the capture
    /// timestamp shared by its batch. The auxiliary chart URLs live only on
    /// the in-memory record and are not persisted.
    pub fn from_stats(captured_at: DateTime<Utc>, stats: &MissionStats) -> Self {
        Self {
            captured_at: captured_at.to_rfc3339(),
            mission: stats.mission.clone(),
            number: stats.number,
            year: stats.year,
            day: stats.day as i32,
            date: stats.date.clone(),
            total_sats_launched: stats.total_sats_launched,
            failed_to_orbit: stats.failed_to_orbit,
            early_deorbit: stats.early_deorbit,
            disposal_complete: stats.disposal_complete,
            reentry_after_fail: stats.reentry_after_fail,
            total_down: stats.total_down,
            total_in_orbit: stats.total_in_orbit,
            screened: stats.screened,
            failed_decaying: stats.failed_decaying,
            graveyard: stats.graveyard,
            total_working: stats.total_working,
            disposal_underway: stats.disposal_underway,
            out_of_constellation: stats.out_of_constellation,
            anomaly: stats.anomaly,
            reserve_relocating: stats.reserve_relocating,
            special: stats.special,
            drift: stats.drift,
            ascent: stats.ascent,
            operational_orbit: stats.operational_orbit,
            total_operational: stats.total_operational,
        }
    }
}
