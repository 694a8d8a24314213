//! Domain models for constellation snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics for one launch mission, as listed in a single row of the
/// upstream table at one observation instant.
///
/// The numeric metrics are `Option<i64>`: a cell that is empty or carries
/// non-numeric text parses to `None`, and `None` flows unchanged into
/// storage. An observed zero and a failed parse are different facts and are
/// kept distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionStats {
    /// Raw mission label, trimmed.
    pub mission: String,
    /// Launch number from the mission designator; 0 when the label carries
    /// no designator.
    pub number: i32,
    /// Launch year from the mission designator; 0 when absent.
    pub year: i32,
    /// Day-of-year from the mission designator; 0 when absent.
    pub day: u32,
    /// Launch date as YYYY-MM-DD, derived from year and day-of-year. Empty
    /// when the pair does not form a valid date.
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
    /// Auxiliary chart image URLs from the three trailing cells; empty when
    /// a cell has no nested image.
    pub orbit_heights: String,
    pub phase_vs_plane: String,
    pub plane_vs_time: String,
    /// Working satellites minus every non-productive state. `None` whenever
    /// any input metric failed to parse.
    pub total_operational: Option<i64>,
}

impl MissionStats {
    /// Satellites actively serving: total working minus disposal, strays,
    /// anomalies, reserves, special handling, drift, and ascent.
    pub fn derived_operational(&self) -> Option<i64> {
        Some(
            self.total_working?
                - self.disposal_underway?
                - self.out_of_constellation?
                - self.anomaly?
                - self.reserve_relocating?
                - self.special?
                - self.drift?
                - self.ascent?,
        )
    }
}

/// One persisted row: a mission record attributed to a capture instant.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotRecord {
    pub captured_at: DateTime<Utc>,
    #[serde(flatten)]
    pub stats: MissionStats,
}

/// Condensed view of one persisted record, for the status surface.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSummary {
    pub captured_at: DateTime<Utc>,
    pub mission: String,
    pub total_operational: Option<i64>,
    pub total_in_orbit: Option<i64>,
}

impl From<&SnapshotRecord> for RecordSummary {
    fn from(record: &SnapshotRecord) -> Self {
        Self {
            captured_at: record.captured_at,
            mission: record.stats.mission.clone(),
            total_operational: record.stats.total_operational,
            total_in_orbit: record.stats.total_in_orbit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with_metrics() -> MissionStats {
        MissionStats {
            mission: "Starlink Group 6-1 (Launch 73, 2023-050)".to_string(),
            number: 73,
            year: 2023,
            day: 50,
            date: "2023-02-19".to_string(),
            total_sats_launched: Some(56),
            failed_to_orbit: Some(0),
            early_deorbit: Some(0),
            disposal_complete: Some(0),
            reentry_after_fail: Some(0),
            total_down: Some(0),
            total_in_orbit: Some(56),
            screened: Some(0),
            failed_decaying: Some(0),
            graveyard: Some(0),
            total_working: Some(60),
            disposal_underway: Some(1),
            out_of_constellation: Some(2),
            anomaly: Some(1),
            reserve_relocating: Some(0),
            special: Some(0),
            drift: Some(3),
            ascent: Some(2),
            operational_orbit: Some(51),
            orbit_heights: String::new(),
            phase_vs_plane: String::new(),
            plane_vs_time: String::new(),
            total_operational: None,
        }
    }

    #[test]
    fn derived_operational_subtracts_every_nonproductive_state() {
        let stats = stats_with_metrics();
        assert_eq!(stats.derived_operational(), Some(51));
    }

    #[test]
    fn derived_operational_is_none_when_any_input_is_missing() {
        let mut stats = stats_with_metrics();
        stats.drift = None;
        assert_eq!(stats.derived_operational(), None);
    }
}
