//! Extraction of mission statistics from the upstream HTML table.
//!
//! The source page is a hand-maintained document whose *last* table holds
//! the data; earlier tables are navigation and legend. Data rows always
//! carry 23 cells: the mission label, 19 numeric metrics, and three cells
//! whose nested images link to auxiliary charts. Header and footer rows have
//! other cell counts and are skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

use super::selector;
use crate::models::MissionStats;

/// Cell count that marks a row as a data row.
const DATA_ROW_CELLS: usize = 23;

/// Mission designator embedded in the label, e.g.
/// `"Tintin Prototypes (Launch 0, 2018-020)"`.
static MISSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Launch (\d+), (\d+)-(\d+)").unwrap());

/// Parse the statistics page into mission records, in source row order
/// (oldest launch first).
///
/// A document without any table yields an empty vector, as does a table
/// with no 23-cell rows. Neither is an error at this layer; the pipeline
/// decides what an empty result means.
pub fn extract_records(html: &str) -> Vec<MissionStats> {
    let document = Html::parse_document(html);
    let Some(table) = document.select(selector!("table")).last() else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for row in table.select(selector!("tr")) {
        let cells: Vec<ElementRef> = row.select(selector!("td")).collect();
        if cells.len() != DATA_ROW_CELLS {
            continue;
        }
        records.push(record_from_cells(&cells));
    }
    records
}

fn record_from_cells(cells: &[ElementRef]) -> MissionStats {
    let mission = cell_text(cells[0]);
    let (number, year, day) = parse_mission_designator(&mission);

    let mut record = MissionStats {
        date: ordinal_date(year, day),
        mission,
        number,
        year,
        day,
        total_sats_launched: cell_number(cells[1]),
        failed_to_orbit: cell_number(cells[2]),
        early_deorbit: cell_number(cells[3]),
        disposal_complete: cell_number(cells[4]),
        reentry_after_fail: cell_number(cells[5]),
        total_down: cell_number(cells[6]),
        total_in_orbit: cell_number(cells[7]),
        screened: cell_number(cells[8]),
        failed_decaying: cell_number(cells[9]),
        graveyard: cell_number(cells[10]),
        total_working: cell_number(cells[11]),
        disposal_underway: cell_number(cells[12]),
        out_of_constellation: cell_number(cells[13]),
        anomaly: cell_number(cells[14]),
        reserve_relocating: cell_number(cells[15]),
        special: cell_number(cells[16]),
        drift: cell_number(cells[17]),
        ascent: cell_number(cells[18]),
        operational_orbit: cell_number(cells[19]),
        orbit_heights: cell_image_url(cells[20]),
        phase_vs_plane: cell_image_url(cells[21]),
        plane_vs_time: cell_image_url(cells[22]),
        total_operational: None,
    };
    record.total_operational = record.derived_operational();
    record
}

/// Concatenated descendant text, trimmed.
fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Base-10 integer, or `None` for empty and non-numeric cells. A failed
/// parse never aborts the row; the gap is carried in the record.
fn cell_number(cell: ElementRef) -> Option<i64> {
    cell_text(cell).parse().ok()
}

/// `src` of the first image nested in the cell, or empty when there is none.
fn cell_image_url(cell: ElementRef) -> String {
    cell.select(selector!("img"))
        .next()
        .and_then(|img| img.value().attr("src"))
        .unwrap_or_default()
        .to_string()
}

/// Pull `(number, year, day)` out of a mission label. Labels without a
/// designator (footnote rows that still have 23 cells) yield all zeroes;
/// unlike the metric cells, this default is expected and not a parse
/// anomaly.
fn parse_mission_designator(mission: &str) -> (i32, i32, u32) {
    match MISSION_PATTERN.captures(mission) {
        Some(caps) => (
            caps[1].parse().unwrap_or(0),
            caps[2].parse().unwrap_or(0),
            caps[3].parse().unwrap_or(0),
        ),
        None => (0, 0, 0),
    }
}

/// Render a (year, day-of-year) pair as YYYY-MM-DD. Day-of-year is
/// 1-indexed: day 20 of 2018 is 2018-01-20. Pairs that do not form a valid
/// ordinal date (designator-less rows come through as 0/0) render empty.
fn ordinal_date(year: i32, day: u32) -> String {
    chrono::NaiveDate::from_yo_opt(year, day)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a 23-cell data row: mission label, 19 metric cells, and three
    /// chart cells (empty string = no image).
    fn data_row(mission: &str, metrics: &[&str], charts: [&str; 3]) -> String {
        assert_eq!(metrics.len(), 19);
        let mut row = String::from("<tr>");
        row.push_str(&format!("<td>{mission}</td>"));
        for metric in metrics {
            row.push_str(&format!("<td> {metric} </td>"));
        }
        for chart in charts {
            if chart.is_empty() {
                row.push_str("<td></td>");
            } else {
                row.push_str(&format!(r#"<td><a href="{chart}"><img src="{chart}"></a></td>"#));
            }
        }
        row.push_str("</tr>");
        row
    }

    /// Wraps rows in a page with a leading navigation table, which must be
    /// ignored in favor of the last table.
    fn stats_page(rows: &str) -> String {
        format!(
            "<html><body>\
             <table><tr><td>Home</td><td>Stats</td></tr></table>\
             <h1>Starlink Launch Statistics</h1>\
             <table><tr><th>Mission</th><th>Totals</th></tr>{rows}</table>\
             </body></html>"
        )
    }

    const TINTIN_METRICS: [&str; 19] = [
        "2", "0", "0", "2", "0", "2", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0",
        "0", "0",
    ];

    const GROUP_METRICS: [&str; 19] = [
        "100", "1", "2", "3", "4", "10", "90", "5", "6", "7", "60", "1", "2", "1", "0", "0",
        "3", "2", "51",
    ];

    #[test]
    fn only_rows_with_exactly_23_cells_become_records() {
        let rows = format!(
            "{}<tr><td>short row</td><td>2</td></tr>{}\
             <tr>{}</tr>",
            data_row("Tintin Prototypes (Launch 0, 2018-020)", &TINTIN_METRICS, ["", "", ""]),
            data_row("Starlink Group 10-13 (Launch 203, 2024-196)", &GROUP_METRICS, ["", "", ""]),
            "<td>x</td>".repeat(24),
        );
        let records = extract_records(&stats_page(&rows));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn records_come_from_the_last_table_in_row_order() {
        let rows = format!(
            "{}{}",
            data_row("Tintin Prototypes (Launch 0, 2018-020)", &TINTIN_METRICS, ["", "", ""]),
            data_row("Starlink Group 10-13 (Launch 203, 2024-196)", &GROUP_METRICS, ["", "", ""]),
        );
        let records = extract_records(&stats_page(&rows));
        assert_eq!(records[0].mission, "Tintin Prototypes (Launch 0, 2018-020)");
        assert_eq!(records[1].mission, "Starlink Group 10-13 (Launch 203, 2024-196)");
    }

    #[test]
    fn mission_designator_is_parsed_from_the_label() {
        assert_eq!(
            parse_mission_designator("Tintin Prototypes (Launch 0, 2018-020)"),
            (0, 2018, 20)
        );
        assert_eq!(
            parse_mission_designator("Starlink Group 10-13 (Launch 203, 2024-196)"),
            (203, 2024, 196)
        );
    }

    #[test]
    fn labels_without_a_designator_default_to_zeroes() {
        assert_eq!(parse_mission_designator("Totals as of 2024 Jul 14"), (0, 0, 0));
    }

    #[test]
    fn ordinal_date_treats_day_of_year_as_one_indexed() {
        assert_eq!(ordinal_date(2018, 20), "2018-01-20");
        assert_eq!(ordinal_date(2024, 196), "2024-07-14");
    }

    #[test]
    fn invalid_ordinal_dates_render_empty() {
        assert_eq!(ordinal_date(0, 0), "");
        assert_eq!(ordinal_date(2023, 366), "");
    }

    #[test]
    fn metric_cells_map_positionally_and_totals_are_derived() {
        let rows = data_row(
            "Starlink Group 10-13 (Launch 203, 2024-196)",
            &GROUP_METRICS,
            ["", "", ""],
        );
        let records = extract_records(&stats_page(&rows));
        let record = &records[0];
        assert_eq!(record.number, 203);
        assert_eq!(record.year, 2024);
        assert_eq!(record.day, 196);
        assert_eq!(record.date, "2024-07-14");
        assert_eq!(record.total_sats_launched, Some(100));
        assert_eq!(record.total_in_orbit, Some(90));
        assert_eq!(record.total_working, Some(60));
        assert_eq!(record.operational_orbit, Some(51));
        // 60 - 1 - 2 - 1 - 0 - 0 - 3 - 2
        assert_eq!(record.total_operational, Some(51));
    }

    #[test]
    fn chart_image_urls_are_taken_from_nested_images() {
        let rows = data_row(
            "Starlink Group 10-13 (Launch 203, 2024-196)",
            &GROUP_METRICS,
            ["heights.png", "", "phase.png"],
        );
        let records = extract_records(&stats_page(&rows));
        assert_eq!(records[0].orbit_heights, "heights.png");
        assert_eq!(records[0].phase_vs_plane, "");
        assert_eq!(records[0].plane_vs_time, "phase.png");
    }

    #[test]
    fn non_numeric_cells_become_none_without_aborting_the_row() {
        let mut metrics = GROUP_METRICS;
        metrics[0] = "N/A";
        metrics[10] = "";
        let rows = data_row(
            "Starlink Group 10-13 (Launch 203, 2024-196)",
            &metrics,
            ["", "", ""],
        );
        let records = extract_records(&stats_page(&rows));
        let record = &records[0];
        assert_eq!(record.total_sats_launched, None);
        assert_eq!(record.total_working, None);
        // Remaining cells still parse.
        assert_eq!(record.total_in_orbit, Some(90));
        // A missing input leaves the derived total unknown, not zero.
        assert_eq!(record.total_operational, None);
    }

    #[test]
    fn documents_without_tables_yield_no_records() {
        let records = extract_records("<html><body><p>redesigned page</p></body></html>");
        assert!(records.is_empty());
    }

    #[test]
    fn parsing_is_idempotent_for_identical_input() {
        let page = stats_page(&data_row(
            "Tintin Prototypes (Launch 0, 2018-020)",
            &TINTIN_METRICS,
            ["a.png", "b.png", "c.png"],
        ));
        assert_eq!(extract_records(&page), extract_records(&page));
    }
}
