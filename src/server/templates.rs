//! HTML templates for the dashboard.
//!
//! Hand-rolled string templates; the surface is one page and a failure
//! screen, not worth a templating engine.

use chrono::{DateTime, Utc};

use crate::models::SnapshotRecord;

/// Base HTML template.
fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        body {{ font-family: -apple-system, "Segoe UI", sans-serif; margin: 2rem; color: #1a1a2e; }}
        h1 {{ font-size: 1.4rem; }}
        table {{ border-collapse: collapse; margin-top: 1rem; }}
        th, td {{ border: 1px solid #c5c8d4; padding: 0.3rem 0.7rem; font-size: 0.85rem; }}
        th {{ background: #eef0f6; text-align: left; }}
        td.num {{ text-align: right; font-variant-numeric: tabular-nums; }}
        .banner {{ padding: 0.5rem 0.8rem; border-radius: 4px; display: inline-block; }}
        .banner.healthy {{ background: #e3f6e8; color: #19672c; }}
        .banner.stale {{ background: #fbeaea; color: #8c1c1c; }}
    </style>
</head>
<body>
{content}
</body>
</html>"#
    )
}

/// Escape text destined for an HTML context.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn format_metric(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
}

/// The dashboard: freshness banner plus the latest snapshot as a table.
pub fn dashboard_page(
    records: &[SnapshotRecord],
    captured_at: Option<DateTime<Utc>>,
    stale: bool,
) -> String {
    let banner = match captured_at {
        Some(at) => {
            let state = if stale { "stale" } else { "healthy" };
            format!(
                r#"<div class="banner {state}">Pipeline {state}: snapshot of {} ({} records)</div>"#,
                at.format("%Y-%m-%d %H:%M UTC"),
                records.len()
            )
        }
        None => r#"<div class="banner stale">No snapshots recorded yet</div>"#.to_string(),
    };

    let mut rows = String::new();
    for record in records {
        let stats = &record.stats;
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td>\
             <td class=\"num\">{}</td><td class=\"num\">{}</td>\
             <td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            escape_html(&stats.mission),
            escape_html(&stats.date),
            format_metric(stats.total_sats_launched),
            format_metric(stats.total_in_orbit),
            format_metric(stats.total_working),
            format_metric(stats.total_operational),
        ));
    }

    let content = format!(
        "<h1>Starlink constellation statistics</h1>\n{banner}\n\
         <table>\n<tr><th>Mission</th><th>Launch date</th>\
         <th>Launched</th><th>In orbit</th><th>Working</th><th>Operational</th></tr>\n\
         {rows}</table>"
    );
    base_template("starwatch", &content)
}

/// Failure screen for dashboard queries.
pub fn error_page(message: &str) -> String {
    let content = format!(
        "<h1>Starlink constellation statistics</h1>\n\
         <div class=\"banner stale\">{}</div>",
        escape_html(message)
    );
    base_template("starwatch: error", &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mission_labels_are_escaped() {
        let page = error_page("<script>alert(1)</script>");
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_dashboard_reports_missing_snapshots() {
        let page = dashboard_page(&[], None, true);
        assert!(page.contains("No snapshots recorded yet"));
    }
}
