//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use std::path::Path;

use anyhow::{Context, Result};

use itemstat_core::model::ItemStatistics;
use itemstat_core::report::AnalysisReport;

use crate::interpret::BandThresholds;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from an analysis report.
pub fn generate_html(report: &AnalysisReport, bands: &BandThresholds) -> String {
    let agg = &report.analysis.aggregate;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Psychometric analysis: {}</title>\n",
        html_escape(&report.source.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Psychometric analysis</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Source: <strong>{}</strong> | {} students | {} items | {}</p>\n",
        html_escape(&report.source.name),
        report.source.student_count,
        report.source.item_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Reliability summary
    let band = bands.reliability(agg.alpha);
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Cronbach's alpha</th><th>Reliability</th><th>Mean</th><th>SD</th><th>SEM</th><th>Range</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{:.3}</td><td class=\"{}\">{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{} to {}</td></tr></tbody>\n",
        agg.alpha,
        band.css_class(),
        band,
        agg.mean,
        agg.standard_deviation,
        agg.sem,
        agg.min_total,
        agg.max_total,
    ));
    html.push_str("</table>\n");
    html.push_str("</section>\n");

    // Per-item statistics
    html.push_str("<section class=\"items\">\n");
    html.push_str("<h2>Item statistics</h2>\n");
    html.push_str("<table class=\"items-table\">\n");
    html.push_str("<thead><tr><th>Item</th><th>Difficulty</th><th>Level</th><th>Discrimination</th><th>Quality</th><th>Alpha if deleted</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for item in &report.analysis.items {
        html.push_str(&item_row(item, bands));
    }
    html.push_str("</tbody></table>\n");

    if !report.analysis.items.is_empty() {
        html.push_str(&generate_bar_chart(&report.analysis.items, bands));
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn item_row(item: &ItemStatistics, bands: &BandThresholds) -> String {
    let quality = bands.discrimination(item.discrimination);
    let deleted = item
        .alpha_if_deleted
        .map(|a| format!("{a:.3}"))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "<tr><td>{}</td><td>{:.3}</td><td>{}</td><td>{:.3}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
        html_escape(&item.label),
        item.difficulty,
        bands.difficulty(item.difficulty),
        item.discrimination,
        quality.css_class(),
        quality,
        deleted,
    )
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &AnalysisReport, bands: &BandThresholds, path: &Path) -> Result<()> {
    let html = generate_html(report, bands);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn generate_bar_chart(items: &[ItemStatistics], bands: &BandThresholds) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 160;

    let total_height = items.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, item) in items.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (item.discrimination.clamp(0.0, 1.0) * max_width as f64) as usize;

        let color = match bands.discrimination(item.discrimination).css_class() {
            "pass" => "#22c55e",
            "warn" => "#eab308",
            _ => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"13\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&item.label)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.3}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            item.discrimination
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --warn: #fef9c3; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --warn: #713f12; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.warn { background: var(--warn); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use itemstat_core::model::{AggregateStatistics, Analysis};
    use itemstat_core::report::SourceSummary;

    fn make_test_report() -> AnalysisReport {
        AnalysisReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            source: SourceSummary {
                name: "midterm <draft>.csv".into(),
                student_count: 4,
                item_count: 2,
            },
            analysis: Analysis {
                items: vec![
                    ItemStatistics {
                        label: "Q1".into(),
                        difficulty: 0.75,
                        discrimination: 0.45,
                        variance: 0.25,
                        alpha_if_deleted: Some(0.61),
                    },
                    ItemStatistics {
                        label: "Q2".into(),
                        difficulty: 0.25,
                        discrimination: -0.1,
                        variance: 0.25,
                        alpha_if_deleted: None,
                    },
                ],
                aggregate: AggregateStatistics {
                    student_count: 4,
                    item_count: 2,
                    mean: 1.0,
                    standard_deviation: 0.8165,
                    alpha: 0.72,
                    sem: 0.43,
                    min_total: 0.0,
                    max_total: 2.0,
                },
            },
        }
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report, &BandThresholds::default());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("<td>Q1</td>"));
        assert!(html.contains("<td>Q2</td>"));
        assert!(html.contains("0.720"));
        assert!(html.contains("Acceptable"));
        assert!(html.contains("Excellent"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn html_escapes_source_name() {
        let html = generate_html(&make_test_report(), &BandThresholds::default());
        assert!(html.contains("midterm &lt;draft&gt;.csv"));
        assert!(!html.contains("<draft>"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&report, &BandThresholds::default(), &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }

    #[test]
    fn html_write_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("report.html");

        let err = write_html_report(&make_test_report(), &BandThresholds::default(), &path)
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed to write HTML report to"));
        assert!(message.contains("report.html"));
    }
}
