//! The `itemstat analyze` command.

use std::path::PathBuf;

use anyhow::Result;

use itemstat_core::engine::{AnalysisEngine, EngineConfig};
use itemstat_core::parser;
use itemstat_core::report::AnalysisReport;
use itemstat_report::config::load_config_from;
use itemstat_report::html::write_html_report;
use itemstat_report::interpret::BandThresholds;

pub fn execute(
    input: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    no_alpha_if_deleted: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let format = format.unwrap_or_else(|| config.default_format.clone());
    let formats: Vec<&str> = if format == "all" {
        vec!["table", "json", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };
    for fmt in &formats {
        anyhow::ensure!(
            matches!(*fmt, "table" | "json" | "html"),
            "unknown format: '{fmt}' (use table, json, html or all)"
        );
    }
    tracing::debug!(?formats, input = %input.display(), "starting analysis");

    let matrix = parser::parse_responses(&input)?;

    let engine = AnalysisEngine::new(EngineConfig {
        compute_alpha_if_deleted: config.alpha_if_deleted && !no_alpha_if_deleted,
    });
    let source_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let report = engine.run(&source_name, &matrix);

    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    for fmt in &formats {
        match *fmt {
            "table" => print_summary(&report, &config.bands),
            "json" => {
                let path = output.join(format!("analysis-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("analysis-{timestamp}.html"));
                write_html_report(&report, &config.bands, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            other => anyhow::bail!("unknown format: '{other}'"),
        }
    }

    Ok(())
}

fn print_summary(report: &AnalysisReport, bands: &BandThresholds) {
    use comfy_table::{Cell, Table};

    let agg = &report.analysis.aggregate;

    let mut summary = Table::new();
    summary.set_header(vec![
        "Students",
        "Items",
        "Alpha",
        "Reliability",
        "Mean",
        "SD",
        "SEM",
    ]);
    summary.add_row(vec![
        Cell::new(agg.student_count),
        Cell::new(agg.item_count),
        Cell::new(format!("{:.3}", agg.alpha)),
        Cell::new(bands.reliability(agg.alpha)),
        Cell::new(format!("{:.2}", agg.mean)),
        Cell::new(format!("{:.2}", agg.standard_deviation)),
        Cell::new(format!("{:.2}", agg.sem)),
    ]);

    let mut items = Table::new();
    items.set_header(vec![
        "Item",
        "Difficulty",
        "Level",
        "Discrimination",
        "Quality",
        "Alpha if deleted",
    ]);
    for item in &report.analysis.items {
        items.add_row(vec![
            Cell::new(&item.label),
            Cell::new(format!("{:.3}", item.difficulty)),
            Cell::new(bands.difficulty(item.difficulty)),
            Cell::new(format!("{:.3}", item.discrimination)),
            Cell::new(bands.discrimination(item.discrimination)),
            Cell::new(
                item.alpha_if_deleted
                    .map(|a| format!("{a:.3}"))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    println!("Analysis of {}", report.source.name);
    println!("{summary}");
    println!("{items}");
}
