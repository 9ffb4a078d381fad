//! The `itemstat compare` command.

use std::path::PathBuf;

use anyhow::Result;

use itemstat_core::report::AnalysisReport;
use itemstat_report::config::load_config_from;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: Option<f64>,
    fail_on_regression: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let threshold = match threshold {
        Some(t) => t,
        None => load_config_from(config_path.as_deref())?.compare_threshold,
    };
    anyhow::ensure!(threshold >= 0.0, "threshold must not be negative");

    let baseline = AnalysisReport::load_json(&baseline_path)?;
    let current = AnalysisReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Alpha: {:.3} -> {:.3} ({:+.3}){}",
                report.baseline_alpha,
                report.current_alpha,
                report.alpha_delta,
                if report.alpha_regressed {
                    " reliability regression"
                } else {
                    ""
                }
            );
            println!(
                "Items: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!(
                        "  {} {:.3} -> {:.3} ({:+.3})",
                        r.label, r.baseline_discrimination, r.current_discrimination, r.delta
                    );
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!(
                        "  {} {:.3} -> {:.3} ({:+.3})",
                        i.label, i.baseline_discrimination, i.current_discrimination, i.delta
                    );
                }
            }

            if report.new_items > 0 {
                println!("\n{} new item(s)", report.new_items);
            }
            if report.removed_items > 0 {
                println!("{} removed item(s)", report.removed_items);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
