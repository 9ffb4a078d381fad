//! Analysis report types with JSON persistence and revision comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Analysis;

/// A complete analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Where the responses came from.
    pub source: SourceSummary,
    /// Engine output.
    pub analysis: Analysis,
}

/// Summary of the analyzed response file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSummary {
    pub name: String,
    pub student_count: usize,
    pub item_count: usize,
}

impl AnalysisReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AnalysisReport = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse report JSON: {}", path.display()))?;
        Ok(report)
    }

    /// Compare this report against a baseline (e.g. a previous exam revision).
    ///
    /// Items are matched by label. A discrimination drop larger than
    /// `threshold` is a regression; a rise larger than `threshold` is an
    /// improvement.
    pub fn compare(&self, baseline: &AnalysisReport, threshold: f64) -> ComparisonReport {
        use std::collections::HashMap;

        let baseline_items: HashMap<&str, f64> = baseline
            .analysis
            .items
            .iter()
            .map(|i| (i.label.as_str(), i.discrimination))
            .collect();

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_items = 0usize;

        for item in &self.analysis.items {
            let Some(&baseline_val) = baseline_items.get(item.label.as_str()) else {
                new_items += 1;
                continue;
            };
            let delta = item.discrimination - baseline_val;
            let change = ItemChange {
                label: item.label.clone(),
                baseline_discrimination: baseline_val,
                current_discrimination: item.discrimination,
                delta,
            };
            if delta < -threshold {
                regressions.push(change);
            } else if delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let removed_items = baseline
            .analysis
            .items
            .iter()
            .filter(|b| !self.analysis.items.iter().any(|c| c.label == b.label))
            .count();

        let baseline_alpha = baseline.analysis.aggregate.alpha;
        let current_alpha = self.analysis.aggregate.alpha;
        let alpha_delta = current_alpha - baseline_alpha;

        ComparisonReport {
            baseline_alpha,
            current_alpha,
            alpha_delta,
            alpha_regressed: alpha_delta < -threshold,
            sem_delta: self.analysis.aggregate.sem - baseline.analysis.aggregate.sem,
            regressions,
            improvements,
            unchanged,
            new_items,
            removed_items,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub baseline_alpha: f64,
    pub current_alpha: f64,
    pub alpha_delta: f64,
    /// Alpha dropped by more than the threshold.
    pub alpha_regressed: bool,
    pub sem_delta: f64,
    /// Items whose discrimination went down.
    pub regressions: Vec<ItemChange>,
    /// Items whose discrimination went up.
    pub improvements: Vec<ItemChange>,
    /// Items with no significant change.
    pub unchanged: usize,
    /// Items in current but not baseline.
    pub new_items: usize,
    /// Items in baseline but not current.
    pub removed_items: usize,
}

/// A change in one item's discrimination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemChange {
    pub label: String,
    pub baseline_discrimination: f64,
    pub current_discrimination: f64,
    pub delta: f64,
}

impl ComparisonReport {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Reliability:** alpha {:.3} -> {:.3} ({:+.3})\n\n",
            self.baseline_alpha, self.current_alpha, self.alpha_delta
        ));
        md.push_str(&format!(
            "**Items:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        if !self.regressions.is_empty() {
            md.push_str("### Regressions\n\n");
            md.push_str(&change_table(&self.regressions));
            md.push('\n');
        }

        if !self.improvements.is_empty() {
            md.push_str("### Improvements\n\n");
            md.push_str(&change_table(&self.improvements));
        }

        md
    }

    /// Returns true if alpha or any item regressed.
    pub fn has_regressions(&self) -> bool {
        self.alpha_regressed || !self.regressions.is_empty()
    }
}

fn change_table(changes: &[ItemChange]) -> String {
    let mut md = String::new();
    md.push_str("| Item | Baseline | Current | Delta |\n");
    md.push_str("|------|----------|---------|-------|\n");
    for c in changes {
        md.push_str(&format!(
            "| {} | {:.3} | {:.3} | {:+.3} |\n",
            c.label, c.baseline_discrimination, c.current_discrimination, c.delta
        ));
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AggregateStatistics, ItemStatistics};

    fn item(label: &str, discrimination: f64) -> ItemStatistics {
        ItemStatistics {
            label: label.into(),
            difficulty: 0.5,
            discrimination,
            variance: 0.25,
            alpha_if_deleted: None,
        }
    }

    fn make_report(alpha: f64, items: Vec<ItemStatistics>) -> AnalysisReport {
        AnalysisReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            source: SourceSummary {
                name: "test.csv".into(),
                student_count: 10,
                item_count: items.len(),
            },
            analysis: Analysis {
                aggregate: AggregateStatistics {
                    student_count: 10,
                    item_count: items.len(),
                    mean: 5.0,
                    standard_deviation: 2.0,
                    alpha,
                    sem: 2.0 * (1.0f64 - alpha).sqrt(),
                    min_total: 1.0,
                    max_total: 9.0,
                },
                items,
            },
        }
    }

    #[test]
    fn compare_identical_reports() {
        let baseline = make_report(0.8, vec![item("Q1", 0.4), item("Q2", 0.3)]);
        let current = baseline.clone();

        let report = current.compare(&baseline, 0.05);
        assert!(report.regressions.is_empty());
        assert!(report.improvements.is_empty());
        assert_eq!(report.unchanged, 2);
        assert!(!report.has_regressions());
    }

    #[test]
    fn compare_with_regression() {
        let baseline = make_report(0.8, vec![item("Q1", 0.4), item("Q2", 0.3)]);
        let current = make_report(0.8, vec![item("Q1", 0.1), item("Q2", 0.5)]);

        let report = current.compare(&baseline, 0.05);
        assert_eq!(report.regressions.len(), 1);
        assert_eq!(report.regressions[0].label, "Q1");
        assert_eq!(report.improvements.len(), 1);
        assert!(report.has_regressions());
    }

    #[test]
    fn compare_alpha_drop() {
        let baseline = make_report(0.85, vec![item("Q1", 0.4)]);
        let current = make_report(0.70, vec![item("Q1", 0.4)]);

        let report = current.compare(&baseline, 0.05);
        assert!(report.alpha_regressed);
        assert!((report.alpha_delta + 0.15).abs() < 1e-9);
        assert!(report.sem_delta > 0.0);
        assert!(report.has_regressions());
    }

    #[test]
    fn compare_with_new_and_removed() {
        let baseline = make_report(0.8, vec![item("old", 0.4), item("kept", 0.3)]);
        let current = make_report(0.8, vec![item("new", 0.4), item("kept", 0.3)]);

        let report = current.compare(&baseline, 0.05);
        assert_eq!(report.new_items, 1);
        assert_eq!(report.removed_items, 1);
        assert_eq!(report.unchanged, 1);
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report(0.8, vec![item("Q1", 0.4)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = AnalysisReport::load_json(&path).unwrap();

        assert_eq!(loaded.source.name, "test.csv");
        assert_eq!(loaded.analysis.items.len(), 1);
        assert_eq!(loaded.analysis.items[0].label, "Q1");
        assert!((loaded.analysis.aggregate.sem - report.analysis.aggregate.sem).abs() < 1e-12);
    }

    #[test]
    fn load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(AnalysisReport::load_json(&path).is_err());
    }

    #[test]
    fn markdown_output() {
        let baseline = make_report(0.8, vec![item("Q1", 0.4)]);
        let current = make_report(0.8, vec![item("Q1", 0.1)]);

        let md = current.compare(&baseline, 0.05).to_markdown();
        assert!(md.contains("Regressions"));
        assert!(md.contains("Q1"));
        assert!(md.contains("alpha 0.800 -> 0.800"));
    }
}
