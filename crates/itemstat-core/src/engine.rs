//! Analysis orchestrator.
//!
//! Runs every scoring step over a response matrix once and assembles the
//! output record.

use chrono::Utc;
use uuid::Uuid;

use crate::model::{AggregateStatistics, Analysis, ItemStatistics, ResponseMatrix};
use crate::report::{AnalysisReport, SourceSummary};
use crate::statistics::{
    alpha_if_item_deleted, cronbach_alpha, descriptive_stats, item_column, item_difficulty,
    item_discrimination, item_variance, standard_error_of_measurement, total_scores,
};

/// Configuration for the analysis engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Recompute alpha with each item removed.
    pub compute_alpha_if_deleted: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            compute_alpha_if_deleted: true,
        }
    }
}

/// Compute the full set of statistics for a matrix.
pub fn analyze(matrix: &ResponseMatrix) -> Analysis {
    analyze_with(matrix, &EngineConfig::default())
}

/// Compute statistics using an explicit configuration.
pub fn analyze_with(matrix: &ResponseMatrix, config: &EngineConfig) -> Analysis {
    let _span = tracing::debug_span!(
        "analyze",
        students = matrix.student_count(),
        items = matrix.item_count()
    )
    .entered();

    let difficulties = item_difficulty(matrix);
    let discriminations = item_discrimination(matrix, &difficulties);
    let alpha = cronbach_alpha(matrix);
    let (mean, standard_deviation) = descriptive_stats(matrix);
    let sem = standard_error_of_measurement(standard_deviation, alpha);

    let deleted = if config.compute_alpha_if_deleted {
        alpha_if_item_deleted(matrix)
    } else {
        vec![None; matrix.item_count()]
    };

    let items = matrix
        .item_labels()
        .iter()
        .enumerate()
        .map(|(j, label)| ItemStatistics {
            label: label.clone(),
            difficulty: difficulties[j],
            discrimination: discriminations[j],
            variance: item_variance(&item_column(matrix, j)),
            alpha_if_deleted: deleted[j],
        })
        .collect();

    let totals = total_scores(matrix);
    let min_total = totals.iter().copied().fold(f64::INFINITY, f64::min);
    let max_total = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    tracing::debug!(alpha, mean, standard_deviation, sem, "analysis complete");

    Analysis {
        items,
        aggregate: AggregateStatistics {
            student_count: matrix.student_count(),
            item_count: matrix.item_count(),
            mean,
            standard_deviation,
            alpha,
            sem,
            min_total,
            max_total,
        },
    }
}

/// Produces stamped reports from response matrices.
pub struct AnalysisEngine {
    config: EngineConfig,
}

impl AnalysisEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Analyze `matrix` and wrap the result in a report named `source_name`.
    pub fn run(&self, source_name: &str, matrix: &ResponseMatrix) -> AnalysisReport {
        let analysis = analyze_with(matrix, &self.config);
        tracing::info!(
            source = source_name,
            alpha = analysis.aggregate.alpha,
            "analyzed responses"
        );

        AnalysisReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: SourceSummary {
                name: source_name.to_string(),
                student_count: matrix.student_count(),
                item_count: matrix.item_count(),
            },
            analysis,
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ResponseMatrix {
        ResponseMatrix::from_rows(vec![
            vec![1.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn analyze_reference_matrix() {
        let a = analyze(&reference());
        assert_eq!(a.difficulties(), vec![0.75, 0.75, 0.5]);
        assert_eq!(a.items[2].label, "Item_3");
        assert!((a.aggregate.mean - 2.0).abs() < 1e-9);
        assert!((a.aggregate.standard_deviation - 0.8165).abs() < 1e-4);
        assert!((0.0..=1.0).contains(&a.aggregate.alpha));
        assert_eq!(a.aggregate.min_total, 1.0);
        assert_eq!(a.aggregate.max_total, 3.0);
        assert_eq!(a.aggregate.student_count, 4);
        assert_eq!(a.aggregate.item_count, 3);
    }

    #[test]
    fn sem_matches_formula() {
        let a = analyze(&reference());
        let expected = a.aggregate.standard_deviation * (1.0 - a.aggregate.alpha).sqrt();
        assert!((a.aggregate.sem - expected).abs() < 1e-9);
    }

    #[test]
    fn alpha_if_deleted_can_be_disabled() {
        let config = EngineConfig {
            compute_alpha_if_deleted: false,
        };
        let a = analyze_with(&reference(), &config);
        assert!(a.items.iter().all(|i| i.alpha_if_deleted.is_none()));

        let a = analyze(&reference());
        assert!(a.items.iter().all(|i| i.alpha_if_deleted.is_some()));
    }

    #[test]
    fn analysis_is_idempotent() {
        let m = reference();
        assert_eq!(analyze(&m), analyze(&m));
    }

    #[test]
    fn engine_stamps_report() {
        let engine = AnalysisEngine::default();
        let report = engine.run("midterm.csv", &reference());
        assert_eq!(report.source.name, "midterm.csv");
        assert_eq!(report.source.student_count, 4);
        assert_eq!(report.source.item_count, 3);
        assert_eq!(report.analysis, analyze(&reference()));
    }
}
