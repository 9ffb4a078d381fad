//! Classical test theory statistics.
//!
//! Implements Cronbach's alpha, item difficulty, point-biserial item
//! discrimination, total-score descriptives and the standard error of
//! measurement. Every function is pure over a [`ResponseMatrix`].
//!
//! Alpha and descriptives use the sample variance (n − 1). Discrimination
//! uses the population variance (n) of the total scores.

use crate::model::{ResponseMatrix, StudentRecord};

/// Arithmetic mean. Returns 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with denominator n − 1. Returns 0 for fewer than 2 values.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    sum_of_squares(values) / (values.len() - 1) as f64
}

/// Population variance with denominator n. Returns 0 for an empty slice.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum_of_squares(values) / values.len() as f64
}

fn sum_of_squares(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum()
}

/// All students' responses to item `index`.
pub fn item_column(matrix: &ResponseMatrix, index: usize) -> Vec<f64> {
    matrix.rows().map(|r| r[index]).collect()
}

/// Mean response per item.
pub fn item_difficulty(matrix: &ResponseMatrix) -> Vec<f64> {
    (0..matrix.item_count())
        .map(|j| mean(&item_column(matrix, j)))
        .collect()
}

/// Sample variance of a single item's responses.
pub fn item_variance(column: &[f64]) -> f64 {
    sample_variance(column)
}

/// Sum of item responses per student.
pub fn total_scores(matrix: &ResponseMatrix) -> Vec<f64> {
    matrix.students().iter().map(StudentRecord::total).collect()
}

/// Cronbach's alpha, clamped to [0, 1].
///
/// alpha = k / (k − 1) × (1 − Σ var(item) / var(total))
///
/// When total scores have zero variance the ratio is undefined; alpha is
/// reported as 0 in that case.
pub fn cronbach_alpha(matrix: &ResponseMatrix) -> f64 {
    let k = matrix.item_count() as f64;
    let item_variance_sum: f64 = (0..matrix.item_count())
        .map(|j| item_variance(&item_column(matrix, j)))
        .sum();
    let total_variance = sample_variance(&total_scores(matrix));

    if total_variance == 0.0 {
        tracing::warn!(
            students = matrix.student_count(),
            items = matrix.item_count(),
            "total scores have zero variance; reporting alpha as 0"
        );
        return 0.0;
    }

    let raw = (k / (k - 1.0)) * (1.0 - item_variance_sum / total_variance);
    tracing::debug!(raw_alpha = raw, "computed cronbach alpha");
    raw.clamp(0.0, 1.0)
}

/// Point-biserial discrimination per item.
///
/// For item j with difficulty p:
/// Σᵢ (xᵢⱼ − p)(Tᵢ − T̄) / sqrt(p (1 − p) × popvar(T) × n)
///
/// Yields 0 whenever the denominator is not a positive finite number, which
/// covers constant items (p = 0 or p = 1) and constant total scores.
pub fn item_discrimination(matrix: &ResponseMatrix, difficulties: &[f64]) -> Vec<f64> {
    let totals = total_scores(matrix);
    let mean_total = mean(&totals);
    let total_variance = population_variance(&totals);
    let n = totals.len() as f64;

    difficulties
        .iter()
        .enumerate()
        .map(|(j, &p)| {
            let numerator: f64 = matrix
                .rows()
                .zip(&totals)
                .map(|(row, total)| (row[j] - p) * (total - mean_total))
                .sum();
            let denominator = (p * (1.0 - p) * total_variance * n).sqrt();

            if denominator > 0.0 && denominator.is_finite() {
                numerator / denominator
            } else {
                0.0
            }
        })
        .collect()
}

/// Mean and sample standard deviation of total scores.
pub fn descriptive_stats(matrix: &ResponseMatrix) -> (f64, f64) {
    let totals = total_scores(matrix);
    (mean(&totals), sample_variance(&totals).sqrt())
}

/// Standard error of measurement: sd × sqrt(1 − alpha).
///
/// `alpha` must already be clamped; values above 1 produce NaN.
pub fn standard_error_of_measurement(sd: f64, alpha: f64) -> f64 {
    sd * (1.0 - alpha).sqrt()
}

/// Alpha recomputed with each item removed in turn.
///
/// Entries are `None` when removing the item would leave fewer than two.
pub fn alpha_if_item_deleted(matrix: &ResponseMatrix) -> Vec<Option<f64>> {
    (0..matrix.item_count())
        .map(|j| matrix.without_item(j).map(|m| cronbach_alpha(&m)))
        .collect()
}
