//! Core data model types for itemstat.
//!
//! A [`ResponseMatrix`] holds one record per student and one numeric response
//! per item. The statistics types describe what the scoring engine produces.

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, MIN_ITEMS, MIN_STUDENTS};

/// A single student's responses, in item order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Identifier from the first CSV cell, or a generated `Student_N` label.
    pub id: String,
    /// One numeric response per item.
    pub responses: Vec<f64>,
}

impl StudentRecord {
    pub fn new(id: impl Into<String>, responses: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            responses,
        }
    }

    /// Sum of this student's responses.
    pub fn total(&self) -> f64 {
        self.responses.iter().sum()
    }
}

/// A rectangular table of student responses.
///
/// Invariants: at least [`MIN_STUDENTS`] records, every record has the same
/// number of responses, and that number is at least [`MIN_ITEMS`]. There is
/// one label per item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseMatrix {
    students: Vec<StudentRecord>,
    item_labels: Vec<String>,
}

impl ResponseMatrix {
    /// Build a matrix, checking shape invariants.
    ///
    /// `item_labels` is truncated or padded with `Item_N` to match the item
    /// count, so callers may pass an empty vector. Uneven records are reported
    /// by record index, since there is no input line to point at.
    pub fn new(
        students: Vec<StudentRecord>,
        item_labels: Vec<String>,
    ) -> Result<Self, ParseError> {
        let item_count = students.first().map(|s| s.responses.len()).unwrap_or(0);

        for (idx, student) in students.iter().enumerate() {
            if student.responses.len() != item_count {
                return Err(ParseError::RaggedRecord {
                    index: idx + 1,
                    expected: item_count,
                    found: student.responses.len(),
                });
            }
        }
        if students.len() < MIN_STUDENTS {
            return Err(ParseError::TooFewStudents {
                found: students.len(),
            });
        }
        if item_count < MIN_ITEMS {
            return Err(ParseError::TooFewItems { found: item_count });
        }

        Ok(Self {
            students,
            item_labels: normalize_labels(item_labels, item_count),
        })
    }

    /// Build a matrix from bare rows, generating student and item labels.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ParseError> {
        let students = rows
            .into_iter()
            .enumerate()
            .map(|(i, r)| StudentRecord::new(default_student_id(i + 1), r))
            .collect();
        Self::new(students, Vec::new())
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn item_labels(&self) -> &[String] {
        &self.item_labels
    }

    /// Number of students (rows).
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of items (columns).
    pub fn item_count(&self) -> usize {
        self.item_labels.len()
    }

    /// Iterate over each student's response row.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.students.iter().map(|s| s.responses.as_slice())
    }

    /// A copy of this matrix with item `index` removed.
    ///
    /// Returns `None` if the result would violate the minimum item count.
    pub fn without_item(&self, index: usize) -> Option<Self> {
        if index >= self.item_count() || self.item_count() <= MIN_ITEMS {
            return None;
        }
        let students = self
            .students
            .iter()
            .map(|s| {
                let mut responses = s.responses.clone();
                responses.remove(index);
                StudentRecord::new(s.id.clone(), responses)
            })
            .collect();
        let mut item_labels = self.item_labels.clone();
        item_labels.remove(index);
        Some(Self {
            students,
            item_labels,
        })
    }
}

pub(crate) fn default_student_id(n: usize) -> String {
    format!("Student_{n}")
}

pub(crate) fn default_item_label(n: usize) -> String {
    format!("Item_{n}")
}

fn normalize_labels(mut labels: Vec<String>, item_count: usize) -> Vec<String> {
    labels.truncate(item_count);
    for (i, label) in labels.iter_mut().enumerate() {
        if label.trim().is_empty() {
            *label = default_item_label(i + 1);
        }
    }
    while labels.len() < item_count {
        labels.push(default_item_label(labels.len() + 1));
    }
    labels
}

/// Statistics for a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStatistics {
    /// Item label from the header row.
    pub label: String,
    /// Mean response across students.
    pub difficulty: f64,
    /// Point-biserial correlation with the total score (0 when degenerate).
    pub discrimination: f64,
    /// Sample variance of the item's responses.
    pub variance: f64,
    /// Cronbach's alpha of the test with this item removed.
    #[serde(default)]
    pub alpha_if_deleted: Option<f64>,
}

/// Test-level statistics over total scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    pub student_count: usize,
    pub item_count: usize,
    /// Mean total score.
    pub mean: f64,
    /// Sample standard deviation of total scores.
    pub standard_deviation: f64,
    /// Cronbach's alpha, clamped to [0, 1].
    pub alpha: f64,
    /// Standard error of measurement.
    pub sem: f64,
    pub min_total: f64,
    pub max_total: f64,
}

/// The complete output of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub items: Vec<ItemStatistics>,
    pub aggregate: AggregateStatistics,
}

impl Analysis {
    /// Per-item difficulties, in item order.
    pub fn difficulties(&self) -> Vec<f64> {
        self.items.iter().map(|i| i.difficulty).collect()
    }
}
