//! Ingestion error types.
//!
//! These errors describe malformed or insufficient response files. The
//! scoring engine itself never fails; degenerate inputs are absorbed there.

use thiserror::Error;

/// Minimum number of student rows an analysis needs.
pub const MIN_STUDENTS: usize = 3;

/// Minimum number of items an analysis needs.
pub const MIN_ITEMS: usize = 2;

/// Errors that can occur while turning response text into a matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The input has a header line but no data rows (or nothing at all).
    #[error("file must contain a header row and at least one data row")]
    MissingData,

    /// A data row has a student identifier but no response cells.
    #[error("line {line}: row has no response values")]
    EmptyRow { line: usize },

    /// A response cell could not be parsed as a finite number.
    #[error("line {line}, column {column}: invalid number '{value}'")]
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },

    /// A data row has a different number of responses than the first row.
    #[error("line {line}: expected {expected} responses, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A record passed to the matrix constructor has a different number of
    /// responses than the first record. `index` is 1-based.
    #[error("record {index}: expected {expected} responses, found {found}")]
    RaggedRecord {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// Fewer than two items per student.
    #[error("Need at least 2 items for reliability analysis (found {found})")]
    TooFewItems { found: usize },

    /// Fewer than three valid student rows.
    #[error("Need at least 3 students for reliable analysis (found {found})")]
    TooFewStudents { found: usize },
}

impl ParseError {
    /// Returns the 1-based input line the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::EmptyRow { line }
            | ParseError::InvalidNumber { line, .. }
            | ParseError::RaggedRow { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_few_students_message() {
        let err = ParseError::TooFewStudents { found: 2 };
        assert!(err
            .to_string()
            .starts_with("Need at least 3 students for reliable analysis"));
    }

    #[test]
    fn line_is_reported_for_row_errors() {
        let err = ParseError::InvalidNumber {
            line: 4,
            column: 2,
            value: "x".into(),
        };
        assert_eq!(err.line(), Some(4));
        assert_eq!(ParseError::MissingData.line(), None);

        let err = ParseError::RaggedRecord {
            index: 2,
            expected: 2,
            found: 3,
        };
        assert_eq!(err.line(), None);
    }
}
