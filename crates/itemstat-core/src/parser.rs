//! CSV response file parser.
//!
//! The first line is a header naming the items. Every following line is one
//! student: an optional identifier followed by numeric responses.

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ParseError;
use crate::model::{default_student_id, ResponseMatrix, StudentRecord};

/// Parse a response file from disk.
pub fn parse_responses(path: &Path) -> Result<ResponseMatrix> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read response file: {}", path.display()))?;

    let matrix = parse_responses_str(&content)
        .with_context(|| format!("failed to parse responses: {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        students = matrix.student_count(),
        items = matrix.item_count(),
        "parsed response file"
    );
    Ok(matrix)
}

/// Parse CSV response text into a [`ResponseMatrix`].
pub fn parse_responses_str(content: &str) -> Result<ResponseMatrix, ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    // (1-based line number, line text) for every non-blank line
    let lines: Vec<(usize, &str)> = content
        .split('\n')
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(ParseError::MissingData);
    }

    let (_, header) = lines[0];
    let item_labels: Vec<String> = split_cells(header)
        .skip(1)
        .map(str::to_string)
        .collect();

    let mut students = Vec::with_capacity(lines.len() - 1);
    let mut expected: Option<usize> = None;

    for (row, &(line, text)) in lines[1..].iter().enumerate() {
        let record = parse_row(text, line, row + 1)?;

        match expected {
            None => expected = Some(record.responses.len()),
            Some(n) if n != record.responses.len() => {
                return Err(ParseError::RaggedRow {
                    line,
                    expected: n,
                    found: record.responses.len(),
                });
            }
            Some(_) => {}
        }
        students.push(record);
    }

    ResponseMatrix::new(students, item_labels)
}

fn split_cells(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim)
}

fn parse_row(text: &str, line: usize, row_number: usize) -> Result<StudentRecord, ParseError> {
    let mut cells = split_cells(text);

    let id = match cells.next() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => default_student_id(row_number),
    };

    let responses = cells
        .enumerate()
        .map(|(i, cell)| parse_cell(cell, line, i + 2))
        .collect::<Result<Vec<_>, _>>()?;

    if responses.is_empty() {
        return Err(ParseError::EmptyRow { line });
    }

    Ok(StudentRecord::new(id, responses))
}

fn parse_cell(cell: &str, line: usize, column: usize) -> Result<f64, ParseError> {
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::InvalidNumber {
            line,
            column,
            value: cell.to_string(),
        }),
    }
}
