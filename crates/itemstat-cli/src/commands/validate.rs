//! The `itemstat validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use itemstat_core::parser::parse_responses_str;

pub fn execute(input: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read response file: {}", input.display()))?;

    let matrix = match parse_responses_str(&content) {
        Ok(matrix) => matrix,
        Err(e) => {
            if let Some(line) = e.line() {
                if let Some(text) = content.lines().nth(line.saturating_sub(1)) {
                    eprintln!("{line:>5} | {}", text.trim_end_matches('\r'));
                }
            }
            return Err(e)
                .with_context(|| format!("failed to parse responses: {}", input.display()));
        }
    };

    println!(
        "Response file: {} ({} students, {} items)",
        input.display(),
        matrix.student_count(),
        matrix.item_count()
    );
    println!("Items: {}", matrix.item_labels().join(", "));
    println!("Response file valid.");

    Ok(())
}
