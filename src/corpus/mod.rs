//! FAQ corpus loading.
//!
//! The corpus is a CSV file with a header row naming at least `id`,
//! `question`, and `answer`. Rows are kept in file order because the
//! embedding matrix built from them is indexed positionally.

use crate::error::{Result, SvarError};
use std::path::Path;

/// A single FAQ record. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    /// Identifier from the corpus file. Uniqueness is assumed, not enforced.
    pub id: String,
    pub question: String,
    pub answer: String,
}

/// Load all FAQ entries from a CSV file, preserving file order.
pub fn load(path: &Path) -> Result<Vec<FaqEntry>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SvarError::DataSource(format!("Failed to read corpus file {}: {}", path.display(), e))
    })?;
    parse(&content)
}

fn parse(content: &str) -> Result<Vec<FaqEntry>> {
    let mut lines = content
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| SvarError::DataSource("Corpus file is empty".to_string()))?;
    let columns = csv_split(header);

    let id_col = find_column(&columns, "id")?;
    let question_col = find_column(&columns, "question")?;
    let answer_col = find_column(&columns, "answer")?;
    let last_required = id_col.max(question_col).max(answer_col);

    let mut entries = Vec::new();
    for (i, line) in lines.enumerate() {
        let fields = csv_split(line);
        if fields.len() <= last_required {
            return Err(SvarError::DataSource(format!(
                "Row {} has {} fields, expected at least {}",
                i + 2,
                fields.len(),
                last_required + 1
            )));
        }
        entries.push(FaqEntry {
            id: fields[id_col].clone(),
            question: fields[question_col].clone(),
            answer: fields[answer_col].clone(),
        });
    }

    Ok(entries)
}

fn find_column(columns: &[String], name: &str) -> Result<usize> {
    columns
        .iter()
        .position(|c| c.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            SvarError::DataSource(format!("Corpus header is missing required column '{}'", name))
        })
}

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
/// Returns owned strings because quoted fields need unquoting.
fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Check for escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.clone());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
