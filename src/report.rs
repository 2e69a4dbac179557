// src/report.rs
// =============================================================================
// Renders a LetterTable for stdout.
//
// Text format:
//
//   Letter Frequency:
//   b: 3
//   a: 2
//   c: 1
//
// JSON format (--json) is an array of {"letter": "b", "count": 3} objects in
// the same order.
// =============================================================================

use crate::census::{LetterCount, LetterTable};
use anyhow::Result;

const HEADER: &str = "Letter Frequency:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Renders the table, most frequent letter first
pub fn render(table: &LetterTable, format: OutputFormat) -> Result<String> {
    let rows = table.sorted();
    match format {
        OutputFormat::Text => Ok(render_text(&rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
    }
}

fn render_text(rows: &[LetterCount]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(HEADER.to_string());
    lines.extend(rows.iter().map(|row| format!("{}: {}", row.letter, row.count)));
    lines.join("\n")
}
