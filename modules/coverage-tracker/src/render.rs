//! Text rendering of result tables and status messages.

use apify_client::ErrorBody;
use coverage_core::normalize::COLUMNS;
use coverage_core::NormalizedResultRow;
use serde_json::Value;

use crate::tracker::SearchOutcome;

/// Widest a table cell may get before it is cut with an ellipsis.
const MAX_CELL_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for a terminal
    Table,
    /// JSON array of row objects
    Json,
    /// Tab-separated values with a header line
    Tsv,
}

pub fn render_rows(rows: &[NormalizedResultRow], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => render_table(rows),
        OutputFormat::Json => serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string()),
        OutputFormat::Tsv => render_tsv(rows),
    }
}

/// Status lines shown around the table.
pub fn render_summary(outcome: &SearchOutcome) -> Vec<String> {
    let mut lines = vec![format!("Returned {} SERP page(s).", outcome.page_count())];
    if outcome.rows.is_empty() {
        lines.push("No organic results found (or everything was filtered out).".to_string());
    } else {
        let flagged = outcome.rows.iter().filter(|r| r.likely_press_release).count();
        lines.push(format!("Rows: {} ({} likely press-release coverage)", outcome.rows.len(), flagged));
    }
    lines
}

/// First raw item, pretty-printed, for inspecting schema drift.
pub fn render_raw(outcome: &SearchOutcome) -> String {
    let empty = Value::Object(Default::default());
    let first = outcome.first_raw().unwrap_or(&empty);
    serde_json::to_string_pretty(first).unwrap_or_default()
}

pub fn render_transport_error(status: Option<u16>, body: &ErrorBody) -> String {
    let heading = match status {
        Some(code) => format!("Apify error ({code})"),
        None => "Apify request failed".to_string(),
    };
    let detail = match body {
        ErrorBody::Json(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        ErrorBody::Text(text) => text.clone(),
    };
    format!("{heading}\n{detail}")
}

fn render_table(rows: &[NormalizedResultRow]) -> String {
    let cells: Vec<[String; 9]> = rows
        .iter()
        .map(|row| row.cells().map(|c| truncate(&flatten_whitespace(&c), MAX_CELL_WIDTH)))
        .collect();

    let mut widths: [usize; 9] = COLUMNS.map(|c| c.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(&COLUMNS.map(String::from), &widths));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &cells {
        out.push('\n');
        out.push_str(&format_line(row, &widths));
    }
    out
}

fn format_line(cells: &[String; 9], widths: &[usize; 9]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn render_tsv(rows: &[NormalizedResultRow]) -> String {
    let mut lines = vec![COLUMNS.join("\t")];
    for row in rows {
        let cells: Vec<String> = row.cells().iter().map(|c| flatten_whitespace(c)).collect();
        lines.push(cells.join("\t"));
    }
    lines.join("\n")
}

/// Tabs and newlines would break both layouts.
fn flatten_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
