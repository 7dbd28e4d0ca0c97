use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::format::cell_text;
use crate::console::registry::Column;

/// A rendered record table: one header cell per column, one row per record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Build a table from ordered columns and ordered row objects.
///
/// Cells read `row[column.key]` and are empty when the key is absent. No
/// paging or sorting; rows keep the order the backend sent them in.
pub fn build_table(columns: &[Column], data: &[&Map<String, Value>]) -> Table {
    let headers = columns.iter().map(|c| c.label.to_string()).collect();
    let rows = data
        .iter()
        .map(|row| columns.iter().map(|c| cell_text(row.get(c.key))).collect())
        .collect();

    Table { headers, rows }
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fixed-width text rendering for terminals
    pub fn render_text(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
        let mut out = String::new();
        out.push_str(&line(&self.headers));
        out.push('\n');
        out.push_str(&"-".repeat(total));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out
    }
}
