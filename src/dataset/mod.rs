//! CSV dataset loading and head previews.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use unicode_width::UnicodeWidthStr;

/// In-memory table for one interaction: named columns plus ordered rows,
/// loaded once per invocation. All cells are kept as strings; typed work
/// happens in the execution host, not here.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub path: PathBuf,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("CSV file '{}' does not exist", path.display());
        }
        if !path.is_file() {
            bail!("'{}' is not a file", path.display());
        }

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .with_context(|| format!("opening CSV file: {}", path.display()))?;

        let columns: Vec<String> = rdr
            .headers()
            .with_context(|| format!("reading CSV header: {}", path.display()))?
            .iter()
            .map(String::from)
            .collect();
        if columns.is_empty() {
            bail!("CSV file '{}' has no header row", path.display());
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record =
                record.with_context(|| format!("reading CSV record: {}", path.display()))?;
            rows.push(record.iter().map(String::from).collect());
        }

        Ok(Self { path: path.to_path_buf(), columns, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(n)]
    }

    /// Plain-text rendering of the header plus the first `n` rows, columns
    /// padded to a common display width. This is the structure preview the
    /// model sees, so it stays free of box-drawing decoration.
    pub fn preview_text(&self, n: usize) -> String {
        let head = self.head(n);
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.width()).collect();
        for row in head {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.width());
                }
            }
        }

        let mut out = String::new();
        push_padded_row(&mut out, &self.columns, &widths);
        for row in head {
            out.push('\n');
            push_padded_row(&mut out, row, &widths);
        }
        out
    }
}

fn push_padded_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        if i + 1 < cells.len() {
            let pad = widths.get(i).copied().unwrap_or(0).saturating_sub(cell.width());
            for _ in 0..pad {
                out.push(' ');
            }
        }
    }
}
