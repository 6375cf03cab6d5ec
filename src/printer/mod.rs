//! Printers: colored text, termimad code blocks, aligned tables.

use owo_colors::OwoColorize;
use termimad::MadSkin;
use unicode_width::UnicodeWidthStr;

use crate::utils::truncate_to_width;

const MAX_CELL_WIDTH: usize = 60;

pub struct TextPrinter {
    pub color: Option<String>,
}

impl TextPrinter {
    pub fn print(&self, text: &str) {
        match self.color.as_deref() {
            Some("green") => println!("{}", text.green()),
            Some("cyan") => println!("{}", text.cyan()),
            Some("magenta") => println!("{}", text.magenta()),
            Some("yellow") => println!("{}", text.yellow()),
            _ => println!("{}", text),
        }
    }
}

pub struct MarkdownPrinter {
    pub skin: MadSkin,
}

impl Default for MarkdownPrinter {
    fn default() -> Self {
        Self { skin: MadSkin::default() }
    }
}

impl MarkdownPrinter {
    pub fn print(&self, text: &str) {
        self.skin.print_text(text);
        println!();
    }

    /// Render a code snippet as a fenced Python block.
    pub fn print_code(&self, code: &str) {
        self.print(&format!("```python\n{}\n```", code));
    }
}

/// Align `rows` under `columns`, padding to display width and truncating
/// long cells.
pub fn render_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let header: Vec<String> = columns
        .iter()
        .map(|c| truncate_to_width(c, MAX_CELL_WIDTH))
        .collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.iter().map(|c| truncate_to_width(c, MAX_CELL_WIDTH)).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|c| c.width()).collect();
    for row in &body {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.width());
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    out.push('\n');
    for (i, w) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        for _ in 0..*w {
            out.push('-');
        }
    }
    for row in &body {
        out.push('\n');
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
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
