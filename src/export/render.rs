use crate::export::csv::format_value;
use crate::export::table::ResultSet;

const MAX_CELL_WIDTH: usize = 40;

fn clip(cell: &str) -> String {
    let flat = cell.replace(['\n', '\r'], " ");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let mut out: String = flat.chars().take(MAX_CELL_WIDTH - 1).collect();
    out.push('…');
    out
}

/// Plain-text table for the terminal, showing at most `limit` rows.
pub fn render_table(result: &ResultSet, limit: Option<usize>) -> String {
    let shown = limit.unwrap_or(result.len()).min(result.len());

    let header: Vec<String> = result.columns.iter().map(|c| clip(c)).collect();
    let body: Vec<Vec<String>> = result.rows[..shown]
        .iter()
        .map(|row| row.iter().map(|v| clip(&format_value(v))).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(idx) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(&header));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &body {
        out.push_str(&line(row));
        out.push('\n');
    }
    if shown < result.len() {
        out.push_str(&format!("({} of {} rows shown)\n", shown, result.len()));
    }
    out
}
