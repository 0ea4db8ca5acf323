//! Plain-text rendering of a [`RenderedTable`].

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use super::column::ColumnWidth;
use super::pagination::PageControl;
use super::render::HeaderCell;
use super::render::RenderedTable;
use super::render::TableBody;
use super::state::SortOrder;

/// Widest an auto-sized column grows.
const MAX_AUTO_WIDTH: usize = 40;

const SEPARATOR: &str = " │ ";

/// Renders a table model as monospace text.
///
/// Columns are padded by display width, so wide characters line up. Cells
/// longer than their column are cut with `…`.
pub fn render_text(table: &RenderedTable) -> String {
    let mut out = String::new();

    if !table.search_query.is_empty() {
        out.push_str(&format!("Search: {}\n", table.search_query));
    }

    let mut labels: Vec<String> = table.header.iter().map(header_label).collect();
    let mut rows: Vec<Vec<String>> = match &table.body {
        TableBody::Rows(rows) => rows.iter().map(|row| row.cells.clone()).collect(),
        TableBody::Loading { skeleton_rows } => {
            vec![vec!["░░░".to_string(); labels.len()]; *skeleton_rows]
        }
        TableBody::Empty { .. } => Vec::new(),
    };

    let mut hints: Vec<ColumnWidth> = table.header.iter().map(|h| h.width).collect();
    if table.has_actions() {
        labels.push("Actions".to_string());
        hints.push(ColumnWidth::Auto);
        for (cells, row) in rows.iter_mut().zip(table.rows()) {
            let actions: Vec<String> = row.actions.iter().map(|a| format!("[{}]", a.label)).collect();
            cells.push(actions.join(" "));
        }
    }

    let widths: Vec<usize> = hints
        .iter()
        .enumerate()
        .map(|(i, hint)| match hint {
            ColumnWidth::Fixed(width) => *width as usize,
            ColumnWidth::Auto => rows
                .iter()
                .filter_map(|cells| cells.get(i))
                .chain(std::iter::once(&labels[i]))
                .map(|text| text.width())
                .max()
                .unwrap_or(0)
                .min(MAX_AUTO_WIDTH),
        })
        .collect();

    push_line(&mut out, &labels, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    out.push_str(rule.join("─┼─").trim_end());
    out.push('\n');

    for cells in &rows {
        push_line(&mut out, cells, &widths);
    }

    if let TableBody::Empty { message } = &table.body {
        out.push_str(message);
        out.push('\n');
    }

    if let Some(bar) = &table.pagination {
        let controls: Vec<String> = bar.controls.iter().map(control_label).collect();
        out.push_str(&controls.join(" "));
        out.push('\n');
    }

    if let Some(summary) = &table.summary {
        out.push_str(&format!(
            "Showing {}–{} of {}\n",
            summary.first, summary.last, summary.total
        ));
    }

    out
}

/// Cuts `text` to at most `max_width` columns, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let text = cells.get(i).map(String::as_str).unwrap_or("");
            // Cells are single-line.
            let text = truncate_to_width(&text.replace('\n', " "), *width);
            let fill = width.saturating_sub(text.width());
            format!("{}{}", text, " ".repeat(fill))
        })
        .collect();
    out.push_str(padded.join(SEPARATOR).trim_end());
    out.push('\n');
}

fn header_label(cell: &HeaderCell) -> String {
    match cell.sorted {
        Some(SortOrder::Asc) => format!("{} ▲", cell.label),
        Some(SortOrder::Desc) => format!("{} ▼", cell.label),
        None => cell.label.clone(),
    }
}

fn control_label(control: &PageControl) -> String {
    let arrow = |enabled: bool, label: &str| {
        if enabled {
            label.to_string()
        } else {
            "-".to_string()
        }
    };
    match *control {
        PageControl::First { enabled } => arrow(enabled, "«"),
        PageControl::Prev { enabled } => arrow(enabled, "‹"),
        PageControl::Page { number, current: true } => format!("[{}]", number),
        PageControl::Page { number, .. } => number.to_string(),
        PageControl::Ellipsis => "…".to_string(),
        PageControl::Next { enabled } => arrow(enabled, "›"),
        PageControl::Last { enabled } => arrow(enabled, "»"),
    }
}
