//! Drawing: query line, header, separator, and visible table rows.
//!
//! The same cell formatting feeds two sinks: styled ratatui lines for the
//! live view, and plain pipe-delimited text for the exit dump.

use ratatui::layout::Position;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::data::datatable::{DataCell, DataRow, DataTable};
use crate::ui::query_line::QueryLine;

pub fn draw(frame: &mut Frame, table: &DataTable, query: &QueryLine, match_style: Style) {
    let area = frame.area();
    let width = area.width as usize;
    let height = area.height as usize;

    let mut lines: Vec<Line> = Vec::new();

    let prompt = format!("{}{}", query.mode.prompt_char(), query.text());
    lines.push(Line::from(truncate_plain(prompt, width)));

    lines.push(Line::from(truncate_spans(
        row_spans(table, &table.header, true, match_style),
        width,
    )));
    lines.push(Line::from(truncate_plain(separator(table), width)));

    let max_rows = height.saturating_sub(3);
    let mut shown = 0;
    for (i, row) in table.rows.iter().enumerate() {
        if shown >= max_rows {
            break;
        }
        if i < table.offset_row || !row.visible {
            continue;
        }
        lines.push(Line::from(truncate_spans(
            row_spans(table, row, false, match_style),
            width,
        )));
        shown += 1;
    }

    frame.render_widget(Paragraph::new(Text::from(lines)), area);

    let cursor_x = (1 + query.cursor()).min(width.saturating_sub(1)) as u16;
    frame.set_cursor_position(Position::new(cursor_x, 0));
}

/// Plain-text render of the current view for the exit dump: no colors, no
/// width truncation, pipe-delimited, reflecting offsets, hidden columns
/// and filtered rows.
pub fn render_plain(table: &DataTable) -> String {
    let mut out = String::new();
    out.push_str(&row_plain(table, &table.header, true));
    out.push('\n');
    out.push_str(&separator(table));
    out.push('\n');
    for (i, row) in table.rows.iter().enumerate() {
        if i < table.offset_row || !row.visible {
            continue;
        }
        out.push_str(&row_plain(table, row, false));
        out.push('\n');
    }
    out
}

/// Column indices that actually render: enabled and at/after the offset.
fn rendered_columns(table: &DataTable) -> Vec<usize> {
    (table.offset_col..table.column_count())
        .filter(|&i| table.is_col_enabled(i))
        .collect()
}

fn row_spans(
    table: &DataTable,
    row: &DataRow,
    is_header: bool,
    match_style: Style,
) -> Vec<Span<'static>> {
    let cols = rendered_columns(table);
    let mut spans = Vec::new();
    for (n, &i) in cols.iter().enumerate() {
        if n > 0 {
            spans.push(Span::raw("|"));
        }
        cell_spans(&row.cells[i], table.max_width(i), is_header, match_style, &mut spans);
    }
    spans
}

fn row_plain(table: &DataTable, row: &DataRow, is_header: bool) -> String {
    let cols = rendered_columns(table);
    let mut out = String::new();
    for (n, &i) in cols.iter().enumerate() {
        if n > 0 {
            out.push('|');
        }
        let (before, after) = cell_padding(row.cells[i].text.len(), table.max_width(i), is_header);
        out.push_str(&" ".repeat(before));
        out.push_str(&row.cells[i].text);
        out.push_str(&" ".repeat(after));
    }
    out
}

/// Header rule: `-` under text, `+` under every column separator.
fn separator(table: &DataTable) -> String {
    row_plain(table, &table.header, true)
        .chars()
        .map(|c| if c == '|' { '+' } else { '-' })
        .collect()
}

/// Spaces before/after a cell's text. Headers center within max+2; data
/// cells get one leading space and pad right to the same total width.
fn cell_padding(text_len: usize, max: usize, is_header: bool) -> (usize, usize) {
    if is_header {
        let before = (max + 2 - text_len + 1) / 2;
        (before, max + 2 - text_len - before)
    } else {
        (1, max + 1 - text_len)
    }
}

fn cell_spans(
    cell: &DataCell,
    max: usize,
    is_header: bool,
    match_style: Style,
    spans: &mut Vec<Span<'static>>,
) {
    let (before, after) = cell_padding(cell.text.len(), max, is_header);
    spans.push(Span::raw(" ".repeat(before)));

    match cell.match_span {
        Some((b, e)) if !is_header => {
            spans.push(Span::raw(cell.text[..b].to_string()));
            spans.push(Span::styled(cell.text[b..e].to_string(), match_style));
            spans.push(Span::raw(cell.text[e..].to_string()));
        }
        _ => spans.push(Span::raw(cell.text.clone())),
    }

    spans.push(Span::raw(" ".repeat(after)));
}

/// Clip a styled line to the terminal width, marking the cut with `..`.
fn truncate_spans(spans: Vec<Span<'static>>, max_width: usize) -> Vec<Span<'static>> {
    let total: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    if total <= max_width {
        return spans;
    }

    let keep = max_width.saturating_sub(2);
    let mut out = Vec::new();
    let mut used = 0;
    for span in spans {
        let len = span.content.chars().count();
        if used + len <= keep {
            used += len;
            out.push(span);
        } else {
            let cut: String = span.content.chars().take(keep - used).collect();
            if !cut.is_empty() {
                out.push(Span::styled(cut, span.style));
            }
            break;
        }
    }
    out.push(Span::raw(".."));
    out
}

fn truncate_plain(s: String, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        return s;
    }
    let keep = max_width.saturating_sub(2);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("..");
    out
}
