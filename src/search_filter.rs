use crate::data::datatable::DataTable;
use tracing::debug;

/// Recompute match spans from a literal search term.
///
/// Every data cell gets the byte span of the first occurrence of `term`,
/// or `None`; each row's `has_match` is the OR over its cells. An empty
/// term clears every span instead of matching everywhere. Row visibility
/// is never touched here.
pub fn run_search(table: &mut DataTable, term: &str) {
    for row in &mut table.rows {
        let mut matched = false;
        for cell in &mut row.cells {
            if term.is_empty() {
                cell.match_span = None;
                continue;
            }
            match cell.text.find(term) {
                Some(idx) => {
                    cell.match_span = Some((idx, idx + term.len()));
                    matched = true;
                }
                None => cell.match_span = None,
            }
        }
        row.has_match = !term.is_empty() && matched;
    }

    debug!(
        target: "search",
        term_len = term.len(),
        matched_rows = table.matched_row_count(),
        "search evaluated"
    );
}

/// Recompute row visibility from a literal filter term.
///
/// A row stays visible iff at least one cell contains `term`; an empty
/// term shows every row. Match spans from the search channel are left
/// as they are.
pub fn run_filter(table: &mut DataTable, term: &str) {
    for row in &mut table.rows {
        row.visible = term.is_empty() || row.cells.iter().any(|c| c.text.contains(term));
    }

    debug!(
        target: "search",
        term_len = term.len(),
        visible_rows = table.visible_row_count(),
        "filter evaluated"
    );
}
