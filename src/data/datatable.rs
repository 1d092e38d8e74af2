use anyhow::{anyhow, Result};
use std::collections::HashSet;

/// A single cell: its text plus the byte span of the current search match.
#[derive(Debug, Clone, PartialEq)]
pub struct DataCell {
    pub text: String,
    /// Half-open byte range of the first search hit, `None` when unmatched.
    pub match_span: Option<(usize, usize)>,
}

impl DataCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            match_span: None,
        }
    }
}

/// A row of cells together with its filter/search state.
#[derive(Debug, Clone)]
pub struct DataRow {
    pub cells: Vec<DataCell>,
    pub visible: bool,
    pub has_match: bool,
}

impl DataRow {
    pub fn new(cells: Vec<DataCell>) -> Self {
        Self {
            cells,
            visible: true,
            has_match: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The table model: header, contents, column enable state, scroll offsets.
///
/// Built once at startup from parsed records and mutated in place for the
/// process lifetime. Disabled columns keep their data; they are only
/// excluded from rendering and width/scroll computation.
#[derive(Debug, Clone)]
pub struct DataTable {
    pub header: DataRow,
    pub rows: Vec<DataRow>,
    /// Per column, the max text length over header and all data rows.
    max_widths: Vec<usize>,
    disabled_cols: HashSet<usize>,
    pub offset_row: usize,
    pub offset_col: usize,
    /// Set by the `exit` command: render once more to stdout after teardown.
    pub dump_on_exit: bool,
}

impl DataTable {
    /// Build a table from parsed records. The first record is the header
    /// unless `synthetic_header` is set, in which case every record is data
    /// and the columns are labelled `col_0..col_{N-1}`.
    pub fn new(records: Vec<Vec<String>>, synthetic_header: bool) -> Result<Self> {
        if records.is_empty() {
            return Err(anyhow!("input contains no records"));
        }

        let n_cols = records[0].len();
        let header_texts: Vec<String> = if synthetic_header {
            (0..n_cols).map(|i| format!("col_{}", i)).collect()
        } else {
            records[0].clone()
        };

        let mut max_widths: Vec<usize> = header_texts.iter().map(|t| t.len()).collect();
        let header = DataRow::new(header_texts.into_iter().map(DataCell::new).collect());

        let data_records = if synthetic_header {
            &records[..]
        } else {
            &records[1..]
        };

        let mut rows = Vec::with_capacity(data_records.len());
        for record in data_records {
            for (i, field) in record.iter().enumerate() {
                if max_widths[i] < field.len() {
                    max_widths[i] = field.len();
                }
            }
            rows.push(DataRow::new(
                record.iter().map(|f| DataCell::new(f.clone())).collect(),
            ));
        }

        Ok(Self {
            header,
            rows,
            max_widths,
            disabled_cols: HashSet::new(),
            offset_row: 0,
            offset_col: 0,
            dump_on_exit: false,
        })
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of the column with the given header text.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.header.cells.iter().position(|c| c.text == name)
    }

    pub fn is_col_enabled(&self, idx: usize) -> bool {
        !self.disabled_cols.contains(&idx)
    }

    pub fn enabled_column_count(&self) -> usize {
        self.column_count() - self.disabled_cols.len()
    }

    pub fn disable_col(&mut self, idx: usize) {
        if idx < self.column_count() {
            self.disabled_cols.insert(idx);
        }
    }

    pub fn enable_col(&mut self, idx: usize) {
        self.disabled_cols.remove(&idx);
    }

    pub fn reset_disabled_cols(&mut self) {
        self.disabled_cols.clear();
    }

    pub fn set_row_visibility(&mut self, row: usize, visible: bool) {
        if let Some(r) = self.rows.get_mut(row) {
            r.visible = visible;
        }
    }

    pub fn reset_visibility(&mut self) {
        for row in &mut self.rows {
            row.visible = true;
        }
    }

    pub fn max_width(&self, col: usize) -> usize {
        self.max_widths[col]
    }

    /// Rendered width of a column: text padded to max+2 plus one separator.
    pub fn formatted_col_width(&self, col: usize) -> usize {
        self.max_widths[col] + 3
    }

    /// Rows whose `has_match` flag was set by the last search evaluation.
    pub fn matched_row_count(&self) -> usize {
        self.rows.iter().filter(|r| r.has_match).count()
    }

    pub fn visible_row_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visible).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_table_construction() {
        let table = DataTable::new(
            records(&[&["id", "name"], &["1", "alice"], &["2", "bob"]]),
            false,
        )
        .unwrap();

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.header.cells[1].text, "name");
        assert_eq!(table.rows[0].cells[1].text, "alice");
        assert!(table.rows.iter().all(|r| r.visible && !r.has_match));
    }

    #[test]
    fn test_synthetic_header() {
        let table = DataTable::new(records(&[&["1", "alice"], &["2", "bob"]]), true).unwrap();

        assert_eq!(table.header.cells[0].text, "col_0");
        assert_eq!(table.header.cells[1].text, "col_1");
        // The first record is data, not a header.
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].cells[0].text, "1");
    }

    #[test]
    fn test_max_widths_cover_header_and_data() {
        let table = DataTable::new(records(&[&["id", "n"], &["12345", "alice"]]), false).unwrap();

        assert_eq!(table.max_width(0), 5);
        assert_eq!(table.max_width(1), 5);
        assert_eq!(table.formatted_col_width(0), 8);
    }

    #[test]
    fn test_synthetic_header_counts_label_width() {
        // "col_0" is wider than any value in the column.
        let table = DataTable::new(records(&[&["1"], &["2"]]), true).unwrap();
        assert_eq!(table.max_width(0), 5);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(DataTable::new(Vec::new(), false).is_err());
    }

    #[test]
    fn test_column_enable_disable() {
        let mut table =
            DataTable::new(records(&[&["a", "b", "c"], &["1", "2", "3"]]), false).unwrap();

        assert!(table.is_col_enabled(1));
        table.disable_col(1);
        table.disable_col(1); // set semantics, no duplicates
        assert!(!table.is_col_enabled(1));
        assert_eq!(table.enabled_column_count(), 2);

        table.enable_col(1);
        assert!(table.is_col_enabled(1));
        assert_eq!(table.enabled_column_count(), 3);

        table.disable_col(0);
        table.disable_col(2);
        table.reset_disabled_cols();
        assert_eq!(table.enabled_column_count(), 3);
    }

    #[test]
    fn test_disable_out_of_range_is_noop() {
        let mut table = DataTable::new(records(&[&["a"], &["1"]]), false).unwrap();
        table.disable_col(9);
        assert_eq!(table.enabled_column_count(), 1);
    }

    #[test]
    fn test_find_column() {
        let table = DataTable::new(records(&[&["id", "name"], &["1", "alice"]]), false).unwrap();

        assert_eq!(table.find_column("name"), Some(1));
        assert_eq!(table.find_column("missing"), None);
    }

    #[test]
    fn test_visibility_reset() {
        let mut table = DataTable::new(records(&[&["a"], &["1"], &["2"]]), false).unwrap();

        table.set_row_visibility(0, false);
        assert_eq!(table.visible_row_count(), 1);
        table.reset_visibility();
        assert_eq!(table.visible_row_count(), 2);
    }
}
