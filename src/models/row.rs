//! Raw import/export row.
//!
//! A row is an ordered list of `(column, value)` pairs exactly as read from
//! the source sheet. Column order is preserved so unrecognized columns can
//! be re-emitted in their original position on export.

use serde::{Deserialize, Serialize};

/// One spreadsheet row, keyed by header text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell (builder form).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    /// Returns the value for a column, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first non-blank value among `columns`, trimmed.
    ///
    /// Columns are tried in order; the first one that exists and holds
    /// non-whitespace text wins.
    pub fn first_non_empty(&self, columns: &[&str]) -> Option<&str> {
        columns
            .iter()
            .filter_map(|c| self.get(c))
            .map(str::trim)
            .find(|v| !v.is_empty())
    }

    /// Sets a column, overwriting in place or appending at the end.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    /// Cells in order.
    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.set(k, v);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut row = RawRow::new().with("a", "1").with("b", "2");
        row.set("a", "9");
        row.set("c", "3");
        let cols: Vec<&str> = row.columns().collect();
        assert_eq!(cols, vec!["a", "b", "c"]);
        assert_eq!(row.get("a"), Some("9"));
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_first_non_empty_skips_blank() {
        let row = RawRow::new().with("성명", "  ").with("이름", " 김민수 ");
        assert_eq!(row.first_non_empty(&["성명", "이름"]), Some("김민수"));
        assert_eq!(row.first_non_empty(&["없음"]), None);
    }
}
