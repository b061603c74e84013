use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Row – one record of the source CSV
// ---------------------------------------------------------------------------

/// A single record: column name → raw cell text.
pub type Row = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed table, with header order preserved.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Header names in file order (may contain duplicates or blanks).
    pub headers: Vec<String>,
    /// All records.
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from a header and records given as cell vectors.
    ///
    /// Short records read as empty strings for their missing cells, surplus
    /// cells are dropped, and on duplicate header names the later cell wins.
    pub fn from_records<I, R, S>(headers: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = records
            .into_iter()
            .map(|record| {
                let mut cells = record.into_iter().map(Into::into);
                let mut row = Row::new();
                for name in &headers {
                    row.insert(name.clone(), cells.next().unwrap_or_default());
                }
                row
            })
            .collect();
        Dataset { headers, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ColumnStat / Summary – pipeline output
// ---------------------------------------------------------------------------

/// Statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStat {
    pub name: String,
    /// Number of cells that parsed as a non-NaN number.
    pub count: usize,
    pub raw_mean: f64,
    /// `raw_mean` mapped into `[0, 5]`.
    pub scaled_mean: f64,
    /// Pearson r against the stress column. `None` when there is no stress
    /// column, or for the stress column itself.
    pub correlation: Option<f64>,
}

/// Everything computed from one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Where the data came from.
    pub source: PathBuf,
    /// Correlation target, if the header has one.
    pub stress_column: Option<String>,
    /// One entry per numeric column, in header order. Never empty.
    pub columns: Vec<ColumnStat>,
}

impl Summary {
    pub fn column(&self, name: &str) -> Option<&ColumnStat> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn short_records_pad_with_empty_cells() {
        let ds = Dataset::from_records(headers(&["a", "b", "c"]), vec![vec!["1"]]);
        assert_eq!(ds.rows[0]["a"], "1");
        assert_eq!(ds.rows[0]["b"], "");
        assert_eq!(ds.rows[0]["c"], "");
    }

    #[test]
    fn surplus_cells_are_dropped() {
        let ds = Dataset::from_records(headers(&["a"]), vec![vec!["1", "2", "3"]]);
        assert_eq!(ds.rows[0].len(), 1);
        assert_eq!(ds.rows[0]["a"], "1");
    }

    #[test]
    fn duplicate_header_keeps_last_cell() {
        let ds = Dataset::from_records(headers(&["a", "a"]), vec![vec!["1", "2"]]);
        assert_eq!(ds.rows[0]["a"], "2");
    }

    #[test]
    fn rows_only_hold_header_columns() {
        let ds = Dataset::from_records(headers(&["a"]), vec![vec!["1"]]);
        assert_eq!(ds.rows[0].get("zzz"), None);
        assert_eq!(ds.len(), 1);
        assert!(!ds.is_empty());
    }
}
