use std::fmt;

use super::error::DataError;

// ---------------------------------------------------------------------------
// Identity columns
// ---------------------------------------------------------------------------

/// Model name column.
pub const NAME_COLUMN: &str = "LLM";
/// Parameter count in billions.
pub const SIZE_COLUMN: &str = "Size";
/// Model lineage / vendor grouping.
pub const FAMILY_COLUMN: &str = "Family";
/// `Open` or `Closed`.
pub const OPENNESS_COLUMN: &str = "Closed_Open";

/// Columns every filtered table starts with, in display order.
pub const IDENTITY_COLUMNS: [&str; 4] = [NAME_COLUMN, SIZE_COLUMN, FAMILY_COLUMN, OPENNESS_COLUMN];

pub fn is_identity_column(name: &str) -> bool {
    IDENTITY_COLUMNS.contains(&name)
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the results sheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as read from the sheet export.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    /// Empty cell.
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64`; text and empty cells have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Column schema
// ---------------------------------------------------------------------------

/// Column typing, decided once when the sheet is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }
}

// ---------------------------------------------------------------------------
// ResultTable – rows of evaluated models
// ---------------------------------------------------------------------------

/// A rectangular results table: one row per evaluated model.
///
/// Tables are never mutated in place once built; filtering derives new ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
}

impl ResultTable {
    /// Build a table. Every row must have one cell per column.
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<CellValue>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Like [`column_index`](Self::column_index) but a missing column is an error.
    pub fn require_column(&self, name: &str) -> Result<usize, DataError> {
        self.column_index(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        &self.rows[row][col]
    }

    /// Number of models (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Derive a table with only the rows for which `keep` returns true.
    pub fn filter_rows<F>(&self, mut keep: F) -> ResultTable
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| keep(row.as_slice()))
            .cloned()
            .collect();
        ResultTable {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Derive a table with the named columns in the given order.
    pub fn select_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<ResultTable, DataError> {
        let indices = names
            .iter()
            .map(|n| self.require_column(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let columns = indices.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(ResultTable { columns, rows })
    }
}
