use std::collections::BTreeMap;

use super::model::{ResultTable, SIZE_COLUMN};

/// How many cells per column get a highlight.
pub const TOP_N: usize = 3;

/// Position of a cell among the best values of its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HighlightRank {
    First,
    Second,
    Third,
}

impl HighlightRank {
    const ORDER: [HighlightRank; TOP_N] =
        [HighlightRank::First, HighlightRank::Second, HighlightRank::Third];

    /// 1-based rank number.
    pub fn number(self) -> usize {
        match self {
            HighlightRank::First => 1,
            HighlightRank::Second => 2,
            HighlightRank::Third => 3,
        }
    }
}

/// Highlighted cells keyed by `(row, column)` index. Absent means no highlight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightMap {
    cells: BTreeMap<(usize, usize), HighlightRank>,
}

impl HighlightMap {
    pub fn rank(&self, row: usize, col: usize) -> Option<HighlightRank> {
        self.cells.get(&(row, col)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(usize, usize), &HighlightRank)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Mark the top three values of every numeric column except `Size`.
///
/// Columns are ranked independently. Ties keep row order; empty cells are
/// never ranked.
pub fn highlight(table: &ResultTable) -> HighlightMap {
    let mut map = HighlightMap::default();
    if table.is_empty() {
        return map;
    }

    for (col_idx, column) in table.columns().iter().enumerate() {
        if !column.is_numeric() || column.name == SIZE_COLUMN {
            continue;
        }

        let mut values: Vec<(usize, f64)> = table
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(row_idx, row)| row[col_idx].as_f64().map(|v| (row_idx, v)))
            .filter(|(_, v)| !v.is_nan())
            .collect();
        // stable: equal values stay in row order
        values.sort_by(|a, b| b.1.total_cmp(&a.1));

        for ((row_idx, _), rank) in values.into_iter().zip(HighlightRank::ORDER) {
            map.cells.insert((row_idx, col_idx), rank);
        }
    }
    map
}
