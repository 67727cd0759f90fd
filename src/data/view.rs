use super::chart::{project, ChartRecord};
use super::error::DataError;
use super::filter::filter;
use super::highlight::{highlight, HighlightMap};
use super::model::ResultTable;
use super::selection::FilterSelection;

/// Message shown when the filters leave no rows.
pub const NO_DATA_MESSAGE: &str = "No data matches the selected filters.";

/// Everything the UI draws for one render: recomputed every frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// The filters left no rows.
    NoData,
    Results {
        table: ResultTable,
        highlights: HighlightMap,
        /// Empty when no metric column survived the column selection.
        series: Vec<ChartRecord>,
    },
}

impl DashboardView {
    /// Run filter → highlight → project for one selection.
    pub fn build(source: &ResultTable, selection: &FilterSelection) -> Result<Self, DataError> {
        let table = filter(source, selection)?;
        if table.is_empty() {
            return Ok(DashboardView::NoData);
        }
        let highlights = highlight(&table);
        let series = project(&table);
        Ok(DashboardView::Results {
            table,
            highlights,
            series,
        })
    }

    pub fn row_count(&self) -> usize {
        match self {
            DashboardView::NoData => 0,
            DashboardView::Results { table, .. } => table.len(),
        }
    }
}
