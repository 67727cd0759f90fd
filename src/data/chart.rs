use super::model::{ResultTable, NAME_COLUMN, SIZE_COLUMN};

/// One bar of the grouped chart: a model's score on one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRecord {
    pub model: String,
    pub metric: String,
    /// `None` for an empty cell; the chart leaves a gap.
    pub score: Option<f64>,
}

/// Numeric columns plotted on the chart (everything numeric but `Size`).
pub fn chart_metrics(table: &ResultTable) -> Vec<&str> {
    table
        .columns()
        .iter()
        .filter(|c| c.is_numeric() && c.name != SIZE_COLUMN)
        .map(|c| c.name.as_str())
        .collect()
}

/// Reshape `table` into long form: one record per (model, metric) pair.
///
/// Records come out model by model, metrics in column order.
pub fn project(table: &ResultTable) -> Vec<ChartRecord> {
    let metrics: Vec<(usize, &str)> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_numeric() && c.name != SIZE_COLUMN)
        .map(|(i, c)| (i, c.name.as_str()))
        .collect();
    if metrics.is_empty() {
        return Vec::new();
    }
    let name_idx = table.column_index(NAME_COLUMN);

    let mut records = Vec::with_capacity(table.len() * metrics.len());
    for row in table.rows() {
        let model = name_idx.map(|i| row[i].to_string()).unwrap_or_default();
        for &(col_idx, metric) in &metrics {
            records.push(ChartRecord {
                model: model.clone(),
                metric: metric.to_string(),
                score: row[col_idx].as_f64(),
            });
        }
    }
    records
}
