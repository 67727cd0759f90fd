use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::MetricColors;
use crate::data::chart::ChartRecord;

/// Share of each model's slot taken by its group of bars.
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Grouped bar chart (central panel)
// ---------------------------------------------------------------------------

/// Models in first-appearance order.
fn model_order(series: &[ChartRecord]) -> Vec<String> {
    let mut models: Vec<String> = Vec::new();
    for rec in series {
        if !models.contains(&rec.model) {
            models.push(rec.model.clone());
        }
    }
    models
}

/// Build one bar chart per metric; bars of a model sit side by side.
pub fn grouped_bars(series: &[ChartRecord], metrics: &[&str], colors: &MetricColors) -> Vec<BarChart> {
    let models = model_order(series);
    let bar_width = GROUP_WIDTH / metrics.len().max(1) as f64;

    metrics
        .iter()
        .enumerate()
        .map(|(j, &metric)| {
            let bars: Vec<Bar> = series
                .iter()
                .filter(|rec| rec.metric == metric)
                .filter_map(|rec| {
                    let score = rec.score?;
                    let i = models.iter().position(|m| *m == rec.model)?;
                    let x = i as f64 - GROUP_WIDTH / 2.0 + bar_width * (j as f64 + 0.5);
                    Some(
                        Bar::new(x, score)
                            .width(bar_width)
                            .name(format!("{}\n{metric}", rec.model)),
                    )
                })
                .collect();
            BarChart::new(bars)
                .name(metric)
                .color(colors.color_for(metric))
        })
        .collect()
}

/// Render the "Performance Metrics by LLM" chart.
pub fn performance_chart(ui: &mut Ui, series: &[ChartRecord], metrics: &[&str]) {
    let colors = MetricColors::new(metrics);
    let charts = grouped_bars(series, metrics, &colors);
    let models = model_order(series);

    ui.label("Performance Metrics by LLM  (legend: Level_Category)");
    Plot::new("performance_chart")
        .legend(Legend::default())
        .height(400.0)
        .x_axis_label("LLM Model")
        .y_axis_label("Performance")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            let on_slot = (mark.value - idx).abs() < 1e-6 && idx >= 0.0;
            match models.get(idx as usize) {
                Some(name) if on_slot => name.clone(),
                _ => String::new(),
            }
        })
        .allow_scroll(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
