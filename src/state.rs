use std::path::Path;

use crate::config::DashboardConfig;
use crate::data::error::DataError;
use crate::data::loader::{self, TableSource};
use crate::data::model::ResultTable;
use crate::data::selection::{Category, FilterSelection, Level, Openness, SizeRange};
use crate::data::view::DashboardView;

// ---------------------------------------------------------------------------
// Control values
// ---------------------------------------------------------------------------

/// Raw widget values. Turned into a [`FilterSelection`] on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub openness: Openness,
    pub level: Option<Level>,
    pub category: Option<Category>,
    pub family: Option<String>,
    pub size_min: u32,
    pub size_max: u32,
    /// Position on the threshold slider, `0..=THRESHOLD_STEPS`.
    pub threshold_step: u32,
}

impl Controls {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            openness: Openness::All,
            level: None,
            category: None,
            family: None,
            size_min: 0,
            size_max: config.size_max,
            threshold_step: 0,
        }
    }

    pub fn selection(&self, config: &DashboardConfig) -> FilterSelection {
        FilterSelection::default()
            .with_openness(self.openness)
            .with_level(self.level)
            .with_category(self.category)
            .with_family(self.family.clone())
            .with_size(SizeRange::new(self.size_min as f64, self.size_max as f64))
            .with_min_performance(config.score_scale.threshold_at(self.threshold_step))
            .with_matching(config.column_matching)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Source table (None until a load succeeds).
    pub table: Option<ResultTable>,

    /// Where `table` came from.
    pub source: TableSource,

    pub controls: Controls,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            controls: Controls::new(&config),
            source: config.source(),
            config,
            table: None,
            status_message: None,
        }
    }

    /// Fetch the configured source again. Blocks until done.
    pub fn reload(&mut self) {
        let source = self.source.clone();
        self.load_from(source);
    }

    /// Switch to a local CSV export.
    pub fn open_file(&mut self, path: &Path) {
        self.load_from(TableSource::File(path.to_path_buf()));
    }

    fn load_from(&mut self, source: TableSource) {
        match loader::load(&source, self.config.score_scale, self.config.fetch_timeout()) {
            Ok(table) => {
                log::info!(
                    "Loaded {} models with {} columns from {source}",
                    table.len(),
                    table.columns().len()
                );
                self.table = Some(table);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load results from {source}: {e}");
                self.table = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
        self.source = source;
    }

    /// Recompute the view for the current controls; `None` until loaded.
    pub fn view(&self) -> Option<Result<DashboardView, DataError>> {
        let table = self.table.as_ref()?;
        let selection = self.controls.selection(&self.config);
        Some(DashboardView::build(table, &selection))
    }
}
