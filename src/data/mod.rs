/// Data layer: result table, loading, filtering and the derived views.
///
/// Architecture:
/// ```text
///  Google Sheet (CSV export) / local .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → ResultTable (scores on the configured scale)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → reduced rows + columns
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌───────────┐  ┌─────────┐
///   │ highlight  │  │  chart  │  top-3 per column / long-form series
///   └───────────┘  └─────────┘
///        │              │
///        └──────┬───────┘
///               ▼
///          DashboardView
/// ```

pub mod chart;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod loader;
pub mod model;
pub mod selection;
pub mod view;
