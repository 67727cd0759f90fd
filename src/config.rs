use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::loader::TableSource;
use crate::data::selection::{ColumnMatching, Level, ScoreScale};

/// Environment variable pointing at a config file.
pub const CONFIG_ENV: &str = "LUXBENCH_CONFIG";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "luxbench.toml";

/// The published LuxBench results sheet.
pub const DEFAULT_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1pfKrg_XDlyP7TSSo1MWlTAgVDZ9Cwz6LXuNO7eHEhr0/edit?usp=sharing";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Settings read once at startup. Every field is optional in the file.
///
/// ```toml
/// sheet_url = "https://docs.google.com/spreadsheets/d/<id>/edit"
/// csv_path = "results.csv"        # takes precedence over sheet_url
/// score_scale = "percent"         # or "fraction"
/// column_matching = "token"       # or "substring"
/// size_max = 700
/// include_c_levels = false
/// fetch_timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub sheet_url: String,
    pub csv_path: Option<PathBuf>,
    pub score_scale: ScoreScale,
    pub column_matching: ColumnMatching,
    pub size_max: u32,
    pub include_c_levels: bool,
    pub fetch_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sheet_url: DEFAULT_SHEET_URL.to_string(),
            csv_path: None,
            score_scale: ScoreScale::Fraction,
            column_matching: ColumnMatching::Substring,
            size_max: 700,
            include_c_levels: false,
            fetch_timeout_secs: 30,
        }
    }
}

impl DashboardConfig {
    /// Load from `$LUXBENCH_CONFIG`, else `./luxbench.toml`, else defaults.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::from_file(default_path);
        }
        log::info!("no {DEFAULT_CONFIG_FILE} found, using built-in defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        Ok(config)
    }

    /// Local CSV if configured, otherwise the sheet URL.
    pub fn source(&self) -> TableSource {
        match &self.csv_path {
            Some(path) => TableSource::File(path.clone()),
            None => TableSource::Url(self.sheet_url.clone()),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Level options offered in the control panel.
    pub fn levels(&self) -> &'static [Level] {
        if self.include_c_levels {
            &Level::ALL
        } else {
            &Level::STANDARD
        }
    }
}
