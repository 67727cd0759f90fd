use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Score scale
// ---------------------------------------------------------------------------

/// Scale shared by stored scores and the performance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreScale {
    /// Scores in `[0, 1]`, as stored in the sheet.
    #[default]
    Fraction,
    /// Scores in `[0, 100]`, rounded to 2 decimals.
    Percent,
}

/// Number of positions on the threshold slider (0%, 10%, …, 100%).
pub const THRESHOLD_STEPS: u32 = 10;

impl ScoreScale {
    /// Convert a raw sheet score onto this scale.
    pub fn normalize(self, raw: f64) -> f64 {
        match self {
            ScoreScale::Fraction => raw,
            ScoreScale::Percent => (raw * 100.0 * 100.0).round() / 100.0,
        }
    }

    /// Threshold value at slider position `step` (clamped to `0..=THRESHOLD_STEPS`).
    pub fn threshold_at(self, step: u32) -> f64 {
        let step = step.min(THRESHOLD_STEPS) as f64;
        match self {
            ScoreScale::Fraction => step / THRESHOLD_STEPS as f64,
            ScoreScale::Percent => step * (100.0 / THRESHOLD_STEPS as f64),
        }
    }

    pub fn format_score(self, v: f64) -> String {
        match self {
            ScoreScale::Fraction => format!("{v:.1}"),
            ScoreScale::Percent => format!("{v:.0}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column matching
// ---------------------------------------------------------------------------

/// How level/category choices are matched against metric column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMatching {
    /// Plain substring containment (`"A1"` matches any name containing `A1`).
    #[default]
    Substring,
    /// Compare against the `_`-separated tokens of the column name.
    Token,
}

impl ColumnMatching {
    /// Whether `column` matches a single level or category name.
    pub fn matches_one(self, column: &str, needle: &str) -> bool {
        match self {
            ColumnMatching::Substring => column.contains(needle),
            ColumnMatching::Token => column.split('_').any(|tok| tok == needle),
        }
    }

    /// Whether `column` matches the combined `<level>_<category>` pattern.
    pub fn matches_pair(self, column: &str, level: &str, category: &str) -> bool {
        match self {
            ColumnMatching::Substring => column.contains(&format!("{level}_{category}")),
            ColumnMatching::Token => {
                let tokens: Vec<&str> = column.split('_').collect();
                tokens.windows(2).any(|w| w[0] == level && w[1] == category)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Control choices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Openness {
    #[default]
    All,
    Open,
    Closed,
}

impl Openness {
    pub const OPTIONS: [Openness; 3] = [Openness::All, Openness::Open, Openness::Closed];

    pub fn as_str(self) -> &'static str {
        match self {
            Openness::All => "All",
            Openness::Open => "Open",
            Openness::Closed => "Closed",
        }
    }
}

/// CEFR proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl Level {
    /// Levels covered by the published test.
    pub const STANDARD: [Level; 4] = [Level::A1, Level::A2, Level::B1, Level::B2];
    pub const ALL: [Level; 6] = [
        Level::A1,
        Level::A2,
        Level::B1,
        Level::B2,
        Level::C1,
        Level::C2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
            Level::C2 => "C2",
        }
    }
}

/// Test category. `Total` is the per-level aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Vocab,
    Grammar,
    Rc,
    Lc,
    Total,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Vocab,
        Category::Grammar,
        Category::Rc,
        Category::Lc,
        Category::Total,
    ];

    /// Name as it appears in column headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Vocab => "VOCAB",
            Category::Grammar => "GRAMMAR",
            Category::Rc => "RC",
            Category::Lc => "LC",
            Category::Total => "total",
        }
    }
}

/// Model families offered in the family selector.
pub const KNOWN_FAMILIES: [&str; 15] = [
    "Aya",
    "Claude",
    "Command-R",
    "DeepSeek",
    "Falcon",
    "Gemini",
    "Gemma",
    "GLM",
    "GPT",
    "Llama",
    "Mistral",
    "Phi",
    "Qwen",
    "StableLM",
    "WizardLM",
];

/// Inclusive range on the `Size` column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl SizeRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, size: f64) -> bool {
        self.min <= size && size <= self.max
    }
}

impl fmt::Display for SizeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// FilterSelection
// ---------------------------------------------------------------------------

/// Immutable snapshot of every filter control, rebuilt on each render.
///
/// `None` for level, category or family means "All".
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    openness: Openness,
    level: Option<Level>,
    category: Option<Category>,
    family: Option<String>,
    size: SizeRange,
    min_performance: f64,
    matching: ColumnMatching,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            openness: Openness::All,
            level: None,
            category: None,
            family: None,
            size: SizeRange::new(0.0, 700.0),
            min_performance: 0.0,
            matching: ColumnMatching::Substring,
        }
    }
}

impl FilterSelection {
    pub fn with_openness(self, openness: Openness) -> Self {
        Self { openness, ..self }
    }

    pub fn with_level(self, level: Option<Level>) -> Self {
        Self { level, ..self }
    }

    pub fn with_category(self, category: Option<Category>) -> Self {
        Self { category, ..self }
    }

    pub fn with_family(self, family: Option<String>) -> Self {
        Self { family, ..self }
    }

    pub fn with_size(self, size: SizeRange) -> Self {
        Self { size, ..self }
    }

    /// Threshold on the same scale as the loaded scores.
    pub fn with_min_performance(self, min_performance: f64) -> Self {
        Self {
            min_performance,
            ..self
        }
    }

    pub fn with_matching(self, matching: ColumnMatching) -> Self {
        Self { matching, ..self }
    }

    pub fn openness(&self) -> Openness {
        self.openness
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    pub fn size(&self) -> SizeRange {
        self.size
    }

    pub fn min_performance(&self) -> f64 {
        self.min_performance
    }

    pub fn matching(&self) -> ColumnMatching {
        self.matching
    }
}
