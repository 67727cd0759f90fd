use thiserror::Error;

/// Errors raised while fetching, parsing or filtering a result table.
///
/// Displayed verbatim in the status bar, so messages are written for users.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to fetch results sheet from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("results sheet {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("results table has no '{0}' column")]
    MissingColumn(String),

    #[error("column '{column}', row {row}: '{value}' is not a number")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("results sheet has no header row")]
    EmptySource,
}
