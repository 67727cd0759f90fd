use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::DataError;
use super::model::{
    CellValue, Column, ColumnKind, ResultTable, FAMILY_COLUMN, IDENTITY_COLUMNS, NAME_COLUMN,
    OPENNESS_COLUMN, SIZE_COLUMN,
};
use super::selection::ScoreScale;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Where the results sheet comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// A spreadsheet URL. Google Sheets edit/share links are rewritten to
    /// their CSV export endpoint.
    Url(String),
    /// A local CSV export of the sheet.
    File(PathBuf),
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Url(url) => write!(f, "{url}"),
            TableSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the results table from `source`, normalising scores onto `scale`.
///
/// Blocks until the fetch completes. Fails fast: there are no retries.
pub fn load(source: &TableSource, scale: ScoreScale, timeout: Duration) -> Result<ResultTable, DataError> {
    match source {
        TableSource::Url(url) => {
            let body = fetch_sheet(url, timeout)?;
            parse_csv(body.as_bytes(), scale)
        }
        TableSource::File(path) => load_file(path, scale),
    }
}

/// Read a local CSV export.
pub fn load_file(path: &Path, scale: ScoreScale) -> Result<ResultTable, DataError> {
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_csv(file, scale)
}

// ---------------------------------------------------------------------------
// Remote sheet
// ---------------------------------------------------------------------------

const GOOGLE_SHEETS_PREFIX: &str = "https://docs.google.com/spreadsheets/d/";

/// Rewrite a Google Sheets document URL to its CSV export URL.
///
/// `.../d/<id>/edit?usp=sharing#gid=42` becomes
/// `.../d/<id>/export?format=csv&gid=42`. Other URLs pass through unchanged.
pub fn export_csv_url(url: &str) -> String {
    let Some(rest) = url.strip_prefix(GOOGLE_SHEETS_PREFIX) else {
        return url.to_string();
    };
    let id: String = rest
        .chars()
        .take_while(|c| !matches!(c, '/' | '?' | '#'))
        .collect();
    if id.is_empty() {
        return url.to_string();
    }

    let gid = rest.split(['?', '#', '&']).find_map(|part| {
        part.strip_prefix("gid=")
            .filter(|g| !g.is_empty() && g.chars().all(|c| c.is_ascii_digit()))
    });

    match gid {
        Some(gid) => format!("{GOOGLE_SHEETS_PREFIX}{id}/export?format=csv&gid={gid}"),
        None => format!("{GOOGLE_SHEETS_PREFIX}{id}/export?format=csv"),
    }
}

/// Download the sheet as CSV text.
pub fn fetch_sheet(url: &str, timeout: Duration) -> Result<String, DataError> {
    let export_url = export_csv_url(url);
    log::debug!("fetching results sheet from {export_url}");

    let fetch_err = |e: reqwest::Error| DataError::Fetch {
        url: export_url.clone(),
        message: e.to_string(),
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("luxbench/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(fetch_err)?;

    let response = client.get(&export_url).send().map_err(fetch_err)?;
    check_status(&export_url, response.status())?;

    response.text().map_err(fetch_err)
}

/// Anything but a 2xx answer fails the load.
fn check_status(url: &str, status: reqwest::StatusCode) -> Result<(), DataError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(DataError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse a sheet export. Layout: header row, one row per model.
///
/// `LLM`, `Family` and `Closed_Open` are text. `Size` and every other
/// column must hold numbers or be empty; anything else is rejected.
/// Metric scores (not `Size`) are converted onto `scale`.
pub fn parse_csv<R: Read>(input: R, scale: ScoreScale) -> Result<ResultTable, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DataError::EmptySource);
    }

    // Unnamed trailing columns show up in sheet exports; drop them.
    let kept: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !h.is_empty())
        .map(|(i, _)| i)
        .collect();

    let names = dedupe_headers(kept.iter().map(|&i| headers[i].as_str()));
    let columns: Vec<Column> = names
        .into_iter()
        .map(|name| {
            let kind = column_kind(&name);
            Column::new(name, kind)
        })
        .collect();

    for name in IDENTITY_COLUMNS {
        if !columns.iter().any(|c| c.name == name) {
            return Err(DataError::MissingColumn(name.to_string()));
        }
    }

    let mut rows = Vec::new();
    for (row_no, record) in reader.records().enumerate() {
        let record = record?;
        let mut row = Vec::with_capacity(columns.len());
        for (col, &src_idx) in columns.iter().zip(&kept) {
            let raw = record.get(src_idx).unwrap_or("").trim();
            row.push(parse_cell(col, raw, row_no + 1, scale)?);
        }
        rows.push(row);
    }

    Ok(ResultTable::new(columns, rows))
}

/// Repeated headers get a `.1`, `.2`, … suffix so no column is shadowed.
fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::new();
    for header in headers {
        let mut name = header.to_string();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{header}.{n}");
            n += 1;
        }
        if name != header {
            log::warn!("duplicate column '{header}' renamed to '{name}'");
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}

fn column_kind(name: &str) -> ColumnKind {
    match name {
        NAME_COLUMN | FAMILY_COLUMN | OPENNESS_COLUMN => ColumnKind::Text,
        _ => ColumnKind::Numeric,
    }
}

fn parse_cell(col: &Column, raw: &str, row: usize, scale: ScoreScale) -> Result<CellValue, DataError> {
    if raw.is_empty() {
        return Ok(CellValue::Null);
    }
    if col.kind == ColumnKind::Text {
        return Ok(CellValue::Text(raw.to_string()));
    }

    let non_numeric = || DataError::NonNumeric {
        column: col.name.clone(),
        row,
        value: raw.to_string(),
    };
    // f64 parsing also accepts "inf" and "NaN"; those are not scores
    let value = match raw.parse::<i64>() {
        Ok(i) => CellValue::Integer(i),
        Err(_) => match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => CellValue::Float(f),
            _ => return Err(non_numeric()),
        },
    };

    match value.as_f64() {
        Some(v) if scale == ScoreScale::Percent && col.name != SIZE_COLUMN => {
            Ok(CellValue::Float(scale.normalize(v)))
        }
        _ => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
LLM,Size,Family,Closed_Open,A1_VOCAB,A1_total,B1_total
Llama-3-70B,70,Llama,Open,0.91,0.875,0.5
GPT-4o,,GPT,Closed,0.98,0.95,0.8
Phi-3-mini,3.8,Phi,Open,0.4,,0.1
";

    #[test]
    fn parses_identity_and_metric_columns() {
        let t = parse_csv(SHEET.as_bytes(), ScoreScale::Fraction).unwrap();
        assert_eq!(t.len(), 3);
        let names: Vec<&str> = t.column_names().collect();
        assert_eq!(
            names,
            vec!["LLM", "Size", "Family", "Closed_Open", "A1_VOCAB", "A1_total", "B1_total"]
        );
        assert_eq!(t.columns()[0].kind, ColumnKind::Text);
        assert_eq!(t.columns()[1].kind, ColumnKind::Numeric);
        assert_eq!(t.cell(0, 1), &CellValue::Integer(70));
        assert_eq!(t.cell(1, 1), &CellValue::Null);
        assert_eq!(t.cell(2, 1), &CellValue::Float(3.8));
        assert_eq!(t.cell(2, 5), &CellValue::Null);
    }

    #[test]
    fn percent_scale_converts_scores_but_not_size() {
        let t = parse_csv(SHEET.as_bytes(), ScoreScale::Percent).unwrap();
        assert_eq!(t.cell(0, 1), &CellValue::Integer(70));
        assert_eq!(t.cell(0, 5), &CellValue::Float(87.5));
        assert_eq!(t.cell(1, 4), &CellValue::Float(98.0));
    }

    #[test]
    fn text_in_metric_column_is_rejected() {
        let csv = "LLM,Size,Family,Closed_Open,A1_total\nx,7,GPT,Open,n/a\n";
        let err = parse_csv(csv.as_bytes(), ScoreScale::Fraction).unwrap_err();
        match err {
            DataError::NonNumeric { column, row, value } => {
                assert_eq!(column, "A1_total");
                assert_eq!(row, 1);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn text_in_size_column_is_rejected() {
        let csv = "LLM,Size,Family,Closed_Open\nx,huge,GPT,Closed\n";
        let err = parse_csv(csv.as_bytes(), ScoreScale::Fraction).unwrap_err();
        assert!(matches!(err, DataError::NonNumeric { ref column, .. } if column == "Size"));
    }

    #[test]
    fn missing_identity_column_is_rejected() {
        let csv = "LLM,Size,Closed_Open,A1_total\nx,7,Open,0.5\n";
        let err = parse_csv(csv.as_bytes(), ScoreScale::Fraction).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "Family"));
    }

    #[test]
    fn unnamed_columns_are_dropped() {
        let csv = "LLM,Size,Family,Closed_Open,A1_total,\nx,7,GPT,Open,0.5,\n";
        let t = parse_csv(csv.as_bytes(), ScoreScale::Fraction).unwrap();
        assert_eq!(t.columns().len(), 5);
    }

    #[test]
    fn header_only_sheet_is_an_empty_table() {
        let csv = "LLM,Size,Family,Closed_Open,A1_total\n";
        let t = parse_csv(csv.as_bytes(), ScoreScale::Fraction).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn google_sheet_urls_become_csv_exports() {
        assert_eq!(
            export_csv_url("https://docs.google.com/spreadsheets/d/abc_123/edit?usp=sharing"),
            "https://docs.google.com/spreadsheets/d/abc_123/export?format=csv"
        );
        assert_eq!(
            export_csv_url("https://docs.google.com/spreadsheets/d/abc/edit#gid=42"),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv&gid=42"
        );
        assert_eq!(
            export_csv_url("https://example.org/results.csv"),
            "https://example.org/results.csv"
        );
    }

    #[test]
    fn text_like_inf_or_nan_is_rejected() {
        for bad in ["inf", "-infinity", "NaN"] {
            let csv = format!("LLM,Size,Family,Closed_Open,A1_total\nx,7,GPT,Open,{bad}\n");
            let err = parse_csv(csv.as_bytes(), ScoreScale::Fraction).unwrap_err();
            assert!(
                matches!(err, DataError::NonNumeric { ref value, .. } if value == bad),
                "{bad} was accepted"
            );
        }
        let csv = "LLM,Size,Family,Closed_Open\nx,inf,GPT,Open\n";
        let err = parse_csv(csv.as_bytes(), ScoreScale::Fraction).unwrap_err();
        assert!(matches!(err, DataError::NonNumeric { ref column, .. } if column == "Size"));
    }

    #[test]
    fn duplicate_headers_keep_every_column() {
        let csv = "LLM,Size,Family,Closed_Open,A1_total,A1_total,A1_total\nx,7,GPT,Open,0.1,0.9,0.5\n";
        let t = parse_csv(csv.as_bytes(), ScoreScale::Fraction).unwrap();
        let names: Vec<&str> = t.column_names().skip(4).collect();
        assert_eq!(names, vec!["A1_total", "A1_total.1", "A1_total.2"]);
        assert_eq!(t.cell(0, 5), &CellValue::Float(0.9));

        let out = crate::data::filter::filter(&t, &crate::data::selection::FilterSelection::default())
            .unwrap();
        let idx = out.column_index("A1_total.1").unwrap();
        assert_eq!(out.cell(0, idx), &CellValue::Float(0.9));
    }

    #[test]
    fn renamed_duplicates_do_not_collide_with_existing_names() {
        let names = dedupe_headers(["a", "a.1", "a", "a"].into_iter());
        assert_eq!(names, vec!["a", "a.1", "a.2", "a.3"]);
    }

    #[test]
    fn non_success_status_fails_the_load() {
        assert!(check_status("https://example.org/s.csv", reqwest::StatusCode::OK).is_ok());
        let err = check_status("https://example.org/s.csv", reqwest::StatusCode::NOT_FOUND)
            .unwrap_err();
        match err {
            DataError::HttpStatus { url, status } => {
                assert_eq!(url, "https://example.org/s.csv");
                assert_eq!(status, 404);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            check_status("u", reqwest::StatusCode::FOUND),
            Err(DataError::HttpStatus { status: 302, .. })
        ));
    }

    #[test]
    fn unusable_url_is_a_fetch_error() {
        let err = fetch_sheet("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, DataError::Fetch { ref url, .. } if url == "not a url"));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_file(Path::new("/nonexistent/results.csv"), ScoreScale::Fraction).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/results.csv"));
    }
}
