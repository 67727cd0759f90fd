use std::collections::BTreeSet;

use super::error::DataError;
use super::model::{
    is_identity_column, ResultTable, FAMILY_COLUMN, IDENTITY_COLUMNS, OPENNESS_COLUMN, SIZE_COLUMN,
};
use super::selection::{FilterSelection, Openness};

/// Suffix of per-level aggregate score columns.
pub const TOTAL_SUFFIX: &str = "_total";

// ---------------------------------------------------------------------------
// Row/column filter
// ---------------------------------------------------------------------------

/// Derive the table shown for `selection`. The source table is not modified.
///
/// Steps, each narrowing the previous result:
/// 1. openness: keep rows whose `Closed_Open` equals the choice
/// 2. columns: identity columns followed by the matched metric columns, sorted
/// 3. family: keep rows whose `Family` equals the choice exactly
/// 4. size: keep rows with `min <= Size <= max`
/// 5. performance: keep rows where any selected `*_total` score reaches the
///    threshold; skipped when no `*_total` column is selected
///
/// An empty result is not an error.
pub fn filter(table: &ResultTable, selection: &FilterSelection) -> Result<ResultTable, DataError> {
    let mut out = match selection.openness() {
        Openness::All => table.clone(),
        choice => {
            let idx = table.require_column(OPENNESS_COLUMN)?;
            table.filter_rows(|row| row[idx].as_str() == Some(choice.as_str()))
        }
    };

    let columns = select_columns(&out, selection);
    out = out.select_columns(columns.as_slice())?;

    if let Some(family) = selection.family() {
        let idx = out.require_column(FAMILY_COLUMN)?;
        out = out.filter_rows(|row| row[idx].as_str() == Some(family));
    }

    let size_idx = out.require_column(SIZE_COLUMN)?;
    let range = selection.size();
    out = out.filter_rows(|row| row[size_idx].as_f64().is_some_and(|s| range.contains(s)));

    let totals: Vec<usize> = out
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.name.ends_with(TOTAL_SUFFIX))
        .map(|(i, _)| i)
        .collect();
    if !totals.is_empty() {
        let threshold = selection.min_performance();
        out = out.filter_rows(|row| {
            totals
                .iter()
                .any(|&i| row[i].as_f64().is_some_and(|v| v >= threshold))
        });
    }

    log::debug!(
        "filter {:?}: {} of {} rows, {} columns",
        selection,
        out.len(),
        table.len(),
        out.columns().len()
    );
    Ok(out)
}

/// Column names for `selection`: identity columns, then matched columns sorted.
pub fn select_columns(table: &ResultTable, selection: &FilterSelection) -> Vec<String> {
    let matching = selection.matching();
    let candidates = table.column_names().filter(|name| !is_identity_column(name));

    let matched: BTreeSet<&str> = match (selection.level(), selection.category()) {
        (Some(level), Some(category)) => candidates
            .filter(|name| matching.matches_pair(name, level.as_str(), category.as_str()))
            .collect(),
        (None, None) => candidates.collect(),
        (level, category) => candidates
            .filter(|name| {
                level.is_some_and(|l| matching.matches_one(name, l.as_str()))
                    || category.is_some_and(|c| matching.matches_one(name, c.as_str()))
            })
            .collect(),
    };

    IDENTITY_COLUMNS
        .iter()
        .map(|name| name.to_string())
        .chain(matched.into_iter().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::loader::parse_csv;
    use crate::data::model::{CellValue, Column, ColumnKind};
    use crate::data::selection::{Category, ColumnMatching, Level, ScoreScale, SizeRange};

    const SHEET: &str = "\
LLM,Size,Family,Closed_Open,A1_VOCAB,A1_GRAMMAR,B1_VOCAB,A1_total,B1_total
Llama-3-70B,70,Llama,Open,0.91,0.88,0.7,0.9,0.3
Llama-3-8B,8,Llama,Open,0.75,0.7,0.5,0.72,0.45
GPT-4o,200,GPT,Closed,0.98,0.97,0.93,0.96,0.9
Mistral-7B,7,Mistral,Open,0.6,0.55,0.35,0.58,0.2
Phi-3-mini,3.8,Phi,Open,0.4,0.35,0.2,0.38,0.1
";

    fn sheet() -> ResultTable {
        parse_csv(SHEET.as_bytes(), ScoreScale::Fraction).unwrap()
    }

    fn names(t: &ResultTable) -> Vec<String> {
        let idx = t.column_index("LLM").unwrap();
        t.rows().iter().map(|r| r[idx].to_string()).collect()
    }

    fn cols(t: &ResultTable) -> Vec<&str> {
        t.column_names().collect()
    }

    #[test]
    fn all_selection_keeps_everything() {
        let t = sheet();
        let out = filter(&t, &FilterSelection::default()).unwrap();
        assert_eq!(out.len(), t.len());
        assert_eq!(
            cols(&out),
            vec![
                "LLM", "Size", "Family", "Closed_Open", "A1_GRAMMAR", "A1_VOCAB", "A1_total",
                "B1_VOCAB", "B1_total"
            ]
        );
    }

    #[test]
    fn level_only_selects_level_columns_sorted() {
        let t = ResultTable::new(
            ["LLM", "Size", "Family", "Closed_Open", "A1_VOCAB", "A1_GRAMMAR", "B1_VOCAB"]
                .iter()
                .map(|n| {
                    let kind = if matches!(*n, "LLM" | "Family" | "Closed_Open") {
                        ColumnKind::Text
                    } else {
                        ColumnKind::Numeric
                    };
                    Column::new(*n, kind)
                })
                .collect(),
            Vec::new(),
        );
        let sel = FilterSelection::default().with_level(Some(Level::A1));
        assert_eq!(
            select_columns(&t, &sel),
            vec!["LLM", "Size", "Family", "Closed_Open", "A1_GRAMMAR", "A1_VOCAB"]
        );
    }

    #[test]
    fn level_and_category_use_combined_pattern() {
        let sel = FilterSelection::default()
            .with_level(Some(Level::A1))
            .with_category(Some(Category::Vocab));
        let out = filter(&sheet(), &sel).unwrap();
        assert_eq!(cols(&out), vec!["LLM", "Size", "Family", "Closed_Open", "A1_VOCAB"]);
    }

    #[test]
    fn category_only_is_a_union_over_levels() {
        let sel = FilterSelection::default().with_category(Some(Category::Vocab));
        let out = filter(&sheet(), &sel).unwrap();
        assert_eq!(
            cols(&out),
            vec!["LLM", "Size", "Family", "Closed_Open", "A1_VOCAB", "B1_VOCAB"]
        );
    }

    #[test]
    fn unmatched_selection_shows_identity_columns_only() {
        let sel = FilterSelection::default()
            .with_level(Some(Level::B2))
            .with_category(Some(Category::Lc));
        let out = filter(&sheet(), &sel).unwrap();
        assert_eq!(cols(&out), IDENTITY_COLUMNS.to_vec());
        // no total column selected, so the threshold does not apply
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn substring_matching_picks_up_embedded_level_names() {
        let csv = "LLM,Size,Family,Closed_Open,vocaB1ulary,B1_total\nx,7,GPT,Open,0.5,0.5\n";
        let t = parse_csv(csv.as_bytes(), ScoreScale::Fraction).unwrap();
        let loose = FilterSelection::default().with_level(Some(Level::B1));
        assert!(select_columns(&t, &loose).contains(&"vocaB1ulary".to_string()));

        let strict = loose.with_matching(ColumnMatching::Token);
        assert!(!select_columns(&t, &strict).contains(&"vocaB1ulary".to_string()));
        assert!(select_columns(&t, &strict).contains(&"B1_total".to_string()));
    }

    #[test]
    fn openness_filter() {
        let sel = FilterSelection::default().with_openness(Openness::Closed);
        let out = filter(&sheet(), &sel).unwrap();
        assert_eq!(names(&out), vec!["GPT-4o"]);
    }

    #[test]
    fn family_filter_is_exact() {
        let sel = FilterSelection::default().with_family(Some("Llama".into()));
        let out = filter(&sheet(), &sel).unwrap();
        assert_eq!(names(&out), vec!["Llama-3-70B", "Llama-3-8B"]);
        let fam = out.column_index("Family").unwrap();
        assert!(out
            .rows()
            .iter()
            .all(|r| r[fam] == CellValue::Text("Llama".into())));

        let partial = FilterSelection::default().with_family(Some("Llam".into()));
        assert!(filter(&sheet(), &partial).unwrap().is_empty());
    }

    #[test]
    fn size_range_is_boundary_inclusive() {
        let sel = FilterSelection::default().with_size(SizeRange::new(7.0, 70.0));
        let out = filter(&sheet(), &sel).unwrap();
        assert_eq!(names(&out), vec!["Llama-3-70B", "Llama-3-8B", "Mistral-7B"]);
    }

    #[test]
    fn rows_without_size_never_match_a_range() {
        let csv = "LLM,Size,Family,Closed_Open\nsecret,,GPT,Closed\nopen,7,Llama,Open\n";
        let t = parse_csv(csv.as_bytes(), ScoreScale::Fraction).unwrap();
        let out = filter(&t, &FilterSelection::default()).unwrap();
        assert_eq!(names(&out), vec!["open"]);
    }

    #[test]
    fn any_total_column_can_satisfy_the_threshold() {
        let csv = "LLM,Size,Family,Closed_Open,A1_total,B1_total\nm,7,Llama,Open,0.9,0.3\n";
        let t = parse_csv(csv.as_bytes(), ScoreScale::Fraction).unwrap();

        let kept = filter(&t, &FilterSelection::default().with_min_performance(0.5)).unwrap();
        assert_eq!(kept.len(), 1);

        let dropped = filter(&t, &FilterSelection::default().with_min_performance(0.95)).unwrap();
        assert!(dropped.is_empty());
    }

    #[test]
    fn threshold_only_considers_selected_totals() {
        // A1_total is 0.9 for the first model but only B1 columns are selected.
        let sel = FilterSelection::default()
            .with_level(Some(Level::B1))
            .with_min_performance(0.5);
        let out = filter(&sheet(), &sel).unwrap();
        assert_eq!(names(&out), vec!["GPT-4o"]);
    }

    #[test]
    fn percent_scale_threshold() {
        let t = parse_csv(SHEET.as_bytes(), ScoreScale::Percent).unwrap();
        let sel = FilterSelection::default()
            .with_min_performance(ScoreScale::Percent.threshold_at(7));
        let out = filter(&t, &sel).unwrap();
        assert_eq!(names(&out), vec!["Llama-3-70B", "Llama-3-8B", "GPT-4o"]);
    }

    #[test]
    fn filtering_is_idempotent_and_pure() {
        let t = sheet();
        let before = t.clone();
        let sel = FilterSelection::default()
            .with_openness(Openness::Open)
            .with_category(Some(Category::Total))
            .with_min_performance(0.5);
        let a = filter(&t, &sel).unwrap();
        let b = filter(&t, &sel).unwrap();
        assert_eq!(a, b);
        assert_eq!(t, before);
    }

    fn arb_selection() -> impl Strategy<Value = FilterSelection> {
        (
            prop::sample::select(Openness::OPTIONS.to_vec()),
            prop::option::of(prop::sample::select(Level::ALL.to_vec())),
            prop::option::of(prop::sample::select(Category::ALL.to_vec())),
            prop::option::of(prop::sample::select(vec!["Llama", "GPT", "Phi", "Qwen"])),
            0.0f64..300.0,
            0.0f64..300.0,
            0u32..=10,
        )
            .prop_map(|(open, level, cat, fam, a, b, step)| {
                FilterSelection::default()
                    .with_openness(open)
                    .with_level(level)
                    .with_category(cat)
                    .with_family(fam.map(str::to_string))
                    .with_size(SizeRange::new(a.min(b), a.max(b)))
                    .with_min_performance(ScoreScale::Fraction.threshold_at(step))
            })
    }

    proptest! {
        #[test]
        fn filtered_table_never_grows(sel in arb_selection()) {
            let t = sheet();
            let out = filter(&t, &sel).unwrap();
            prop_assert!(out.len() <= t.len());
            let head: Vec<&str> = out.column_names().take(4).collect();
            prop_assert_eq!(head, IDENTITY_COLUMNS.to_vec());
        }

        #[test]
        fn output_rows_respect_size_and_family(sel in arb_selection()) {
            let out = filter(&sheet(), &sel).unwrap();
            let size = out.column_index("Size").unwrap();
            let fam = out.column_index("Family").unwrap();
            for row in out.rows() {
                let s = row[size].as_f64().unwrap();
                prop_assert!(sel.size().min <= s && s <= sel.size().max);
                if let Some(f) = sel.family() {
                    prop_assert_eq!(row[fam].as_str(), Some(f));
                }
            }
        }
    }
}
