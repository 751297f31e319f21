//! The classification stage: read the raw harvested table, re-derive a
//! refined genre label per row, deduplicate, bucket by decade, and write
//! the refined table plus its aggregate.

use std::path::{Path, PathBuf};

use pianola_core::{
    ClassifiedRow, FlatRow, count_by_decade_genre, decade_of, dedup_by_key, read_rows, write_rows,
    year_from_date,
};

use crate::classify::{Classifier, row_text};
use crate::error::ClassifyError;

/// Refined table, one row per surviving (group, release) pair.
pub const REFINED_FILE: &str = "us_classical_refined_hybrid.csv";
/// Refined (decade, genre) counts.
pub const REFINED_COUNTS_FILE: &str = "us_classical_counts_hybrid_by_decade.csv";

/// Result of a completed classification run.
#[derive(Debug)]
pub struct ClassifyResult {
    pub rows: Vec<ClassifiedRow>,
    pub input_rows: usize,
    pub duplicate_rows: usize,
    pub rows_without_year: usize,
}

/// Classify, deduplicate, and bucket raw rows.
///
/// Mirrors the stage order of the persisted pipeline: label every row,
/// dedup on (rg_id, release_title) with first-wins, then drop rows with
/// no derivable year (they cannot contribute to a decade).
pub fn refine_rows(classifier: &Classifier, raw: Vec<FlatRow>) -> ClassifyResult {
    let input_rows = raw.len();

    let labeled: Vec<(FlatRow, pianola_core::Genre)> = raw
        .into_iter()
        .map(|mut row| {
            // Input tables may lack the derived year; recover it from the
            // release date.
            if row.year.is_none() {
                row.year = year_from_date(row.release_date.as_deref());
            }
            row.decade = row.year.map(decade_of);

            let text = row_text(
                &row.title,
                &row.release_title,
                row.primary_type.as_deref(),
                row.disambiguation.as_deref(),
            );
            let genre = classifier.classify(&text);
            (row, genre)
        })
        .collect();

    let deduped = dedup_by_key(labeled, |(row, _)| {
        (row.rg_id.clone(), row.release_title.clone())
    });
    let duplicate_rows = input_rows - deduped.len();
    log::info!("Dedup: {} -> {}", input_rows, deduped.len());

    let mut rows_without_year = 0usize;
    let rows: Vec<ClassifiedRow> = deduped
        .into_iter()
        .filter_map(|(row, genre_refined)| {
            let Some(year) = row.year else {
                rows_without_year += 1;
                return None;
            };
            Some(ClassifiedRow {
                rg_id: row.rg_id,
                title: row.title,
                first_release_date: row.first_release_date,
                release_title: row.release_title,
                release_date: row.release_date,
                release_country: row.release_country,
                primary_type: row.primary_type,
                disambiguation: row.disambiguation,
                genre_type: row.genre_type,
                year,
                decade: decade_of(year),
                genre_refined,
            })
        })
        .collect();

    ClassifyResult {
        rows,
        input_rows,
        duplicate_rows,
        rows_without_year,
    }
}

/// Run the full classification stage over a raw table on disk.
///
/// Artifacts are written only when the whole stage succeeds.
pub fn run_classify(input: &Path, out_dir: &Path) -> Result<ClassifyResult, ClassifyError> {
    std::fs::create_dir_all(out_dir)?;

    let raw: Vec<FlatRow> = read_rows(input)?;
    let classifier = Classifier::new();
    let result = refine_rows(&classifier, raw);

    let counts = count_by_decade_genre(
        result
            .rows
            .iter()
            .map(|row| (row.decade, row.genre_refined.to_string())),
    );

    write_rows(&out_dir.join(REFINED_FILE), &result.rows)?;
    write_rows(&out_dir.join(REFINED_COUNTS_FILE), &counts)?;

    Ok(result)
}

/// Path of the refined table a classify run writes into `out_dir`.
pub fn refined_table_path(out_dir: &Path) -> PathBuf {
    out_dir.join(REFINED_FILE)
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
