//! CSV table I/O for row types.
//!
//! All tabular artifacts share the same shape: a header row, one record per
//! line, comma separated, no index column. Row types carry their column
//! names via serde, so reading and writing are generic over the row type.

use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::TableError;

/// Write rows to a writer as CSV with a header row.
pub fn write_rows_to<T: Serialize, W: Write>(writer: W, rows: &[T]) -> Result<(), TableError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows to a CSV file, creating parent directories as needed.
pub fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), TableError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_rows_to(file, rows)
}

/// Read rows from a CSV reader with a header row.
pub fn read_rows_from<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, TableError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Read rows from a CSV file.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, TableError> {
    let file = std::fs::File::open(path)?;
    read_rows_from(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genre::CoarseGenre;
    use crate::row::{AggregateCount, FlatRow};

    fn sample_row() -> FlatRow {
        FlatRow {
            rg_id: "abc-123".to_string(),
            title: "Études".to_string(),
            first_release_date: Some("1932".to_string()),
            release_title: "Études".to_string(),
            release_date: Some("1932-05-01".to_string()),
            release_country: Some("US".to_string()),
            primary_type: Some("Album".to_string()),
            disambiguation: None,
            genre_type: CoarseGenre::Piano,
            year: Some(1932),
            decade: Some(1930),
        }
    }

    #[test]
    fn test_flat_row_round_trip() {
        let rows = vec![sample_row()];
        let mut buf = Vec::new();
        write_rows_to(&mut buf, &rows).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with(
            "rg_id,title,first_release_date,release_title,release_date,\
             release_country,primary_type,disambiguation,genre_type,year,decade"
        ));

        let back: Vec<FlatRow> = read_rows_from(buf.as_slice()).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_missing_optional_fields_read_as_none() {
        let csv = "\
rg_id,title,first_release_date,release_title,release_date,release_country,primary_type,disambiguation,genre_type,year,decade
abc,Title,,Rel,,US,,,Unknown,,
";
        let rows: Vec<FlatRow> = read_rows_from(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].first_release_date, None);
        assert_eq!(rows[0].primary_type, None);
        assert_eq!(rows[0].year, None);
        assert_eq!(rows[0].decade, None);
    }

    #[test]
    fn test_aggregate_header() {
        let agg = vec![AggregateCount {
            decade: 1930,
            genre: "PianoSolo".to_string(),
            album_count: 2,
        }];
        let mut buf = Vec::new();
        write_rows_to(&mut buf, &agg).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "decade,genre,album_count\n1930,PianoSolo,2\n");
    }
}
