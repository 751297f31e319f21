use std::collections::BTreeMap;
use std::collections::HashSet;
use std::hash::Hash;

use crate::row::AggregateCount;

/// Deduplicate on an arbitrary key: the first occurrence wins and input
/// order is preserved.
pub fn dedup_by_key<T, K, F>(rows: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen: HashSet<K> = HashSet::new();
    rows.into_iter().filter(|row| seen.insert(key(row))).collect()
}

/// Count rows per (decade, genre label).
///
/// Output is sorted ascending by decade, then lexicographically by genre —
/// the BTreeMap key order is exactly that sort.
pub fn count_by_decade_genre(
    pairs: impl IntoIterator<Item = (i32, String)>,
) -> Vec<AggregateCount> {
    let mut counts: BTreeMap<(i32, String), u64> = BTreeMap::new();
    for (decade, genre) in pairs {
        *counts.entry((decade, genre)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((decade, genre), album_count)| AggregateCount {
            decade,
            genre,
            album_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genre::{CoarseGenre, Genre};
    use crate::row::ClassifiedRow;

    fn row(rg_id: &str, release_title: &str, year: i32, genre: Genre) -> ClassifiedRow {
        ClassifiedRow {
            rg_id: rg_id.to_string(),
            title: "Title".to_string(),
            first_release_date: None,
            release_title: release_title.to_string(),
            release_date: None,
            release_country: Some("US".to_string()),
            primary_type: Some("Album".to_string()),
            disambiguation: None,
            genre_type: CoarseGenre::Unknown,
            year,
            decade: crate::date::decade_of(year),
            genre_refined: genre,
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut first = row("a", "Etudes", 1932, Genre::PianoSolo);
        first.title = "first".to_string();
        let mut dup = row("a", "Etudes", 1933, Genre::Orchestra);
        dup.title = "second".to_string();
        let other = row("b", "Etudes", 1932, Genre::PianoSolo);

        let out = dedup_by_key(vec![first.clone(), dup, other.clone()], |r| {
            (r.rg_id.clone(), r.release_title.clone())
        });
        assert_eq!(out, vec![first, other]);
    }

    #[test]
    fn test_dedup_distinguishes_release_titles() {
        let a = row("a", "Etudes", 1932, Genre::PianoSolo);
        let b = row("a", "Etudes (reissue)", 1960, Genre::PianoSolo);
        let out = dedup_by_key(vec![a.clone(), b.clone()], |r| {
            (r.rg_id.clone(), r.release_title.clone())
        });
        assert_eq!(out, vec![a, b]);
    }

    #[test]
    fn test_counts_sorted_by_decade_then_genre() {
        let pairs = vec![
            (1930, "PianoSolo".to_string()),
            (1930, "Orchestra".to_string()),
            (1930, "PianoSolo".to_string()),
        ];
        let agg = count_by_decade_genre(pairs);
        assert_eq!(
            agg,
            vec![
                AggregateCount {
                    decade: 1930,
                    genre: "Orchestra".to_string(),
                    album_count: 1,
                },
                AggregateCount {
                    decade: 1930,
                    genre: "PianoSolo".to_string(),
                    album_count: 2,
                },
            ]
        );
    }

    #[test]
    fn test_counts_ordered_across_decades() {
        let pairs = vec![
            (1960, "Hybrid".to_string()),
            (1930, "Unknown".to_string()),
            (1960, "Hybrid".to_string()),
            (1940, "Orchestra".to_string()),
        ];
        let agg = count_by_decade_genre(pairs);
        let decades: Vec<i32> = agg.iter().map(|a| a.decade).collect();
        assert_eq!(decades, vec![1930, 1940, 1960]);
        assert_eq!(agg[2].album_count, 2);
    }
}
