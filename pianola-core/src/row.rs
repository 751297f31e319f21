use serde::{Deserialize, Serialize};

use crate::genre::{CoarseGenre, Genre};

/// One row of the raw harvested table: a (release-group, qualifying release)
/// pair with denormalized fields from both.
///
/// Every row satisfies the region filter (`release_country` equals the
/// target region) and the year filter (year within bounds, or unknown).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    /// Release-group MBID, the stable primary key.
    pub rg_id: String,
    /// Release-group title.
    pub title: String,
    /// First release date of the group (ISO-partial, may be missing).
    pub first_release_date: Option<String>,
    /// Title of this specific release.
    pub release_title: String,
    /// Date of this specific release (ISO-partial, may be missing).
    pub release_date: Option<String>,
    /// Country code of this release.
    pub release_country: Option<String>,
    /// Primary type of the group (e.g., "Album").
    pub primary_type: Option<String>,
    /// Disambiguation comment on the group.
    pub disambiguation: Option<String>,
    /// Coarse harvest-time genre guess.
    pub genre_type: CoarseGenre,
    /// Year derived from `release_date`; absent when not derivable.
    #[serde(default)]
    pub year: Option<i32>,
    /// Decade bucket for `year`; absent whenever `year` is.
    #[serde(default)]
    pub decade: Option<i32>,
}

/// A raw row refined by the second-pass classifier. Only rows with a
/// derivable year survive refinement, so `year` and `decade` are plain
/// integers here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRow {
    pub rg_id: String,
    pub title: String,
    pub first_release_date: Option<String>,
    pub release_title: String,
    pub release_date: Option<String>,
    pub release_country: Option<String>,
    pub primary_type: Option<String>,
    pub disambiguation: Option<String>,
    /// Coarse label carried through from the raw table as a cross-check.
    pub genre_type: CoarseGenre,
    pub year: i32,
    pub decade: i32,
    /// Refined label from the keyword classifier.
    pub genre_refined: Genre,
}

/// A (decade, genre) count in an aggregate table. The genre is kept as a
/// string so the same type serves both the coarse and refined taxonomies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCount {
    pub decade: i32,
    pub genre: String,
    pub album_count: u64,
}
