//! Serde models for the MusicBrainz WS/2 JSON payloads.
//!
//! Only the fields the harvester consumes are modeled; everything else in
//! the payload is ignored. Arrays that MusicBrainz omits when empty get
//! `#[serde(default)]`.

use serde::Deserialize;

/// Response from the release-group search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Total matches available server-side (unused beyond logging).
    #[serde(default)]
    pub count: u64,
    #[serde(rename = "release-groups", default)]
    pub release_groups: Vec<ReleaseGroup>,
}

/// A release-group from a search result.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseGroup {
    pub id: String,
    pub title: String,
    #[serde(rename = "first-release-date", default)]
    pub first_release_date: Option<String>,
    #[serde(rename = "primary-type", default)]
    pub primary_type: Option<String>,
    #[serde(default)]
    pub disambiguation: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A folksonomy tag on a release-group.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// Response from the release-group lookup endpoint with `inc=releases`.
#[derive(Debug, Deserialize)]
pub struct ReleaseGroupLookup {
    #[serde(default)]
    pub releases: Vec<Release>,
}

/// A single release within a release-group.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}
