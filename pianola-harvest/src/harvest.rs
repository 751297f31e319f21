//! The harvest stage: paginated release-group search, per-group release
//! fetch, region/year filtering, coarse genre tagging, and periodic
//! checkpointing of the accumulated row set.

use std::path::{Path, PathBuf};

use pianola_core::{CoarseGenre, FlatRow, count_by_decade_genre, decade_of, write_rows, year_from_date};

use crate::client::MbClient;
use crate::error::HarvestError;
use crate::report::{HarvestLog, LogEntry};
use crate::types::{Release, ReleaseGroup, ReleaseGroupLookup, SearchResponse};

/// Fixed search query for US classical piano/orchestra albums.
pub const DEFAULT_QUERY: &str = "primarytype:album \
    AND (tag:piano OR tag:orchestra OR piano OR orchestra) \
    AND (tag:classical OR classical) \
    AND firstreleasedate:[1900-01-01 TO 2020-12-31]";

/// Raw harvested table, written only when the run completes.
pub const RAW_FILE: &str = "us_classical_raw.csv";
/// Durable partial snapshot, overwritten wholesale at each interval.
pub const CHECKPOINT_FILE: &str = "us_classical_raw.checkpoint.csv";
/// Coarse (decade, genre) counts for the Piano/Orchestra labels.
pub const COARSE_COUNTS_FILE: &str = "us_classical_counts_by_decade.csv";
/// Human-readable per-group outcome log.
pub const LOG_FILE: &str = "harvest_log.txt";

/// Options for a harvest run.
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    /// Lucene query sent to the release-group search endpoint.
    pub query: String,
    /// Results per search page.
    pub page_size: u32,
    /// Hard cap on release-groups fetched across all pages.
    pub max_total: u32,
    /// Target region; a release qualifies only with this country code.
    pub region: String,
    /// Inclusive year bound; releases with unknown years also qualify.
    pub min_year: i32,
    pub max_year: i32,
    /// Checkpoint the accumulated rows every this many processed groups.
    pub checkpoint_interval: usize,
    /// Directory for output artifacts, created if absent.
    pub out_dir: PathBuf,
}

impl HarvestOptions {
    /// Default pipeline constants for an output directory.
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            page_size: 100,
            max_total: 500,
            region: "US".to_string(),
            min_year: 1900,
            max_year: 2020,
            checkpoint_interval: 200,
            out_dir,
        }
    }
}

/// Progress events emitted during a harvest, consumed by the CLI.
#[derive(Debug, Clone)]
pub enum HarvestEvent {
    /// Searching release-groups.
    SearchStarted,
    /// One search page fetched.
    PageFetched { fetched: usize, total: usize },
    /// Search complete, total groups to process.
    SearchComplete { total: usize },
    /// A group was processed (possibly contributing zero rows).
    GroupProcessed {
        index: usize,
        total: usize,
        rows: usize,
    },
    /// A group's release fetch failed; the run continues without it.
    GroupSkipped {
        index: usize,
        total: usize,
        reason: String,
    },
    /// A checkpoint snapshot was written.
    CheckpointWritten {
        groups_processed: usize,
        rows: usize,
    },
    /// All groups processed and final artifacts written.
    Done,
}

/// Result of a completed harvest run.
#[derive(Debug)]
pub struct HarvestResult {
    pub rows: Vec<FlatRow>,
    pub log: HarvestLog,
}

/// Pagination loop states for the search endpoint.
enum PageState {
    Fetching { offset: u32 },
    Done,
}

/// Whether pagination should stop: a short page means the natural end of
/// results, and the hard cap bounds the total regardless.
fn page_done(fetched_this_page: usize, page_size: u32, accumulated: usize, max_total: u32) -> bool {
    fetched_this_page < page_size as usize || accumulated >= max_total as usize
}

/// Whether a checkpoint is due after `processed` groups.
fn checkpoint_due(processed: usize, interval: usize) -> bool {
    interval > 0 && processed > 0 && processed.is_multiple_of(interval)
}

/// Coarse harvest-time genre from the group's own text fields.
fn coarse_genre(rg: &ReleaseGroup) -> CoarseGenre {
    let mut blob = String::new();
    blob.push_str(&rg.title);
    if let Some(ref disambiguation) = rg.disambiguation {
        blob.push(' ');
        blob.push_str(disambiguation);
    }
    for tag in &rg.tags {
        blob.push(' ');
        blob.push_str(&tag.name);
    }
    let blob = blob.to_lowercase();

    if blob.contains("piano") {
        CoarseGenre::Piano
    } else if ["orchestra", "symphony", "philharmonic"]
        .iter()
        .any(|k| blob.contains(k))
    {
        CoarseGenre::Orchestra
    } else {
        CoarseGenre::Unknown
    }
}

/// Whether a release qualifies: country matches the target region, and the
/// derived year is unknown or within bounds.
fn qualifies(release: &Release, options: &HarvestOptions) -> bool {
    if release.country.as_deref() != Some(options.region.as_str()) {
        return false;
    }
    match year_from_date(release.date.as_deref()) {
        Some(year) => options.min_year <= year && year <= options.max_year,
        None => true,
    }
}

/// Build flat rows for one group from its qualifying releases.
fn flat_rows_for_group(
    rg: &ReleaseGroup,
    releases: &[Release],
    options: &HarvestOptions,
) -> Vec<FlatRow> {
    let genre_type = coarse_genre(rg);
    releases
        .iter()
        .filter(|release| qualifies(release, options))
        .map(|release| {
            let year = year_from_date(release.date.as_deref());
            FlatRow {
                rg_id: rg.id.clone(),
                title: rg.title.clone(),
                first_release_date: rg.first_release_date.clone(),
                release_title: release.title.clone(),
                release_date: release.date.clone(),
                release_country: release.country.clone(),
                primary_type: rg.primary_type.clone(),
                disambiguation: rg.disambiguation.clone(),
                genre_type,
                year,
                decade: year.map(decade_of),
            }
        })
        .collect()
}

/// Search release-groups with offset pagination until a short page or the
/// hard cap. A transport failure here aborts the run — partial search
/// results are not usable.
pub async fn search_release_groups(
    client: &MbClient,
    options: &HarvestOptions,
    on_event: &mut dyn FnMut(HarvestEvent),
) -> Result<Vec<ReleaseGroup>, HarvestError> {
    let mut groups: Vec<ReleaseGroup> = Vec::new();
    let mut state = PageState::Fetching { offset: 0 };

    on_event(HarvestEvent::SearchStarted);

    while let PageState::Fetching { offset } = state {
        let params = [
            ("query", options.query.clone()),
            ("fmt", "json".to_string()),
            ("limit", options.page_size.to_string()),
            ("offset", offset.to_string()),
        ];
        let page: SearchResponse = client.get("release-group", &params).await?;
        let fetched = page.release_groups.len();
        groups.extend(page.release_groups);

        log::info!(
            "Fetched {} release-groups (total {}, {} available)",
            fetched,
            groups.len(),
            page.count,
        );
        on_event(HarvestEvent::PageFetched {
            fetched,
            total: groups.len(),
        });

        state = if page_done(fetched, options.page_size, groups.len(), options.max_total) {
            PageState::Done
        } else {
            PageState::Fetching {
                offset: offset + options.page_size,
            }
        };
    }

    groups.truncate(options.max_total as usize);
    on_event(HarvestEvent::SearchComplete {
        total: groups.len(),
    });
    Ok(groups)
}

/// Fetch the nested releases of one release-group.
pub async fn fetch_releases(
    client: &MbClient,
    rg_id: &str,
) -> Result<Vec<Release>, HarvestError> {
    let params = [
        ("fmt", "json".to_string()),
        ("inc", "releases".to_string()),
    ];
    let lookup: ReleaseGroupLookup = client
        .get(&format!("release-group/{rg_id}"), &params)
        .await?;
    Ok(lookup.releases)
}

/// Run the full harvest: search, per-group fetch with partial-failure
/// tolerance, checkpointing, and final artifact writes.
///
/// Final artifacts are written only if the run completes; a crashed run
/// leaves at most the last checkpoint file as durable state.
pub async fn run_harvest(
    client: &MbClient,
    options: &HarvestOptions,
    on_event: &mut dyn FnMut(HarvestEvent),
) -> Result<HarvestResult, HarvestError> {
    std::fs::create_dir_all(&options.out_dir)?;

    let groups = search_release_groups(client, options, on_event).await?;
    let total = groups.len();
    log::info!("Total release-groups fetched: {total}");

    let mut rows: Vec<FlatRow> = Vec::new();
    let mut log = HarvestLog::new();

    for (i, rg) in groups.iter().enumerate() {
        match fetch_releases(client, &rg.id).await {
            Ok(releases) => {
                let group_rows = flat_rows_for_group(rg, &releases, options);
                if group_rows.is_empty() {
                    log.add(LogEntry::Empty {
                        rg_id: rg.id.clone(),
                        title: rg.title.clone(),
                    });
                } else {
                    log.add(LogEntry::Harvested {
                        rg_id: rg.id.clone(),
                        title: rg.title.clone(),
                        rows: group_rows.len(),
                    });
                }
                on_event(HarvestEvent::GroupProcessed {
                    index: i + 1,
                    total,
                    rows: group_rows.len(),
                });
                rows.extend(group_rows);
            }
            Err(e) => {
                // Single-group failure is recoverable: treat as zero
                // releases and keep going.
                log::warn!("Skipping release-group {} ({}): {}", rg.id, rg.title, e);
                log.add(LogEntry::Skipped {
                    rg_id: rg.id.clone(),
                    title: rg.title.clone(),
                    message: e.to_string(),
                });
                on_event(HarvestEvent::GroupSkipped {
                    index: i + 1,
                    total,
                    reason: e.to_string(),
                });
            }
        }

        let processed = i + 1;
        if checkpoint_due(processed, options.checkpoint_interval) {
            write_rows(&options.out_dir.join(CHECKPOINT_FILE), &rows)?;
            log::info!(
                "Checkpoint: {processed}/{total} groups processed, {} rows",
                rows.len(),
            );
            on_event(HarvestEvent::CheckpointWritten {
                groups_processed: processed,
                rows: rows.len(),
            });
        }
    }

    write_rows(&options.out_dir.join(RAW_FILE), &rows)?;

    let counts = count_by_decade_genre(rows.iter().filter_map(|row| {
        let decade = row.decade?;
        match row.genre_type {
            CoarseGenre::Piano | CoarseGenre::Orchestra => {
                Some((decade, row.genre_type.to_string()))
            }
            CoarseGenre::Unknown => None,
        }
    }));
    write_rows(&options.out_dir.join(COARSE_COUNTS_FILE), &counts)?;

    if let Err(e) = log.write_to_file(&options.out_dir.join(LOG_FILE)) {
        log::warn!("Failed to write harvest log: {e}");
    }

    on_event(HarvestEvent::Done);
    Ok(HarvestResult { rows, log })
}

/// Path of the raw table a harvest writes into `out_dir`.
pub fn raw_table_path(out_dir: &Path) -> PathBuf {
    out_dir.join(RAW_FILE)
}

#[cfg(test)]
#[path = "tests/harvest_tests.rs"]
mod tests;
