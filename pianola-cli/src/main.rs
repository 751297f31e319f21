//! pianola CLI
//!
//! Two independent batch stages: `harvest` pulls release-group metadata
//! from MusicBrainz into a raw CSV table, `classify` refines genre labels
//! over that table and aggregates counts by decade.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use pianola_harvest::{HarvestEvent, HarvestOptions, Identity, MbClient};

#[derive(Parser)]
#[command(name = "pianola")]
#[command(about = "Harvest and classify MusicBrainz release-group metadata", long_about = None)]
struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest release-group metadata from MusicBrainz into a raw table
    Harvest {
        /// Directory for output artifacts (created if absent)
        #[arg(short, long, default_value = "data")]
        out_dir: PathBuf,

        /// Maximum number of release-groups to fetch
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Classify the raw table and aggregate counts by decade and genre
    Classify {
        /// Raw table produced by the harvest stage
        #[arg(short, long, default_value = "data/us_classical_raw.csv")]
        input: PathBuf,

        /// Directory for output artifacts (created if absent)
        #[arg(short, long, default_value = "data")]
        out_dir: PathBuf,
    },

    /// Save a MusicBrainz identity to the config file
    Configure {
        /// Contact address (email or URL) sent in the User-Agent header
        #[arg(long)]
        contact: String,

        /// Application name override
        #[arg(long)]
        app: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let code = match cli.command {
        Commands::Harvest { out_dir, limit } => run_harvest(out_dir, limit, cli.quiet),
        Commands::Classify { input, out_dir } => run_classify(&input, &out_dir),
        Commands::Configure { contact, app } => run_configure(contact, app),
    };
    std::process::exit(code);
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if !verbose {
        builder.format_timestamp(None);
        builder.format_target(false);
    }
    builder.init();
}

// env_logger writes to stderr, so color detection keys off that stream.
fn check_mark() -> impl std::fmt::Display {
    "\u{2714}".if_supports_color(Stderr, |t| t.green())
}

fn cross_mark() -> impl std::fmt::Display {
    "\u{2718}".if_supports_color(Stderr, |t| t.red())
}

fn run_harvest(out_dir: PathBuf, limit: Option<u32>, quiet: bool) -> i32 {
    let identity = match Identity::load() {
        Ok(identity) => identity,
        Err(e) => {
            eprintln!("{} {}", cross_mark(), e);
            eprintln!();
            eprintln!("Set an identity via environment variables:");
            eprintln!("  PIANOLA_CONTACT (required), PIANOLA_APP (optional)");
            if let Some(path) = pianola_harvest::config_path() {
                eprintln!("Or run `pianola configure --contact <email>`");
                eprintln!("  (writes {})", path.display());
            }
            return 1;
        }
    };

    let mut options = HarvestOptions::new(out_dir);
    if let Some(limit) = limit {
        options.max_total = limit;
    }

    let client = match MbClient::new(&identity) {
        Ok(client) => client,
        Err(e) => {
            log::error!("{} Failed to create HTTP client: {}", cross_mark(), e);
            return 1;
        }
    };

    log::info!(
        "Harvesting as \"{}\" into {}",
        identity.user_agent(),
        options.out_dir.display(),
    );

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("{} Failed to create tokio runtime: {}", cross_mark(), e);
            return 1;
        }
    };

    rt.block_on(async {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                    .expect("static pattern")
                    .tick_chars("/-\\|"),
            );
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            pb
        };

        let mut on_event = |event: HarvestEvent| match event {
            HarvestEvent::SearchStarted => {
                pb.set_message("Searching release-groups...");
            }
            HarvestEvent::PageFetched { total, .. } => {
                pb.set_message(format!("Searching release-groups... {total} found"));
            }
            HarvestEvent::SearchComplete { total } => {
                pb.set_message(format!("Processing {total} release-groups..."));
            }
            HarvestEvent::GroupProcessed { index, total, .. }
            | HarvestEvent::GroupSkipped { index, total, .. } => {
                pb.set_message(format!("Processing release-group {index}/{total}"));
            }
            HarvestEvent::CheckpointWritten {
                groups_processed,
                rows,
            } => {
                pb.set_message(format!(
                    "Checkpoint after {groups_processed} groups ({rows} rows)"
                ));
            }
            HarvestEvent::Done => {}
        };

        let result = pianola_harvest::run_harvest(&client, &options, &mut on_event).await;
        pb.finish_and_clear();

        match result {
            Ok(result) => {
                let summary = result.log.summary();
                log::info!(
                    "{} Harvest complete: {} rows from {} groups ({} empty, {} skipped)",
                    check_mark(),
                    result.rows.len(),
                    summary.groups_harvested,
                    summary.groups_empty,
                    summary.groups_skipped,
                );
                log::info!(
                    "  Raw table: {}",
                    pianola_harvest::harvest::raw_table_path(&options.out_dir).display(),
                );
                0
            }
            Err(e) => {
                log::error!("{} Harvest failed: {}", cross_mark(), e);
                1
            }
        }
    })
}

fn run_configure(contact: String, app: Option<String>) -> i32 {
    let identity = Identity {
        app: app.unwrap_or_else(|| format!("pianola/{}", env!("CARGO_PKG_VERSION"))),
        contact,
    };
    match pianola_harvest::save_to_file(&identity) {
        Ok(path) => {
            log::info!("{} Saved identity to {}", check_mark(), path.display());
            0
        }
        Err(e) => {
            log::error!("{} Failed to save identity: {}", cross_mark(), e);
            1
        }
    }
}

fn run_classify(input: &Path, out_dir: &Path) -> i32 {
    match pianola_classify::run_classify(input, out_dir) {
        Ok(result) => {
            log::info!(
                "{} Classified {} rows ({} duplicates removed, {} without year dropped)",
                check_mark(),
                result.rows.len(),
                result.duplicate_rows,
                result.rows_without_year,
            );
            log::info!(
                "  Refined table: {}",
                pianola_classify::pipeline::refined_table_path(out_dir).display(),
            );
            0
        }
        Err(e) => {
            log::error!("{} Classification failed: {}", cross_mark(), e);
            1
        }
    }
}
