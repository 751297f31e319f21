pub mod client;
pub mod error;
pub mod harvest;
pub mod identity;
pub mod report;
pub mod types;

pub use client::MbClient;
pub use error::HarvestError;
pub use harvest::{HarvestEvent, HarvestOptions, HarvestResult, run_harvest};
pub use identity::{Identity, config_path, save_to_file};
pub use report::{HarvestLog, LogEntry};
