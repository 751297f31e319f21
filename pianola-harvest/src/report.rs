use std::path::Path;

/// A single per-group entry in the harvest log.
#[derive(Debug, Clone)]
pub enum LogEntry {
    /// Group contributed one or more qualifying rows.
    Harvested {
        rg_id: String,
        title: String,
        rows: usize,
    },
    /// Group fetched fine but had no qualifying releases.
    Empty { rg_id: String, title: String },
    /// Release fetch failed after retries; group skipped, run continued.
    Skipped {
        rg_id: String,
        title: String,
        message: String,
    },
}

/// Collects per-group outcomes and writes a summary log file.
#[derive(Debug, Default)]
pub struct HarvestLog {
    entries: Vec<LogEntry>,
}

#[derive(Debug, Default)]
pub struct LogSummary {
    pub groups_harvested: usize,
    pub groups_empty: usize,
    pub groups_skipped: usize,
    pub rows: usize,
}

impl HarvestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn summary(&self) -> LogSummary {
        let mut summary = LogSummary::default();
        for entry in &self.entries {
            match entry {
                LogEntry::Harvested { rows, .. } => {
                    summary.groups_harvested += 1;
                    summary.rows += rows;
                }
                LogEntry::Empty { .. } => summary.groups_empty += 1,
                LogEntry::Skipped { .. } => summary.groups_skipped += 1,
            }
        }
        summary
    }

    /// Write the log to a file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Harvest Log ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(
            file,
            "Groups with rows: {} ({} rows)",
            summary.groups_harvested, summary.rows
        )?;
        writeln!(file, "Groups with no qualifying releases: {}", summary.groups_empty)?;
        writeln!(file, "Groups skipped on fetch failure: {}", summary.groups_skipped)?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                LogEntry::Harvested { rg_id, title, rows } => {
                    writeln!(file, "[OK] {} \"{}\" ({} rows)", rg_id, title, rows)?;
                }
                LogEntry::Empty { rg_id, title } => {
                    writeln!(file, "[EMPTY] {} \"{}\"", rg_id, title)?;
                }
                LogEntry::Skipped {
                    rg_id,
                    title,
                    message,
                } => {
                    writeln!(file, "[SKIPPED] {} \"{}\": {}", rg_id, title, message)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut log = HarvestLog::new();
        log.add(LogEntry::Harvested {
            rg_id: "a".to_string(),
            title: "A".to_string(),
            rows: 3,
        });
        log.add(LogEntry::Harvested {
            rg_id: "b".to_string(),
            title: "B".to_string(),
            rows: 1,
        });
        log.add(LogEntry::Empty {
            rg_id: "c".to_string(),
            title: "C".to_string(),
        });
        log.add(LogEntry::Skipped {
            rg_id: "d".to_string(),
            title: "D".to_string(),
            message: "HTTP 503".to_string(),
        });

        let summary = log.summary();
        assert_eq!(summary.groups_harvested, 2);
        assert_eq!(summary.rows, 4);
        assert_eq!(summary.groups_empty, 1);
        assert_eq!(summary.groups_skipped, 1);
    }
}
