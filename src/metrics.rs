// Run metrics
//
// Counts what a single run did so it can be summarised in the log

use std::time::{Duration, Instant};

/// Per-run counters
#[derive(Debug)]
pub struct Metrics {
    /// Entries read from the previous game list
    pub old_entries: usize,

    /// Candidates found on disk before reconciliation
    pub discovered: usize,

    /// Candidates dropped because they were already listed
    pub already_listed: usize,

    /// Entries built for candidates that were not listed before
    pub new_entries: usize,

    /// `<game>` elements written
    pub games: usize,

    /// `<folder>` elements written
    pub folders: usize,

    start_time: Instant,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            old_entries: 0,
            discovered: 0,
            already_listed: 0,
            new_entries: 0,
            games: 0,
            folders: 0,
            start_time: Instant::now(),
        }
    }

    /// Record the queue size on both sides of reconciliation
    pub fn record_reconcile(&mut self, queue_before: usize, queue_after: usize) {
        self.discovered = queue_before;
        self.already_listed = queue_before.saturating_sub(queue_after);
    }

    /// Record what the assembled document contains
    pub fn record_document(&mut self, games: usize, folders: usize) {
        self.games = games;
        self.folders = folders;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Entries written in total
    pub fn total_written(&self) -> usize {
        self.games + self.folders
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Game List Summary ===");
        tracing::info!("Elapsed: {:.2}s", self.elapsed().as_secs_f64());
        tracing::info!(
            "Previous list: {} entries; on disk: {} candidates, {} already listed",
            self.old_entries,
            self.discovered,
            self.already_listed
        );
        tracing::info!(
            "Written: {} entries ({} games, {} folders), {} new",
            self.total_written(),
            self.games,
            self.folders,
            self.new_entries
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
