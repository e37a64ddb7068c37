//! Statistics collected by the two stages
//!
//! Both loops accumulate simple counters and print them when the run ends.
//! Failures are visible here and in the log; they never change the exit code.

/// Counters for one stage one crawl run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Detail pages fetched (or attempted)
    pub pages_fetched: u64,

    /// Records successfully extracted
    pub records_collected: u64,

    /// Pages skipped due to fetch or parse failure
    pub records_skipped: u64,
}

/// Counters for one stage two batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadStats {
    /// Files fetched and written
    pub completed: u64,

    /// Tasks skipped because the destination already existed
    pub skipped: u64,

    /// Tasks that failed permanently or exhausted retries
    pub failed: u64,
}

impl DownloadStats {
    /// Total number of tasks accounted for
    pub fn total(&self) -> u64 {
        self.completed + self.skipped + self.failed
    }
}

/// Prints a stage one summary to stdout
pub fn print_crawl_stats(stats: &CrawlStats) {
    println!("=== Crawl Summary ===");
    println!("  Detail pages visited: {}", stats.pages_fetched);
    println!("  Records collected:    {}", stats.records_collected);
    println!("  Records skipped:      {}", stats.records_skipped);
}

/// Prints a stage two summary to stdout
pub fn print_download_stats(stats: &DownloadStats) {
    println!("=== Download Summary ===");
    println!("  Completed: {}", stats.completed);
    println!("  Skipped:   {}", stats.skipped);
    println!("  Failed:    {}", stats.failed);
    println!("  Total:     {}", stats.total());
}
