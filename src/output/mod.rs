//! Run statistics and end-of-run reporting

mod stats;

pub use stats::{print_crawl_stats, print_download_stats, CrawlStats, DownloadStats};
