//! Stage one: the index crawler
//!
//! This module contains the crawl logic:
//! - HTTP fetching with retry (shared with stage two)
//! - Listing page pagination and link extraction
//! - Detail page parsing into dataset records
//! - Overall crawl coordination

mod coordinator;
mod detail;
mod fetcher;
mod listing;

pub use coordinator::{crawl, Coordinator};
pub use detail::parse_detail_page;
pub use fetcher::{
    backoff_delay, build_http_client, fetch_text, is_retryable_error, is_retryable_status,
    FetchFailure,
};
pub use listing::{extract_detail_links, listing_page_url};
