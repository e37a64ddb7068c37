//! Crawl coordination - the stage one main loop
//!
//! Walks the paginated listing to collect detail-page links, then visits each
//! detail page and parses it into a record. One failed page never aborts the
//! crawl: it is logged with its URL and counted as skipped.

use crate::config::Config;
use crate::crawler::detail::parse_detail_page;
use crate::crawler::fetcher::{build_http_client, fetch_text};
use crate::crawler::listing::{extract_detail_links, listing_page_url};
use crate::output::CrawlStats;
use crate::record::DatasetRecord;
use crate::Result;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Stage one coordinator: owns the HTTP client and crawl configuration
pub struct Coordinator {
    config: Config,
    client: Client,
    base_url: Url,
}

impl Coordinator {
    /// Creates a coordinator for one crawl run
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.http, config.http.request_timeout_secs)?;
        let base_url = Url::parse(&config.index.base_url)?;
        Ok(Self {
            config,
            client,
            base_url,
        })
    }

    /// Walks the paginated listing and returns all detail-page links
    ///
    /// Pagination ends when a page yields fewer links than the page size. A
    /// listing page that fails to fetch ends pagination early with whatever
    /// links were collected so far, rather than failing the run.
    pub async fn collect_detail_links(&self) -> Result<Vec<String>> {
        let mut links: Vec<String> = Vec::new();
        let mut skip = 0u32;
        let take = self.config.index.page_size;

        loop {
            let page_url = listing_page_url(&self.config.index, skip)?;
            tracing::info!("Fetching listing page: skip={}", skip);

            let body = match fetch_text(&self.client, &self.config.http, page_url.as_str()).await {
                Ok(body) => body,
                Err(failure) => {
                    tracing::warn!(
                        "Listing page at skip={} failed ({}), stopping pagination",
                        skip,
                        failure
                    );
                    break;
                }
            };

            let page_links = extract_detail_links(&body, &self.base_url);
            let page_count = page_links.len();

            for link in page_links {
                if !links.contains(&link) {
                    links.push(link);
                }
            }

            // A short page is the last page
            if page_count == 0 || (page_count as u32) < take {
                break;
            }

            skip += take;
            self.politeness_pause().await;
        }

        tracing::info!("Found {} unique dataset links", links.len());
        Ok(links)
    }

    /// Visits every detail page and parses it into a record
    pub async fn crawl_details(&self, links: &[String]) -> (Vec<DatasetRecord>, CrawlStats) {
        let mut records = Vec::new();
        let mut stats = CrawlStats::default();
        let total = links.len();

        for (i, link) in links.iter().enumerate() {
            tracing::info!("[{}/{}] Scraping: {}", i + 1, total, link);
            stats.pages_fetched += 1;

            let body = match fetch_text(&self.client, &self.config.http, link).await {
                Ok(body) => body,
                Err(failure) => {
                    tracing::warn!("Skipping {}: {}", link, failure);
                    stats.records_skipped += 1;
                    self.politeness_pause().await;
                    continue;
                }
            };

            match parse_detail_page(&body, link, &self.base_url) {
                Ok(record) => {
                    tracing::debug!("Extracted '{}'", record.name);
                    records.push(record);
                    stats.records_collected += 1;
                }
                Err(message) => {
                    tracing::warn!("Skipping {}: {}", link, message);
                    stats.records_skipped += 1;
                }
            }

            self.politeness_pause().await;
        }

        (records, stats)
    }

    /// Runs the full crawl: listing walk, then detail pages
    pub async fn run(&self) -> Result<(Vec<DatasetRecord>, CrawlStats)> {
        let links = self.collect_detail_links().await?;

        if links.is_empty() {
            tracing::warn!("No dataset links found, nothing to crawl");
            return Ok((Vec::new(), CrawlStats::default()));
        }

        Ok(self.crawl_details(&links).await)
    }

    async fn politeness_pause(&self) {
        let delay = self.config.http.politeness_delay_ms;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

/// Runs a complete stage one crawl with the given configuration
///
/// # Returns
///
/// * `Ok((records, stats))` - The collected records and run statistics
/// * `Err(HarvestError)` - Startup failure (bad base URL, client build)
pub async fn crawl(config: Config) -> Result<(Vec<DatasetRecord>, CrawlStats)> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
