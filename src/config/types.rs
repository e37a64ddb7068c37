use serde::Deserialize;

/// Main configuration structure for Dataset-Harvest
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Remote index description: where the listing lives and how it paginates
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Base URL of the dataset index site
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Path of the paginated listing page, relative to the base URL
    #[serde(rename = "listing-path", default = "default_listing_path")]
    pub listing_path: String,

    /// Number of dataset summaries requested per listing page (`take`)
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u32,

    /// Fixed query string appended to every listing request (sort order etc.)
    #[serde(rename = "listing-query", default = "default_listing_query")]
    pub listing_query: String,
}

/// HTTP client behavior shared by both stages
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for page fetches, in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Timeout for file downloads, in seconds (files are larger than pages)
    #[serde(rename = "download-timeout-secs", default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// Maximum attempts per request (1 = no retry)
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retry attempts, in milliseconds (doubles per attempt)
    #[serde(rename = "retry-backoff-ms", default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,

    /// Delay between consecutive requests, in milliseconds
    #[serde(rename = "politeness-delay-ms", default = "default_politeness_delay")]
    pub politeness_delay_ms: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Path of the metadata CSV written by stage one
    #[serde(rename = "metadata-path", default = "default_metadata_path")]
    pub metadata_path: String,
}

// Defaults mirror the index site this crawler was written against.

fn default_base_url() -> String {
    "https://archive.ics.uci.edu".to_string()
}

fn default_listing_path() -> String {
    "/datasets".to_string()
}

fn default_page_size() -> u32 {
    20
}

fn default_listing_query() -> String {
    "sort=desc&view=list&orderBy=NumHits&search=".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_request_timeout() -> u64 {
    20
}

fn default_download_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff() -> u64 {
    1000
}

fn default_politeness_delay() -> u64 {
    300
}

fn default_metadata_path() -> String {
    "./data/datasets_metadata.csv".to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            listing_path: default_listing_path(),
            page_size: default_page_size(),
            listing_query: default_listing_query(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
            download_timeout_secs: default_download_timeout(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff(),
            politeness_delay_ms: default_politeness_delay(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            metadata_path: default_metadata_path(),
        }
    }
}
