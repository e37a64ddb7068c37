//! HTTP fetching with bounded retry
//!
//! Both stages funnel their page requests through here: building the shared
//! client, classifying failures, and retrying transient ones. The retry
//! policy is the same for listing pages, detail pages, and (via the
//! downloader's streaming loop) file downloads:
//!
//! | Condition          | Action                                   |
//! |--------------------|------------------------------------------|
//! | HTTP 4xx           | Immediate permanent failure              |
//! | HTTP 5xx           | Retry up to max-retries, doubling delay  |
//! | Timeout / connect  | Retry up to max-retries, doubling delay  |
//! | Other network      | Immediate permanent failure              |

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::Duration;

/// Why a fetch ultimately failed, after retries were exhausted
#[derive(Debug)]
pub enum FetchFailure {
    /// Server answered with a non-success status
    Status { status: u16 },

    /// Request never produced a usable response (timeout, refused, DNS...)
    Network { error: String },
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::Status { status } => write!(f, "HTTP status {}", status),
            FetchFailure::Network { error } => write!(f, "network error: {}", error),
        }
    }
}

/// Builds the HTTP client shared by all requests of one run
///
/// # Arguments
///
/// * `config` - HTTP behavior configuration
/// * `timeout_secs` - Per-request timeout; pages and downloads use different ones
pub fn build_http_client(config: &HttpConfig, timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Whether a failed attempt is worth retrying
pub fn is_retryable_status(status: u16) -> bool {
    (500..600).contains(&status)
}

/// Whether a transport-level error is worth retrying
pub fn is_retryable_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

/// Delay before the given retry attempt (0-based), doubling each time
pub fn backoff_delay(config: &HttpConfig, attempt: u32) -> Duration {
    Duration::from_millis(config.retry_backoff_ms.saturating_mul(1u64 << attempt.min(10)))
}

/// Fetches a URL and returns the response body as text, retrying transient failures
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `config` - Retry policy configuration
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - Response body of a 2xx response
/// * `Err(FetchFailure)` - Permanent failure, or retries exhausted
pub async fn fetch_text(
    client: &Client,
    config: &HttpConfig,
    url: &str,
) -> Result<String, FetchFailure> {
    let mut last_failure = FetchFailure::Network {
        error: "no attempt made".to_string(),
    };

    for attempt in 0..config.max_retries {
        if attempt > 0 {
            let delay = backoff_delay(config, attempt - 1);
            tracing::debug!("Retrying {} (attempt {}) after {:?}", url, attempt + 1, delay);
            tokio::time::sleep(delay).await;
        }

        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    return response.text().await.map_err(|e| FetchFailure::Network {
                        error: e.to_string(),
                    });
                }

                last_failure = FetchFailure::Status {
                    status: status.as_u16(),
                };
                if !is_retryable_status(status.as_u16()) {
                    return Err(last_failure);
                }
            }
            Err(e) => {
                let retryable = is_retryable_error(&e);
                last_failure = FetchFailure::Network {
                    error: e.to_string(),
                };
                if !retryable {
                    return Err(last_failure);
                }
            }
        }
    }

    Err(last_failure)
}
