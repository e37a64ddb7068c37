//! Dataset-Harvest: a two-stage crawler for a public dataset index
//!
//! Stage one (`harvest-crawl`) walks the paginated dataset listing, visits each
//! dataset's detail page, and writes one CSV row of metadata per dataset.
//! Stage two (`harvest-fetch`) reads that CSV back and downloads every
//! referenced file into a per-dataset directory tree.

pub mod config;
pub mod crawler;
pub mod downloader;
pub mod logging;
pub mod output;
pub mod record;
pub mod sanitize;
pub mod table;

use thiserror::Error;

/// Main error type for Dataset-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Metadata table error: {0}")]
    Table(#[from] TableError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors reading or writing the metadata CSV table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata file is empty (missing header row)")]
    MissingHeader,

    #[error("Missing required column '{0}' in header row")]
    MissingColumn(String),

    #[error("Row {line} is malformed: {message}")]
    MalformedRow { line: usize, message: String },
}

/// Result type alias for Dataset-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use record::DatasetRecord;
pub use sanitize::sanitize_name;
