//! Configuration module for Dataset-Harvest
//!
//! Both stages share one TOML configuration file describing the remote index,
//! HTTP behavior, and output paths. Every field has a built-in default, so a
//! config file is only needed to override them.
//!
//! # Example
//!
//! ```no_run
//! use dataset_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Crawling index at: {}", config.index.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, IndexConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_or_default, load_config_with_hash};
