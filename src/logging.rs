//! Logging setup shared by both binaries

use tracing_subscriber::EnvFilter;

/// Sets up the tracing subscriber based on verbosity level
pub fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("dataset_harvest=info,warn"),
            1 => EnvFilter::new("dataset_harvest=debug,info"),
            2 => EnvFilter::new("dataset_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
