//! Process-wide logging setup.

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber once per process.
///
/// The filter uses env-filter syntax; a `RUST_LOG` environment variable
/// overrides the configured value.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
