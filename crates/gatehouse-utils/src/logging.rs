//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with the default filter
///
/// Honors `RUST_LOG` when set; falls back to `info` otherwise.
pub fn init_tracing() {
    init_tracing_with("info");
}

/// Initialize tracing with an explicit fallback filter directive
pub fn init_tracing_with(fallback: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
