// src/logging.rs
//! 日志初始化

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the global subscriber once. `RUST_LOG` wins over the
/// configured filter.
pub fn setup_logger(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();

        if installed.is_ok() {
            tracing::debug!(filter = default_filter, "logger initialised");
        }
    });
}
