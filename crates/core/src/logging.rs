//! Tracing bootstrap shared by the binaries.

use tracing_subscriber::EnvFilter;

use crate::error::CoreError;

/// Install the global fmt subscriber. `RUST_LOG` wins over `default_level`.
pub fn init(default_level: &str) -> Result<(), CoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .try_init()
        .map_err(|e| CoreError::Logging(e.to_string()))
}
