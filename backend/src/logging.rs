use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AppConfig;

/// Install the global tracing subscriber. `RUST_LOG` wins over the configured
/// filter; an invalid filter falls back to `info`. Calling this twice is a no-op.
pub fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if fmt().with_env_filter(filter).with_target(true).try_init().is_ok() {
        tracing::info!("Logging initialised with filter {:?}", config.log_filter);
    }
}
