use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Installs the global structured-logging subscriber.
///
/// `RUST_LOG` in the environment wins; otherwise the crate logs at the level
/// configured in `Config::rust_log`. If the embedder already installed a
/// subscriber, that one stays in place and this call logs a warning through it.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.rust_log)));

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
    {
        warn!("Tracing subscriber not installed: {e}");
    }
}

fn default_directive(level: &str) -> String {
    format!("{}={}", env!("CARGO_PKG_NAME"), level)
}
