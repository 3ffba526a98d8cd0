//! Logging setup for hosts embedding the orchestration units.

use tracing::Subscriber;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Build a subscriber writing to stderr. `RUST_LOG` takes precedence over
/// the provided filter.
pub fn get_subscriber(env_filter: String) -> impl Subscriber + Sync + Send {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env_filter));
    let stderr = fmt::Layer::new()
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_target(true);
    Registry::default().with(env_filter).with(stderr)
}

/// Register a subscriber as the global default, bridging `log` records.
///
/// Fails if a subscriber was already installed.
pub fn init_subscriber(
    subscriber: impl Subscriber + Sync + Send,
) -> Result<(), SetGlobalDefaultError> {
    // a logger may already be set by the host; tracing events still flow
    let _ = LogTracer::init();
    tracing::subscriber::set_global_default(subscriber)
}

/// Initialize logging with the configured filter.
pub fn init_logging(config: &crate::Config) {
    match init_subscriber(get_subscriber(config.log_filter.clone())) {
        Ok(()) => tracing::info!("Initialized logs"),
        Err(e) => tracing::warn!("Logging was already initialized: {e}"),
    }
}
