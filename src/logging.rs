//! Tracing setup for applications and tests embedding presenters.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize a stderr subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Presenters log dispatched actions at `trace`, tree changes and
/// cancellations at `debug`. Calling this more than once keeps the first
/// subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
