//! Logging setup
//!
//! Diagnostics go to stderr through `tracing` so that tables and exported
//! plans on stdout can be piped untouched. `RUST_LOG` wins over the
//! configured level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither `RUST_LOG` nor the settings provide one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Build the filter from `RUST_LOG`, falling back to `level`
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global subscriber
///
/// Calling this twice is harmless; the second registration is ignored.
pub fn init_logging(level: &str) {
    let fmt_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(fmt_layer)
        .try_init();
}
