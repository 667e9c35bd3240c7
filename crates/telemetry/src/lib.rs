//! Logging and tracing bootstrap.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bookstand_kernel::settings::LogFormat;

/// Initialize the tracing pipeline for a service binary.
///
/// `RUST_LOG` takes precedence when set; otherwise the default level is
/// `info`, escalated to `debug` by the debug flag. Safe to call once per
/// process; later calls are no-ops.
pub fn init(debug: bool, format: LogFormat) {
    let default_directive = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(filter);

    let initialized = match format {
        LogFormat::Pretty => registry.with(fmt::layer()).try_init().is_ok(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init().is_ok(),
    };

    if initialized && debug {
        tracing::warn!("debug mode enabled");
    }
}
