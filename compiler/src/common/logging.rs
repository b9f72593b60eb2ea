//! Logging Setup
//!
//! Installs the tracing subscriber for the process. `RUST_LOG`
//! wins when set; otherwise `-v` turns on debug output for this
//! crate and the default is warnings only.
//!

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// ------------------------------------------------------------- Public Functions

/// Initializes logging to stderr so stdout stays clean for
/// compiled output.
///
pub fn init(verbose: bool) {
    let fallback = if verbose { "markup=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
