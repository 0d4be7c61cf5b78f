//! Tracing setup shared by the binaries.
//!
//! Logs go to stderr so stdout stays reserved for JSON output. `RUST_LOG`
//! overrides the default filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "noderegistry=info,node_registry=info";

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
