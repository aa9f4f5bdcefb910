//! Logging setup for the `contextflow` binary
//!
//! Log lines go to stderr so command output on stdout stays pipeable.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber
///
/// `RUST_LOG` wins over `level` when set. Only the first call in a process
/// has an effect.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if json {
        tracing_subscriber::registry().with(filter).with(layer.json()).try_init().ok();
    } else {
        tracing_subscriber::registry().with(filter).with(layer.compact()).try_init().ok();
    }
}
