//! Shared pieces of the hookbridge command-line tools.

pub mod rpc;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.  `RUST_LOG` wins over `verbose`.
///
/// Library code logs through the `log` facade; the subscriber's log bridge
/// picks those records up.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
