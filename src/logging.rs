//! Console logging setup shared by the binaries

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable overriding the log filter, e.g. `COURSEWORK_LOG=debug`
pub const LOG_ENV_VAR: &str = "COURSEWORK_LOG";

/// Install a stderr subscriber
///
/// The filter comes from `COURSEWORK_LOG` when set, otherwise `debug` for
/// verbose runs and `info` for everything else. Calling this twice is a no-op.
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter_layer = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .with(filter_layer)
        .try_init();
}
