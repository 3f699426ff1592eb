use tracing_subscriber::EnvFilter;

use crate::consts::LOG_ENV;

/// Install the stderr subscriber. `--debug` forces debug level; otherwise
/// `TIMESTAMPER_LOG` is honoured and warnings are the default.
pub(crate) fn init(debug: bool, use_color: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .with_target(true)
        .without_time()
        .try_init();
}
