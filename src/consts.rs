pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides the config file search with one explicit path
pub(crate) const CONFIG_ENV: &str = "TIMESTAMPER_CONFIG";

/// `tracing` filter directives, e.g. `TIMESTAMPER_LOG=settings=trace`
pub(crate) const LOG_ENV: &str = "TIMESTAMPER_LOG";
