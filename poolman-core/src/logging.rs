use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize env-filtered logging (defaults to "info" if RUST_LOG is not
/// set). Logs go to stderr; stdout is reserved for command output.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
