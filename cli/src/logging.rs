use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr log subscriber.
/// - Respects `RUST_LOG` if set
/// - Falls back to `warn` so normal output on stdout stays clean
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}
