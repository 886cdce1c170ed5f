use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive for a `-v` count, falling back to `default_level`.
pub fn filter_directive(verbosity: u8, default_level: &str) -> String {
    match verbosity {
        0 => default_level.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the level comes from the verbosity
/// count, then `default_level`. An invalid directive falls back to `warn`.
/// Calling this twice is harmless; the second subscriber is dropped.
pub fn init_logging(verbosity: u8, default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = filter_directive(verbosity, default_level);
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .with_thread_ids(false)
        .compact()
        .try_init();
}
