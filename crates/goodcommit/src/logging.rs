//! `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber writing compact lines to stderr.
///
/// `directive` is an `EnvFilter` directive such as `warn` or
/// `goodcommit_core=debug`; an invalid one falls back to `warn`. Prompts go
/// to the terminal on stdout, so logs never interleave with them. Calling
/// this twice is a no-op.
pub fn init_subscriber(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
}
