//! CLI output formatting and logging setup.

use tracing_subscriber::EnvFilter;

pub fn debug_enabled() -> bool {
    std::env::var_os("HPD_DEBUG").is_some_and(|v| !v.is_empty())
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `HPD_DEBUG` set.
pub fn init_logging() {
    let default = if debug_enabled() { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn print_error(err: &anyhow::Error) {
    if debug_enabled() {
        eprintln!("hpd: {err:?}");
    } else {
        eprintln!("hpd: {err:#}");
    }
}
