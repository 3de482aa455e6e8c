//! Log subscriber setup for the readings binaries.
//!
//! `RUST_LOG` wins when set. Otherwise everything logs at `info`, or `debug` when the
//! `DEBUG` environment variable is present, and the readings crates always log at `debug`.
//! Logs are written to stderr; stdout is left to command output.

use std::io;

use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::{SubscriberInitExt, TryInitError},
};

/// Default filter directives used when `RUST_LOG` is unset.
pub fn default_directives(debug: bool) -> String {
    let root = if debug { "debug" } else { "info" };
    format!("{root},readings=debug,readings_core=debug,readings_mongodb=debug")
}

/// Installs the global subscriber.
pub fn init() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(std::env::var_os("DEBUG").is_some())));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::default_directives;

    #[test]
    fn debug_switch_raises_root_level() {
        assert!(default_directives(false).starts_with("info,"));
        assert!(default_directives(true).starts_with("debug,"));
        assert!(default_directives(false).contains("readings_core=debug"));
    }
}
