//! Tracing setup for binaries and tests using these utilities

use tarry_core::TARRY_LOG_VAR;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, trace, warn, Level};

/// Install a compact stderr subscriber.
///
/// The filter comes from `TARRY_LOG`, then `RUST_LOG`, then `info`. Calling
/// this when a global subscriber is already set returns an error and leaves
/// the existing subscriber in place.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .with_ansi(is_tty());

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(TARRY_LOG_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_filter_prefers_tarry_log() {
        let saved = std::env::var(TARRY_LOG_VAR).ok();
        std::env::set_var(TARRY_LOG_VAR, "tarry_utils=trace");

        assert_eq!(env_filter().to_string(), "tarry_utils=trace");

        match saved {
            Some(value) => std::env::set_var(TARRY_LOG_VAR, value),
            None => std::env::remove_var(TARRY_LOG_VAR),
        }
    }
}
