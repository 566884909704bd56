//! Logging facade
//!
//! Severity-levelled logging with the emitting operation tagged on every
//! message. The default implementation forwards to `tracing`; hosts and
//! tests can inject their own sink instead of relying on global state.

use tracing_subscriber::EnvFilter;

/// Three-level logging interface
pub trait Logger: Send + Sync {
    fn error(&self, operation: &str, message: &str);
    fn info(&self, operation: &str, message: &str);
    fn debug(&self, operation: &str, message: &str);
}

/// Logger forwarding to the `tracing` macros
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, operation: &str, message: &str) {
        tracing::error!(operation, "{}", message);
    }

    fn info(&self, operation: &str, message: &str) {
        tracing::info!(operation, "{}", message);
    }

    fn debug(&self, operation: &str, message: &str) {
        tracing::debug!(operation, "{}", message);
    }
}

/// Initialize console logging with the specified verbosity level
pub fn init_logging(verbose: u8) -> crate::Result<()> {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("xcsbot_core={}", level)
            .parse()
            .map_err(|e| crate::Error::Other(format!("invalid log directive: {}", e)))?,
    );

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2) // Show module path at debug+
        .init();

    Ok(())
}
