//! Structured logging using **tracing**.
//!
//! The core only emits events (`tracing::debug!`, `warn!`, ...). Installing a
//! subscriber is left to the binary, which calls [`init_structured_logging`]
//! once at startup. Library users and tests that never install one get no
//! output.

/// Initializes the global tracing collector (subscriber).
///
/// Configures structured JSON output to stderr so stdout stays clean for the
/// report. Calling it twice is harmless: the second installation attempt is
/// ignored.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=deadimg_core=debug`)
pub fn init_structured_logging() {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(default_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// `RUST_LOG` if set, otherwise warnings only.
fn default_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init_structured_logging();
        init_structured_logging();
        tracing::info!(detail = "logging initialized");
    }
}
