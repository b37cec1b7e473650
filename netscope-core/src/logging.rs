//! Structured logging for trace ingestion and chart rendering
//!
//! # Controlling terminal output
//!
//! ```rust,no_run
//! use netscope_core::logging::init_logging_with_level;
//! init_logging_with_level("debug");
//! ```
//!
//! `RUST_LOG` always wins over the level passed in code:
//!
//! ```bash
//! RUST_LOG=netscope_ingest=trace netscope traces/*.txt
//! ```
//!
//! Level guidelines:
//! - **TRACE**: every discarded line
//! - **DEBUG**: per-series summaries and render dispatch
//! - **INFO**: one line per file ingested and per chart written
//! - **WARN**: malformed lines that were skipped
//! - **ERROR**: renders or files that failed

use std::path::Path;
use tracing::{info, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging at `info`
pub fn init_logging() {
    init_logging_with_level("info")
}

/// Initialize logging with a specific level
///
/// # Arguments
/// * `level` - Log level: "trace", "debug", "info", "warn", or "error"
///
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "warn,netscope={level},netscope_core={level},netscope_ingest={level},netscope_viz={level}"
        )
        .into()
    });

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .try_init();

    if installed.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Span covering the ingestion and rendering of one input file
pub fn file_span(path: &Path) -> Span {
    tracing::info_span!("file", path = %path.display())
}

/// Span covering one render call
pub fn render_span(category: &str, kind: &str) -> Span {
    tracing::debug_span!("render", category = category, kind = kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init_logging_with_level("debug");
        init_logging();
    }

    #[test]
    fn spans_can_be_entered() {
        let span = file_span(Path::new("trace.txt"));
        let _guard = span.enter();
        let inner = render_span("flow-rate", "line");
        let _inner = inner.enter();
    }
}
