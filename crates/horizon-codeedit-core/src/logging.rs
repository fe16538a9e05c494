//! Logging and tracing facilities for Horizon CodeEdit.
//!
//! Horizon CodeEdit uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_codeedit=debug")
//!     .init();
//! ```
//!
//! Every subsystem logs under its own target (see [`targets`]) so that, for
//! example, completion traffic can be enabled without the per-keystroke
//! bracket scans.

/// Span names used throughout Horizon CodeEdit for tracing.
pub mod span_names {
    /// Key press dispatch span.
    pub const KEY_PRESS: &str = "horizon_codeedit::key_press";
    /// Gutter repaint span.
    pub const GUTTER_PAINT: &str = "horizon_codeedit::gutter_paint";
    /// Bracket scan span.
    pub const BRACKET_SCAN: &str = "horizon_codeedit::bracket_scan";
    /// Highlight rebuild span.
    pub const HIGHLIGHT: &str = "horizon_codeedit::highlight";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "horizon_codeedit_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_codeedit_core::signal";
    /// Editor orchestration target.
    pub const EDITOR: &str = "horizon_codeedit::editor";
    /// Gutter (line number area) target.
    pub const GUTTER: &str = "horizon_codeedit::gutter";
    /// Bracket matching target.
    pub const BRACKET: &str = "horizon_codeedit::bracket";
    /// Indentation engine target.
    pub const INDENT: &str = "horizon_codeedit::indent";
    /// Completion controller target.
    pub const COMPLETION: &str = "horizon_codeedit::completion";
    /// Style loading target.
    pub const STYLE: &str = "horizon_codeedit_style";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_codeedit::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_codeedit::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with consistent
/// target naming.
#[macro_export]
macro_rules! codeedit_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_codeedit", $($arg)*)
    };
}

#[macro_export]
macro_rules! codeedit_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_codeedit", $($arg)*)
    };
}

#[macro_export]
macro_rules! codeedit_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_codeedit", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        // Just ensure it compiles and doesn't panic without a subscriber
        let _span = PerfSpan::new("test_operation");
    }

    #[test]
    fn test_perf_span_with_subscriber() {
        let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new(span_names::GUTTER_PAINT);
            codeedit_debug!("inside span");
        });
    }
}
