//! Thin logging facade that also counts reported warnings.
use std::sync::atomic::{AtomicUsize, Ordering};

use super::subscriber::STAGE_TARGET;
use crate::diagnostics::Warning;

/// Structured logger used by the command layer.
///
/// Every message goes through [`tracing`]; the logger only adds stage
/// headers and a running count of conversion warnings for the summary.
#[derive(Debug, Default)]
pub struct Logger {
    warnings: AtomicUsize,
}

impl Logger {
    /// Create a new logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Report a conversion warning and count it.
    pub fn warning(&self, warning: &Warning) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(kind = warning.kind.tag(), entity = %warning.entity, "{}", warning.detail);
    }

    /// Number of conversion warnings reported so far.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }
}
