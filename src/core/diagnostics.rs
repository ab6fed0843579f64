//! Diagnostic sink for non-fatal anomalies found while generating controls.
//!
//! Generation never reads diagnostics back; the sink is write-only and must not
//! fail. `TracingDiagnostics` forwards to the `tracing` subscriber installed by
//! the CLI, `RecordingDiagnostics` keeps everything in memory for callers that
//! want to inspect what happened (tests, library users).

use std::sync::Mutex;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Debug,
    Warn,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticLevel::Debug => write!(f, "debug"),
            DiagnosticLevel::Warn => write!(f, "warn"),
        }
    }
}

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

/// Write-only diagnostics collaborator.
///
/// Implementations must be `Sync`: one sink may be shared by generations
/// running in parallel.
pub trait Diagnostics: Send + Sync {
    fn debug(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards diagnostics to `tracing` under the `negcov` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "negcov", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "negcov", "{message}");
    }
}

/// Keeps diagnostics in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Only the warnings, in order.
    pub fn warnings(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|d| d.level == DiagnosticLevel::Warn)
            .map(|d| d.message)
            .collect()
    }

    fn push(&self, level: DiagnosticLevel, message: &str) {
        let diagnostic = Diagnostic {
            level,
            message: message.to_string(),
        };
        match self.entries.lock() {
            Ok(mut guard) => guard.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn debug(&self, message: &str) {
        self.push(DiagnosticLevel::Debug, message);
    }

    fn warn(&self, message: &str) {
        self.push(DiagnosticLevel::Warn, message);
    }
}
