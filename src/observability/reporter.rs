//! Error reporting collaborator.

/// Receives failed searches, at most once per sequence.
pub trait ErrorReporter: Send {
    fn report(&mut self, sequence: u64, message: &str);
}

/// Reports through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&mut self, sequence: u64, message: &str) {
        tracing::error!(sequence, error = %message, "search failed");
    }
}
