//! Logger that forwards to `tracing`

use super::traits::Logger;

/// Routes `Logger` calls into the `tracing` ecosystem under one target
///
/// Hosts that already install a `tracing` subscriber pass this to the
/// publisher so its messages land in the same pipeline as everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "courier", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "courier", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "courier", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "courier", "{}", message);
    }
}
