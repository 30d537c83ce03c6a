//! The sink the publisher and service wiring write delivery events to

use std::sync::Arc;

/// Leveled text sink for delivery outcomes, producer lifecycle and
/// abandoned sends
///
/// The publisher holds one and hands a clone to every spawned send, so
/// implementations must be callable from any task. Messages are complete
/// lines such as `"SMS message published successfully | ID: sms-... | Partition: 0"`.
///
/// Implementations:
/// - `TracingLogger`: the CLI's choice, forwards to `tracing`
/// - `ConsoleLogger`: plain stdout/stderr lines
/// - `MemoryLogger`: captures lines for assertions
/// - `NoOpLogger`: drops everything
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);

    /// Acknowledged sends and a clean producer close
    fn info(&self, message: &str);

    /// Late outcomes of sends nobody is waiting for
    fn warn(&self, message: &str);

    /// Startup and shutdown failures
    fn error(&self, message: &str);
}

/// Logger shared between the publisher and its send tasks
pub type SharedLogger = Arc<dyn Logger>;

/// `format!`-style shorthands: `log_info!(logger, "Kafka producer closed")`
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(&format!($($arg)*))
    };
}
