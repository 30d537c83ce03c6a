//! Logging abstractions
//!
//! The publisher only needs a leveled text sink; hosts pick the backend.

mod traits;
mod noop;
mod console;
mod memory;
mod tracing_logger;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::{LogLevel, MemoryLogger};
pub use tracing_logger::TracingLogger;
