//! Configuration model
//!
//! `keys` names every value the resolver looks up along with its default;
//! `ResolvedConfig` is the immutable result handed to the publisher.

pub mod keys;
mod types;

pub use types::{EmailSenderConfig, KafkaConfig, ResolvedConfig};
