//! Publisher error types

use thiserror::Error;

/// Failures reported by a [`Transport`](super::Transport)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The broker did not acknowledge the record
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// The client could not be created or lost its connection
    #[error("connection failed: {0}")]
    Connection(String),

    /// Outstanding records could not be flushed on close
    #[error("flush failed: {0}")]
    Flush(String),
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that abort publisher construction
#[derive(Error, Debug)]
pub enum PublisherError {
    #[error("Kafka brokers not configured")]
    MissingBrokers,

    #[error("failed to create Kafka producer: {0}")]
    Connection(#[source] TransportError),
}

pub type PublisherResult<T> = Result<T, PublisherError>;

/// Errors returned by a single publish call
///
/// None of these affect other in-flight or later calls.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("failed to create notification message: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("failed to marshal message: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("failed to send Kafka message: {0}")]
    Send(#[source] TransportError),

    #[error("producer is closed")]
    Closed,

    /// The caller's token was cancelled
    #[error("publish cancelled")]
    Cancelled,

    /// The caller's token deadline passed
    #[error("deadline exceeded while waiting for message delivery")]
    DeadlineExceeded,

    /// The internal delivery ceiling elapsed first
    #[error("timeout while waiting for message delivery")]
    DeliveryTimeout,
}

impl PublishError {
    /// Whether the call gave up waiting rather than observing a send outcome
    pub fn is_abandoned(&self) -> bool {
        matches!(
            self,
            PublishError::Cancelled | PublishError::DeadlineExceeded | PublishError::DeliveryTimeout
        )
    }
}

pub type PublishResult<T> = Result<T, PublishError>;
