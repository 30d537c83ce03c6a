//! Notification publishing
//!
//! - `NotificationPublisher`: envelope, confirmation wait and shutdown
//! - `Transport`: the seam the broker client sits behind
//! - `KafkaTransport`: librdkafka producer (feature `kafka`)
//! - `MockTransport`: in-process fake broker

mod error;
mod mock;
mod notification_publisher;
mod settings;
mod transport;

#[cfg(feature = "kafka")]
mod kafka;

pub use error::{
    PublishError, PublishResult, PublisherError, PublisherResult, TransportError, TransportResult,
};
pub use mock::{MockMode, MockTransport};
pub use notification_publisher::{DeliveryReport, NotificationPublisher, DEFAULT_DELIVERY_TIMEOUT};
pub use settings::{ProducerSettings, CLIENT_ID};
pub use transport::{Delivery, OutboundRecord, Transport};

#[cfg(feature = "kafka")]
pub use kafka::KafkaTransport;
