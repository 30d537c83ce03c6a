//! rdkafka-backed transport

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;

use super::error::{TransportError, TransportResult};
use super::settings::ProducerSettings;
use super::transport::{Delivery, OutboundRecord, Transport};

/// How long a record may wait for room in the local producer queue
const QUEUE_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on the flush performed by `close`
const FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport over a librdkafka `FutureProducer`
pub struct KafkaTransport {
    producer: FutureProducer,
}

impl KafkaTransport {
    /// Create the producer client from the given properties
    ///
    /// librdkafka connects lazily, so this only fails on invalid properties.
    pub fn connect(settings: &ProducerSettings) -> TransportResult<Self> {
        let mut client_config = ClientConfig::new();
        for (key, value) in settings.iter() {
            client_config.set(key, value);
        }

        let producer: FutureProducer = client_config
            .create()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self { producer })
    }
}

#[async_trait]
impl Transport for KafkaTransport {
    fn name(&self) -> &str {
        "kafka"
    }

    async fn send(&self, record: OutboundRecord) -> TransportResult<Delivery> {
        let headers = record.headers.iter().fold(OwnedHeaders::new(), |headers, (key, value)| {
            headers.insert(Header {
                key: key.as_str(),
                value: Some(value.as_str()),
            })
        });

        let future_record = FutureRecord::<(), [u8]>::to(&record.topic)
            .payload(&record.payload[..])
            .headers(headers);

        let (partition, offset) = self
            .producer
            .send(future_record, Timeout::After(QUEUE_TIMEOUT))
            .await
            .map_err(|(e, _)| TransportError::Delivery(e.to_string()))?;

        Ok(Delivery { partition, offset })
    }

    async fn close(&self) -> TransportResult<()> {
        let producer = self.producer.clone();
        tokio::task::spawn_blocking(move || producer.flush(Timeout::After(FLUSH_TIMEOUT)))
            .await
            .map_err(|e| TransportError::Flush(e.to_string()))?
            .map_err(|e| TransportError::Flush(e.to_string()))
    }
}
