//! Notification publisher with bounded delivery confirmation

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{oneshot, Mutex};

use crate::config::KafkaConfig;
use crate::dto::{EmailMessage, FeedbackMessage, InAppMessage, PushMessage, SmsMessage};
use crate::logging::SharedLogger;
use crate::types::{CancelReason, CancellationToken, NotificationEnvelope, NotificationKind};
use crate::{log_error, log_info, log_warn};

use super::error::{PublishError, PublishResult, TransportError};
use super::transport::{Delivery, OutboundRecord, Transport};

#[cfg(feature = "kafka")]
use super::error::{PublisherError, PublisherResult};

/// Longest a publish call waits for the broker acknowledgement
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Where an acknowledged notification landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub message_id: String,
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
}

/// Publishes typed notifications and waits for the broker to confirm them
///
/// Each publish call hands the send to a spawned task and then waits for the
/// first of three outcomes: the send result, the caller's token firing, or
/// the delivery timeout. Giving up on the wait does not abort the send; the
/// task finishes on its own and its late outcome is logged as abandoned.
///
/// The transport and the closed flag sit behind one async mutex. Sends take
/// the lock only around the transport call, so `close` waits for an
/// in-flight send and every send after `close` fails with
/// [`PublishError::Closed`] without touching the transport.
///
/// # Example
///
/// ```rust,ignore
/// let publisher = NotificationPublisher::new(config.kafka.clone(), logger)?;
/// let cancel = CancellationToken::with_timeout(Duration::from_secs(5));
/// let report = publisher.publish_sms(&SmsMessage::new("+251911000000", "Hi"), &cancel).await?;
/// publisher.close().await;
/// ```
pub struct NotificationPublisher {
    inner: Arc<PublisherInner>,
    config: KafkaConfig,
    delivery_timeout: Duration,
}

struct PublisherInner {
    state: Mutex<PublisherState>,
    logger: SharedLogger,
}

struct PublisherState {
    transport: Arc<dyn Transport>,
    closed: bool,
}

impl NotificationPublisher {
    /// Connect a Kafka producer for the configured brokers
    #[cfg(feature = "kafka")]
    pub fn new(config: KafkaConfig, logger: SharedLogger) -> PublisherResult<Self> {
        use super::kafka::KafkaTransport;
        use super::settings::ProducerSettings;

        let brokers = config.broker_list();
        if brokers.is_empty() {
            return Err(PublisherError::MissingBrokers);
        }

        let settings = ProducerSettings::from_config(&config, &brokers);
        let transport = KafkaTransport::connect(&settings).map_err(PublisherError::Connection)?;
        log_info!(
            logger,
            "Kafka producer created | Brokers: {} | SASL: {}",
            brokers.join(","),
            config.sasl_enabled
        );

        Ok(Self::with_transport(config, Arc::new(transport), logger))
    }

    /// Publisher over an already-built transport
    pub fn with_transport(config: KafkaConfig, transport: Arc<dyn Transport>, logger: SharedLogger) -> Self {
        Self {
            inner: Arc::new(PublisherInner {
                state: Mutex::new(PublisherState {
                    transport,
                    closed: false,
                }),
                logger,
            }),
            config,
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
        }
    }

    /// Override the delivery wait ceiling
    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    pub fn config(&self) -> &KafkaConfig {
        &self.config
    }

    pub fn delivery_timeout(&self) -> Duration {
        self.delivery_timeout
    }

    pub async fn is_closed(&self) -> bool {
        self.inner.state.lock().await.closed
    }

    /// Close the transport once; later calls do nothing
    ///
    /// Waits for an in-flight send to finish. Failures are logged, not returned.
    pub async fn close(&self) {
        let mut state = self.inner.state.lock().await;
        if state.closed {
            return;
        }
        state.closed = true;

        match state.transport.close().await {
            Ok(()) => log_info!(self.inner.logger, "Kafka producer closed successfully"),
            Err(e) => log_error!(self.inner.logger, "Error closing Kafka producer: {}", e),
        }
    }

    /// Wrap `payload` in an envelope tagged `kind`, send it to `topic` and
    /// wait for the acknowledgement
    ///
    /// Returns immediately with `Cancelled` or `DeadlineExceeded` if the
    /// token has already fired, without sending anything.
    pub async fn publish<T: Serialize + ?Sized>(
        &self,
        kind: &str,
        topic: &str,
        payload: &T,
        cancel: &CancellationToken,
    ) -> PublishResult<DeliveryReport> {
        if let Some(reason) = cancel.reason() {
            return Err(cancel_error(reason));
        }

        let envelope = NotificationEnvelope::new(kind, payload).map_err(PublishError::Envelope)?;
        let bytes = envelope.to_bytes().map_err(PublishError::Serialization)?;

        let record = OutboundRecord {
            topic: topic.to_string(),
            payload: bytes,
            headers: envelope
                .record_headers()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        };

        self.send_and_wait(record, envelope.id, label_for(kind), cancel).await
    }

    /// Publish under a known kind to the topic configured for it
    pub async fn publish_kind<T: Serialize + ?Sized>(
        &self,
        kind: NotificationKind,
        payload: &T,
        cancel: &CancellationToken,
    ) -> PublishResult<DeliveryReport> {
        self.publish(kind.as_str(), self.config.topic_for(kind), payload, cancel)
            .await
    }

    pub async fn publish_email(&self, message: &EmailMessage, cancel: &CancellationToken) -> PublishResult<DeliveryReport> {
        self.publish_kind(NotificationKind::Email, message, cancel).await
    }

    pub async fn publish_sms(&self, message: &SmsMessage, cancel: &CancellationToken) -> PublishResult<DeliveryReport> {
        self.publish_kind(NotificationKind::Sms, message, cancel).await
    }

    pub async fn publish_in_app(&self, message: &InAppMessage, cancel: &CancellationToken) -> PublishResult<DeliveryReport> {
        self.publish_kind(NotificationKind::InApp, message, cancel).await
    }

    pub async fn publish_push(&self, message: &PushMessage, cancel: &CancellationToken) -> PublishResult<DeliveryReport> {
        self.publish_kind(NotificationKind::Push, message, cancel).await
    }

    pub async fn publish_feedback(
        &self,
        message: &FeedbackMessage,
        cancel: &CancellationToken,
    ) -> PublishResult<DeliveryReport> {
        self.publish_kind(NotificationKind::Feedback, message, cancel).await
    }

    async fn send_and_wait(
        &self,
        record: OutboundRecord,
        message_id: String,
        label: String,
        cancel: &CancellationToken,
    ) -> PublishResult<DeliveryReport> {
        let topic = record.topic.clone();
        let (tx, rx) = oneshot::channel();

        let inner = Arc::clone(&self.inner);
        let task_id = message_id.clone();
        let task_topic = topic.clone();
        tokio::spawn(async move {
            let outcome = inner.safe_send(record).await;
            // The waiter is gone; nobody else will report this outcome.
            if let Err(outcome) = tx.send(outcome) {
                match outcome {
                    Ok(delivery) => log_warn!(
                        inner.logger,
                        "Abandoned delivery completed | ID: {} | Topic: {} | Partition: {} | Offset: {}",
                        task_id,
                        task_topic,
                        delivery.partition,
                        delivery.offset
                    ),
                    Err(e) => log_warn!(
                        inner.logger,
                        "Abandoned delivery failed | ID: {} | Topic: {} | Error: {}",
                        task_id,
                        task_topic,
                        e
                    ),
                }
            }
        });

        tokio::select! {
            outcome = rx => {
                let delivery = match outcome {
                    Ok(result) => result?,
                    Err(_) => {
                        return Err(PublishError::Send(TransportError::Delivery(
                            "send task ended without reporting".to_string(),
                        )))
                    }
                };
                log_info!(
                    self.inner.logger,
                    "{} message published successfully | ID: {} | Topic: {} | Partition: {} | Offset: {}",
                    label,
                    message_id,
                    topic,
                    delivery.partition,
                    delivery.offset
                );
                Ok(DeliveryReport {
                    message_id,
                    topic,
                    partition: delivery.partition,
                    offset: delivery.offset,
                })
            }
            _ = cancel.cancelled() => {
                Err(cancel_error(cancel.reason().unwrap_or(CancelReason::Cancelled)))
            }
            _ = tokio::time::sleep(self.delivery_timeout) => {
                Err(PublishError::DeliveryTimeout)
            }
        }
    }
}

impl PublisherInner {
    async fn safe_send(&self, record: OutboundRecord) -> PublishResult<Delivery> {
        let state = self.state.lock().await;
        if state.closed {
            return Err(PublishError::Closed);
        }
        state.transport.send(record).await.map_err(PublishError::Send)
    }
}

impl std::fmt::Debug for NotificationPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationPublisher")
            .field("brokers", &self.config.brokers)
            .field("delivery_timeout", &self.delivery_timeout)
            .finish()
    }
}

fn cancel_error(reason: CancelReason) -> PublishError {
    match reason {
        CancelReason::Cancelled => PublishError::Cancelled,
        CancelReason::DeadlineExceeded => PublishError::DeadlineExceeded,
    }
}

/// Log label for a kind tag; unknown tags are used verbatim
fn label_for(kind: &str) -> String {
    kind.parse::<NotificationKind>()
        .map(|k| k.label().to_string())
        .unwrap_or_else(|_| kind.to_string())
}
