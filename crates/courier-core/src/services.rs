//! Process-level wiring: resolve configuration once, build the publisher,
//! tear it down on shutdown

use thiserror::Error;

use crate::config::ResolvedConfig;
use crate::publisher::{NotificationPublisher, PublisherError};
use crate::resolver::ConfigError;

#[cfg(feature = "kafka")]
use crate::logging::SharedLogger;
#[cfg(feature = "kafka")]
use crate::{log_error, log_info};

#[derive(Error, Debug)]
pub enum ServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Publisher(#[from] PublisherError),
}

pub type ServicesResult<T> = Result<T, ServicesError>;

/// The publisher together with the configuration it was built from
#[derive(Debug)]
pub struct NotificationServices {
    pub publisher: NotificationPublisher,
    pub config: ResolvedConfig,
}

impl NotificationServices {
    /// Load configuration from Vault and the environment, then connect the
    /// producer
    #[cfg(feature = "kafka")]
    pub async fn initialize(logger: SharedLogger) -> ServicesResult<Self> {
        let config = match crate::resolver::load().await {
            Ok(config) => config,
            Err(e) => {
                log_error!(logger, "Failed to load config: {}", e);
                return Err(e.into());
            }
        };
        Self::from_config(config, logger)
    }

    /// Connect the producer for an already-resolved configuration
    #[cfg(feature = "kafka")]
    pub fn from_config(config: ResolvedConfig, logger: SharedLogger) -> ServicesResult<Self> {
        let publisher = match NotificationPublisher::new(config.kafka.clone(), logger.clone()) {
            Ok(publisher) => publisher,
            Err(e) => {
                log_error!(logger, "Failed to initialize Kafka producer: {}", e);
                return Err(e.into());
            }
        };

        log_info!(logger, "Notification services initialized successfully");
        Ok(Self::with_publisher(config, publisher))
    }

    pub fn with_publisher(config: ResolvedConfig, publisher: NotificationPublisher) -> Self {
        Self { publisher, config }
    }

    /// Close the publisher; safe to call more than once
    pub async fn cleanup(&self) {
        self.publisher.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "kafka")]
    use crate::config::KafkaConfig;
    use crate::logging::{LogLevel, MemoryLogger};
    use crate::publisher::MockTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_cleanup_closes_once() {
        let transport = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());
        let config = ResolvedConfig::default();
        let publisher = NotificationPublisher::with_transport(config.kafka.clone(), transport.clone(), logger.clone());
        let services = NotificationServices::with_publisher(config, publisher);

        services.cleanup().await;
        services.cleanup().await;

        assert_eq!(transport.close_count(), 1);
        assert!(services.publisher.is_closed().await);
        assert!(logger.contains(LogLevel::Info, "closed successfully"));
    }

    #[cfg(feature = "kafka")]
    #[test]
    fn test_missing_brokers_is_logged_and_returned() {
        let logger = Arc::new(MemoryLogger::new());
        let config = ResolvedConfig {
            kafka: KafkaConfig {
                brokers: " , ".to_string(),
                ..KafkaConfig::default()
            },
            ..ResolvedConfig::default()
        };

        let err = NotificationServices::from_config(config, logger.clone()).unwrap_err();

        assert!(matches!(err, ServicesError::Publisher(PublisherError::MissingBrokers)));
        assert!(logger.contains(LogLevel::Error, "Failed to initialize Kafka producer: Kafka brokers not configured"));
    }

    #[cfg(feature = "kafka")]
    #[test]
    fn test_connects_lazily_with_brokers() {
        let logger = Arc::new(MemoryLogger::new());
        let config = ResolvedConfig {
            kafka: KafkaConfig {
                brokers: "127.0.0.1:1".to_string(),
                ..KafkaConfig::default()
            },
            ..ResolvedConfig::default()
        };

        let services = NotificationServices::from_config(config, logger.clone()).unwrap();

        assert_eq!(services.config.kafka.brokers, "127.0.0.1:1");
        assert!(logger.contains(LogLevel::Info, "Notification services initialized successfully"));
    }
}
