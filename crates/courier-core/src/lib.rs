//! Courier Core
//!
//! Notification dispatch client: resolves configuration from Vault, the
//! environment and compiled defaults, then publishes typed notifications to
//! Kafka and waits, within a bound, for the broker to confirm them.
//!
//! ## Publishing
//!
//! ```rust,ignore
//! use courier_core::{NotificationServices, CancellationToken, TracingLogger, dto::SmsMessage};
//!
//! let services = NotificationServices::initialize(Arc::new(TracingLogger::new())).await?;
//!
//! let cancel = CancellationToken::with_timeout(Duration::from_secs(5));
//! let report = services
//!     .publisher
//!     .publish_sms(&SmsMessage::new("+251911000000", "Your code is 1234"), &cancel)
//!     .await?;
//!
//! services.cleanup().await;
//! ```

pub mod config;
pub mod dto;
pub mod logging;
pub mod publisher;
pub mod resolver;
pub mod secrets;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use types::{CancelReason, CancellationToken, NotificationEnvelope, NotificationKind};

pub use secrets::{ChainSecretStore, EnvSecretStore, MemorySecretStore, SecretStore, VaultSecretStore, VaultSettings};

pub use logging::{ConsoleLogger, Logger, NoOpLogger, SharedLogger, TracingLogger};

pub use config::{EmailSenderConfig, KafkaConfig, ResolvedConfig};

pub use resolver::{ConfigError, ConfigResolver, ConfigResult};

pub use publisher::{
    DeliveryReport, NotificationPublisher, PublishError, PublishResult, PublisherError,
    Transport,
};

pub use services::{NotificationServices, ServicesError};
