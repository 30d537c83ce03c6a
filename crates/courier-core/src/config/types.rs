//! Resolved configuration values

use std::time::Duration;

use serde::{Serialize, Serializer};

use super::keys::defaults;
use crate::types::NotificationKind;

const REDACTED: &str = "<redacted>";

/// Everything the notification client needs, fully populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ResolvedConfig {
    pub kafka: KafkaConfig,
    pub email: EmailSenderConfig,
}

/// Broker connection and topic settings
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct KafkaConfig {
    /// Comma-separated `host:port` list as configured
    pub brokers: String,
    pub email_topic: String,
    pub sms_topic: String,
    pub inapp_topic: String,
    pub push_topic: String,
    pub feedback_topic: String,
    /// Kept for consumers sharing this configuration; the producer ignores it
    pub consumer_group: String,
    pub sasl_enabled: bool,
    pub sasl_username: String,
    #[serde(serialize_with = "redact")]
    pub sasl_password: String,
    pub sasl_mechanism: String,
    pub auto_offset_reset: String,
    pub enable_auto_commit: bool,
    #[serde(rename = "session_timeout_ms", serialize_with = "as_millis")]
    pub session_timeout: Duration,
}

impl KafkaConfig {
    /// Broker addresses with whitespace trimmed and empty entries dropped
    pub fn broker_list(&self) -> Vec<String> {
        self.brokers
            .split(',')
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Topic configured for a notification kind
    pub fn topic_for(&self, kind: NotificationKind) -> &str {
        match kind {
            NotificationKind::Email => &self.email_topic,
            NotificationKind::Sms => &self.sms_topic,
            NotificationKind::InApp => &self.inapp_topic,
            NotificationKind::Push => &self.push_topic,
            NotificationKind::Feedback => &self.feedback_topic,
        }
    }
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            brokers: defaults::KAFKA_BROKERS.to_string(),
            email_topic: defaults::KAFKA_EMAIL_TOPIC.to_string(),
            sms_topic: defaults::KAFKA_SMS_TOPIC.to_string(),
            inapp_topic: defaults::KAFKA_INAPP_TOPIC.to_string(),
            push_topic: defaults::KAFKA_PUSH_TOPIC.to_string(),
            feedback_topic: defaults::KAFKA_FEEDBACK_TOPIC.to_string(),
            consumer_group: defaults::KAFKA_CONSUMER_GROUP.to_string(),
            sasl_enabled: defaults::KAFKA_SASL_ENABLED,
            sasl_username: String::new(),
            sasl_password: String::new(),
            sasl_mechanism: defaults::KAFKA_SASL_MECHANISM.to_string(),
            auto_offset_reset: defaults::KAFKA_AUTO_OFFSET_RESET.to_string(),
            enable_auto_commit: defaults::KAFKA_ENABLE_AUTO_COMMIT,
            session_timeout: Duration::from_millis(defaults::KAFKA_SESSION_TIMEOUT_MS),
        }
    }
}

impl std::fmt::Debug for KafkaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaConfig")
            .field("brokers", &self.brokers)
            .field("email_topic", &self.email_topic)
            .field("sms_topic", &self.sms_topic)
            .field("inapp_topic", &self.inapp_topic)
            .field("push_topic", &self.push_topic)
            .field("feedback_topic", &self.feedback_topic)
            .field("consumer_group", &self.consumer_group)
            .field("sasl_enabled", &self.sasl_enabled)
            .field("sasl_username", &self.sasl_username)
            .field("sasl_password", &redacted(&self.sasl_password))
            .field("sasl_mechanism", &self.sasl_mechanism)
            .field("auto_offset_reset", &self.auto_offset_reset)
            .field("enable_auto_commit", &self.enable_auto_commit)
            .field("session_timeout", &self.session_timeout)
            .finish()
    }
}

/// Credentials and sender identity for the email provider
#[derive(Clone, PartialEq, Eq, Default, Serialize)]
pub struct EmailSenderConfig {
    pub api_key: String,
    #[serde(serialize_with = "redact")]
    pub api_secret: String,
    pub sender_address: String,
    pub sender_name: String,
}

impl std::fmt::Debug for EmailSenderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSenderConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &redacted(&self.api_secret))
            .field("sender_address", &self.sender_address)
            .field("sender_name", &self.sender_name)
            .finish()
    }
}

// Empty stays visibly empty so a missing credential is still obvious.
fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        REDACTED
    }
}

fn redact<S: Serializer>(secret: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(redacted(secret))
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secrets() -> ResolvedConfig {
        ResolvedConfig {
            kafka: KafkaConfig {
                sasl_enabled: true,
                sasl_username: "svc".to_string(),
                sasl_password: "hunter2".to_string(),
                ..KafkaConfig::default()
            },
            email: EmailSenderConfig {
                api_key: "key-1".to_string(),
                api_secret: "s3cr3t".to_string(),
                ..EmailSenderConfig::default()
            },
        }
    }

    #[test]
    fn test_defaults() {
        let kafka = KafkaConfig::default();
        assert_eq!(kafka.brokers, "");
        assert_eq!(kafka.email_topic, "email-notifications");
        assert_eq!(kafka.inapp_topic, "inapp-notifications");
        assert_eq!(kafka.consumer_group, "notification-service");
        assert!(!kafka.sasl_enabled);
        assert_eq!(kafka.sasl_mechanism, "PLAIN");
        assert_eq!(kafka.auto_offset_reset, "earliest");
        assert!(kafka.enable_auto_commit);
        assert_eq!(kafka.session_timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn test_broker_list_trims_and_drops_empty() {
        let kafka = KafkaConfig {
            brokers: " b1:9092, b2:9092 ,,".to_string(),
            ..KafkaConfig::default()
        };
        assert_eq!(kafka.broker_list(), vec!["b1:9092", "b2:9092"]);

        let blank = KafkaConfig {
            brokers: " , ".to_string(),
            ..KafkaConfig::default()
        };
        assert!(blank.broker_list().is_empty());
    }

    #[test]
    fn test_topic_for_kind() {
        let kafka = KafkaConfig {
            push_topic: "mobile-push".to_string(),
            ..KafkaConfig::default()
        };
        assert_eq!(kafka.topic_for(NotificationKind::Push), "mobile-push");
        assert_eq!(kafka.topic_for(NotificationKind::Sms), "sms-notifications");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", with_secrets());
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("svc"));
    }

    #[test]
    fn test_serialize_redacts_secrets() {
        let value = serde_json::to_value(with_secrets()).unwrap();
        assert_eq!(value["kafka"]["sasl_password"], "<redacted>");
        assert_eq!(value["email"]["api_secret"], "<redacted>");
        assert_eq!(value["email"]["api_key"], "key-1");
        assert_eq!(value["kafka"]["session_timeout_ms"], 10_000);

        let empty = serde_json::to_value(ResolvedConfig::default()).unwrap();
        assert_eq!(empty["kafka"]["sasl_password"], "");
    }
}
