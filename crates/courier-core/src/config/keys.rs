//! Configuration keys and compiled-in defaults

pub const KAFKA_BROKERS: &str = "KAFKA_BROKERS";
pub const KAFKA_EMAIL_TOPIC: &str = "KAFKA_EMAIL_TOPIC";
pub const KAFKA_SMS_TOPIC: &str = "KAFKA_SMS_TOPIC";
pub const KAFKA_INAPP_TOPIC: &str = "KAFKA_INAPP_TOPIC";
pub const KAFKA_PUSH_TOPIC: &str = "KAFKA_PUSH_TOPIC";
pub const KAFKA_FEEDBACK_TOPIC: &str = "KAFKA_FEEDBACK_TOPIC";
pub const KAFKA_CONSUMER_GROUP: &str = "KAFKA_CONSUMER_GROUP";
pub const KAFKA_SASL_ENABLED: &str = "KAFKA_SASL_ENABLED";
pub const KAFKA_SASL_USERNAME: &str = "KAFKA_SASL_USERNAME";
pub const KAFKA_SASL_PASSWORD: &str = "KAFKA_SASL_PASSWORD";
pub const KAFKA_SASL_MECHANISM: &str = "KAFKA_SASL_MECHANISM";
pub const KAFKA_AUTO_OFFSET_RESET: &str = "KAFKA_AUTO_OFFSET_RESET";
pub const KAFKA_ENABLE_AUTO_COMMIT: &str = "KAFKA_ENABLE_AUTO_COMMIT";
pub const KAFKA_SESSION_TIMEOUT_MS: &str = "KAFKA_SESSION_TIMEOUT_MS";

pub const EMAIL_API_KEY: &str = "EMAIL_API_KEY";
pub const EMAIL_API_SECRET: &str = "EMAIL_API_SECRET";
pub const EMAIL_SENDER_ADDRESS: &str = "EMAIL_SENDER_ADDRESS";
pub const EMAIL_SENDER_NAME: &str = "EMAIL_SENDER_NAME";

/// Bootstrap variables; read from the process environment only
pub const VAULT_ADDR: &str = "VAULT_ADDR";
pub const VAULT_TOKEN: &str = "VAULT_TOKEN";
pub const VAULT_PATH: &str = "VAULT_PATH";

pub mod defaults {
    pub const KAFKA_BROKERS: &str = "";
    pub const KAFKA_EMAIL_TOPIC: &str = "email-notifications";
    pub const KAFKA_SMS_TOPIC: &str = "sms-notifications";
    pub const KAFKA_INAPP_TOPIC: &str = "inapp-notifications";
    pub const KAFKA_PUSH_TOPIC: &str = "push-notifications";
    pub const KAFKA_FEEDBACK_TOPIC: &str = "feedback-notifications";
    pub const KAFKA_CONSUMER_GROUP: &str = "notification-service";
    pub const KAFKA_SASL_ENABLED: bool = false;
    pub const KAFKA_SASL_MECHANISM: &str = "PLAIN";
    pub const KAFKA_AUTO_OFFSET_RESET: &str = "earliest";
    pub const KAFKA_ENABLE_AUTO_COMMIT: bool = true;
    pub const KAFKA_SESSION_TIMEOUT_MS: u64 = 10_000;
}

/// Every key the resolver looks up, in resolution order
pub const ALL: &[&str] = &[
    KAFKA_BROKERS,
    KAFKA_EMAIL_TOPIC,
    KAFKA_SMS_TOPIC,
    KAFKA_INAPP_TOPIC,
    KAFKA_PUSH_TOPIC,
    KAFKA_FEEDBACK_TOPIC,
    KAFKA_CONSUMER_GROUP,
    KAFKA_SASL_ENABLED,
    KAFKA_SASL_USERNAME,
    KAFKA_SASL_PASSWORD,
    KAFKA_SASL_MECHANISM,
    KAFKA_AUTO_OFFSET_RESET,
    KAFKA_ENABLE_AUTO_COMMIT,
    KAFKA_SESSION_TIMEOUT_MS,
    EMAIL_API_KEY,
    EMAIL_API_SECRET,
    EMAIL_SENDER_ADDRESS,
    EMAIL_SENDER_NAME,
];
