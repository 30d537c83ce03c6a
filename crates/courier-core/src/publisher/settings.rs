//! Producer client properties derived from the resolved configuration

use crate::config::KafkaConfig;

/// Client id reported to the brokers
pub const CLIENT_ID: &str = "courier-notification-producer";

/// librdkafka properties for the notification producer
///
/// Computed without touching the network so the exact property set can be
/// checked in isolation.
#[derive(Clone, PartialEq, Eq)]
pub struct ProducerSettings {
    entries: Vec<(&'static str, String)>,
}

impl ProducerSettings {
    /// Build the property set for `brokers` (already trimmed) under `config`
    pub fn from_config(config: &KafkaConfig, brokers: &[String]) -> Self {
        let mut entries: Vec<(&'static str, String)> = vec![
            ("bootstrap.servers", brokers.join(",")),
            ("client.id", CLIENT_ID.to_string()),
            // Every in-sync replica must acknowledge
            ("acks", "all".to_string()),
            ("compression.type", "snappy".to_string()),
            ("linger.ms", "500".to_string()),
            ("partitioner", "random".to_string()),
            ("retries", "3".to_string()),
            ("message.timeout.ms", "30000".to_string()),
        ];

        if config.sasl_enabled {
            entries.push(("security.protocol", "SASL_PLAINTEXT".to_string()));
            entries.push(("sasl.mechanism", config.sasl_mechanism.clone()));
            entries.push(("sasl.username", config.sasl_username.clone()));
            entries.push(("sasl.password", config.sasl_password.clone()));
        }

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl std::fmt::Debug for ProducerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.iter() {
            if key == "sasl.password" {
                map.entry(&key, &"<redacted>");
            } else {
                map.entry(&key, &value);
            }
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brokers(config: &KafkaConfig) -> Vec<String> {
        config.broker_list()
    }

    #[test]
    fn test_base_properties() {
        let config = KafkaConfig {
            brokers: "b1:9092, b2:9092".to_string(),
            ..KafkaConfig::default()
        };
        let settings = ProducerSettings::from_config(&config, &brokers(&config));

        assert_eq!(settings.get("bootstrap.servers"), Some("b1:9092,b2:9092"));
        assert_eq!(settings.get("acks"), Some("all"));
        assert_eq!(settings.get("compression.type"), Some("snappy"));
        assert_eq!(settings.get("linger.ms"), Some("500"));
        assert_eq!(settings.get("partitioner"), Some("random"));
        assert_eq!(settings.get("retries"), Some("3"));
    }

    #[test]
    fn test_no_credentials_without_sasl() {
        let config = KafkaConfig {
            brokers: "b1:9092".to_string(),
            sasl_username: "ignored".to_string(),
            sasl_password: "ignored".to_string(),
            ..KafkaConfig::default()
        };
        let settings = ProducerSettings::from_config(&config, &brokers(&config));

        assert!(settings.iter().all(|(key, _)| !key.starts_with("sasl.")));
        assert_eq!(settings.get("security.protocol"), None);
    }

    #[test]
    fn test_sasl_properties() {
        let config = KafkaConfig {
            brokers: "b1:9092".to_string(),
            sasl_enabled: true,
            sasl_username: "notifier".to_string(),
            sasl_password: "pw".to_string(),
            sasl_mechanism: "SCRAM-SHA-256".to_string(),
            ..KafkaConfig::default()
        };
        let settings = ProducerSettings::from_config(&config, &brokers(&config));

        assert_eq!(settings.get("security.protocol"), Some("SASL_PLAINTEXT"));
        assert_eq!(settings.get("sasl.mechanism"), Some("SCRAM-SHA-256"));
        assert_eq!(settings.get("sasl.username"), Some("notifier"));
        assert_eq!(settings.get("sasl.password"), Some("pw"));

        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("\"pw\""));
    }
}
