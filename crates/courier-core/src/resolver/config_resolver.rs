//! Layered configuration resolution
//!
//! Every key is resolved independently against the source chain:
//! 1. Vault secret cache (read once at construction)
//! 2. Process environment
//! 3. Compiled default
//!
//! A miss, an empty value or a value that does not coerce at one layer falls
//! through to the next.

use std::sync::Arc;

use reqwest::Client;

use crate::config::keys::{self, defaults};
use crate::config::{EmailSenderConfig, KafkaConfig, ResolvedConfig};
use crate::secrets::{ChainSecretStore, EnvSecretStore, SecretStore, VaultSecretStore, VaultSettings};

use super::bootstrap::vault_settings_from_env;
use super::error::ConfigResult;
use super::lookup::ConfigLookup;

/// Builds a [`ResolvedConfig`] from a chain of secret stores
#[derive(Debug)]
pub struct ConfigResolver {
    lookup: ConfigLookup,
}

impl ConfigResolver {
    /// Bootstrap from `VAULT_*` variables and read the Vault path once
    pub async fn from_env() -> ConfigResult<Self> {
        let settings = vault_settings_from_env()?;
        Self::from_vault(&settings).await
    }

    /// Read the Vault path once and layer the environment behind it
    pub async fn from_vault(settings: &VaultSettings) -> ConfigResult<Self> {
        let vault = VaultSecretStore::connect(settings).await?;
        Ok(Self::over_vault(vault))
    }

    /// Same as [`from_vault`](Self::from_vault) with a caller-supplied HTTP client
    pub async fn from_vault_with_client(settings: &VaultSettings, client: &Client) -> ConfigResult<Self> {
        let vault = VaultSecretStore::connect_with_client(settings, client).await?;
        Ok(Self::over_vault(vault))
    }

    fn over_vault(vault: VaultSecretStore) -> Self {
        tracing::info!(target: "courier::config", path = vault.path(), keys = vault.len(), "loaded secrets from Vault");
        Self::with_stores(vec![Arc::new(vault), Arc::new(EnvSecretStore::new())])
    }

    /// Resolve over an arbitrary ordered list of stores
    pub fn with_stores(stores: Vec<Arc<dyn SecretStore>>) -> Self {
        Self {
            lookup: ConfigLookup::new(ChainSecretStore::new(stores)),
        }
    }

    pub fn lookup(&self) -> &ConfigLookup {
        &self.lookup
    }

    /// Produce the fully populated configuration
    pub fn resolve(&self) -> ResolvedConfig {
        ResolvedConfig {
            kafka: self.resolve_kafka(),
            email: self.resolve_email(),
        }
    }

    fn resolve_kafka(&self) -> KafkaConfig {
        let l = &self.lookup;
        KafkaConfig {
            brokers: l.get_string(keys::KAFKA_BROKERS, defaults::KAFKA_BROKERS),
            email_topic: l.get_string(keys::KAFKA_EMAIL_TOPIC, defaults::KAFKA_EMAIL_TOPIC),
            sms_topic: l.get_string(keys::KAFKA_SMS_TOPIC, defaults::KAFKA_SMS_TOPIC),
            inapp_topic: l.get_string(keys::KAFKA_INAPP_TOPIC, defaults::KAFKA_INAPP_TOPIC),
            push_topic: l.get_string(keys::KAFKA_PUSH_TOPIC, defaults::KAFKA_PUSH_TOPIC),
            feedback_topic: l.get_string(keys::KAFKA_FEEDBACK_TOPIC, defaults::KAFKA_FEEDBACK_TOPIC),
            consumer_group: l.get_string(keys::KAFKA_CONSUMER_GROUP, defaults::KAFKA_CONSUMER_GROUP),
            sasl_enabled: l.get_bool(keys::KAFKA_SASL_ENABLED, defaults::KAFKA_SASL_ENABLED),
            sasl_username: l.get_string(keys::KAFKA_SASL_USERNAME, ""),
            sasl_password: l.get_string(keys::KAFKA_SASL_PASSWORD, ""),
            sasl_mechanism: l.get_string(keys::KAFKA_SASL_MECHANISM, defaults::KAFKA_SASL_MECHANISM),
            auto_offset_reset: l.get_string(keys::KAFKA_AUTO_OFFSET_RESET, defaults::KAFKA_AUTO_OFFSET_RESET),
            enable_auto_commit: l.get_bool(keys::KAFKA_ENABLE_AUTO_COMMIT, defaults::KAFKA_ENABLE_AUTO_COMMIT),
            session_timeout: l.get_duration_ms(
                keys::KAFKA_SESSION_TIMEOUT_MS,
                std::time::Duration::from_millis(defaults::KAFKA_SESSION_TIMEOUT_MS),
            ),
        }
    }

    fn resolve_email(&self) -> EmailSenderConfig {
        let l = &self.lookup;
        EmailSenderConfig {
            api_key: l.get_string(keys::EMAIL_API_KEY, ""),
            api_secret: l.get_string(keys::EMAIL_API_SECRET, ""),
            sender_address: l.get_string(keys::EMAIL_SENDER_ADDRESS, ""),
            sender_name: l.get_string(keys::EMAIL_SENDER_NAME, ""),
        }
    }
}

/// Bootstrap from the environment, read Vault and resolve every key
pub async fn load() -> ConfigResult<ResolvedConfig> {
    Ok(ConfigResolver::from_env().await?.resolve())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ConfigError;
    use crate::secrets::{MemorySecretStore, VaultError};
    use std::collections::HashMap;
    use std::time::Duration;

    fn vault(pairs: &[(&str, &str)]) -> Arc<dyn SecretStore> {
        let secrets: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Arc::new(VaultSecretStore::from_cache("secret/data/notifications", secrets))
    }

    fn env(pairs: &[(&str, &str)]) -> Arc<dyn SecretStore> {
        Arc::new(MemorySecretStore::from_pairs(pairs.iter().copied()))
    }

    #[test]
    fn test_empty_sources_resolve_to_defaults() {
        let config = ConfigResolver::with_stores(Vec::new()).resolve();
        assert_eq!(config, ResolvedConfig::default());
    }

    #[test]
    fn test_vault_value_wins_per_key() {
        let resolver = ConfigResolver::with_stores(vec![
            vault(&[("KAFKA_BROKERS", "vault-b1:9092"), ("KAFKA_SMS_TOPIC", "sms-prod")]),
            env(&[("KAFKA_BROKERS", "env-b1:9092"), ("KAFKA_PUSH_TOPIC", "push-env")]),
        ]);
        let kafka = resolver.resolve().kafka;

        assert_eq!(kafka.brokers, "vault-b1:9092");
        assert_eq!(kafka.sms_topic, "sms-prod");
        assert_eq!(kafka.push_topic, "push-env");
        assert_eq!(kafka.email_topic, "email-notifications");
    }

    #[test]
    fn test_unparsable_vault_bool_falls_back() {
        let resolver = ConfigResolver::with_stores(vec![
            vault(&[("KAFKA_SASL_ENABLED", "yes"), ("KAFKA_ENABLE_AUTO_COMMIT", "nope")]),
            env(&[("KAFKA_SASL_ENABLED", "true")]),
        ]);
        let kafka = resolver.resolve().kafka;

        assert!(kafka.sasl_enabled);
        assert!(kafka.enable_auto_commit);
    }

    #[test]
    fn test_session_timeout() {
        let config = ConfigResolver::with_stores(vec![vault(&[("KAFKA_SESSION_TIMEOUT_MS", "45000")])]).resolve();
        assert_eq!(config.kafka.session_timeout, Duration::from_millis(45_000));

        let config = ConfigResolver::with_stores(vec![vault(&[("KAFKA_SESSION_TIMEOUT_MS", "-5")])]).resolve();
        assert_eq!(config.kafka.session_timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn test_sasl_and_email_fields() {
        let config = ConfigResolver::with_stores(vec![vault(&[
            ("KAFKA_SASL_ENABLED", "1"),
            ("KAFKA_SASL_USERNAME", "notifier"),
            ("KAFKA_SASL_PASSWORD", "pw"),
            ("KAFKA_SASL_MECHANISM", "SCRAM-SHA-512"),
            ("EMAIL_API_KEY", "key"),
            ("EMAIL_API_SECRET", "secret"),
            ("EMAIL_SENDER_ADDRESS", "no-reply@example.com"),
            ("EMAIL_SENDER_NAME", "Example"),
        ])])
        .resolve();

        assert!(config.kafka.sasl_enabled);
        assert_eq!(config.kafka.sasl_username, "notifier");
        assert_eq!(config.kafka.sasl_password, "pw");
        assert_eq!(config.kafka.sasl_mechanism, "SCRAM-SHA-512");
        assert_eq!(config.email.api_key, "key");
        assert_eq!(config.email.api_secret, "secret");
        assert_eq!(config.email.sender_address, "no-reply@example.com");
        assert_eq!(config.email.sender_name, "Example");
    }

    #[tokio::test]
    async fn test_unparsable_vault_address_is_client_build() {
        let settings = VaultSettings::new("::not a url::", "t", "secret/data/notifications");
        let err = ConfigResolver::from_vault(&settings).await.unwrap_err();
        assert!(matches!(err, ConfigError::Vault(VaultError::ClientBuild(_))));
    }
}
