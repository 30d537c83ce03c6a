//! In-memory secret store

use std::collections::HashMap;

use super::traits::SecretStore;

/// Fixed set of values held in memory
///
/// Stands in for Vault in tests, or sits in front of the environment as an
/// override layer in a chain. The contents are set at construction.
///
/// # Example
///
/// ```
/// use courier_core::secrets::{SecretStore, MemorySecretStore};
///
/// let store = MemorySecretStore::from_pairs([("KAFKA_SMS_TOPIC", "sms-test")]);
/// assert_eq!(store.get("KAFKA_SMS_TOPIC"), Some("sms-test".to_string()));
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemorySecretStore {
    secrets: HashMap<String, String>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secrets(secrets: HashMap<String, String>) -> Self {
        Self { secrets }
    }

    /// Build a store from key/value pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_secrets(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl SecretStore for MemorySecretStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.secrets.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_name() {
        let store = MemorySecretStore::new();
        assert_eq!(store.name(), "memory");
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_from_pairs() {
        let store = MemorySecretStore::from_pairs([
            ("KAFKA_BROKERS", "b1:9092"),
            ("KAFKA_SASL_ENABLED", "true"),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("KAFKA_BROKERS"), Some("b1:9092".to_string()));
        assert_eq!(store.get("KAFKA_SASL_ENABLED"), Some("true".to_string()));
        assert!(store.has("KAFKA_BROKERS"));
        assert!(!store.has("KAFKA_SMS_TOPIC"));
    }

    #[test]
    fn test_memory_store_keeps_empty_values() {
        // The chain decides that empty means unset, not the store.
        let store = MemorySecretStore::from_pairs([("KAFKA_SMS_TOPIC", "")]);
        assert_eq!(store.get("KAFKA_SMS_TOPIC"), Some(String::new()));
    }
}
