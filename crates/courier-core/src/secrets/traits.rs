//! Read-only lookup over a configuration source

/// A key/value source of configuration secrets
///
/// Implementations:
/// - Vault secret cache (`VaultSecretStore`), fetched once at startup
/// - Process environment (`EnvSecretStore`)
/// - In-memory for testing (`MemorySecretStore`)
/// - Chained for fallback behavior (`ChainSecretStore`)
///
/// Sources are populated before the resolver reads them and never written
/// through this trait. A missing key is never an error: `get` returns `None`
/// and the caller falls through to the next source.
///
/// # Example
///
/// ```
/// use courier_core::secrets::{SecretStore, MemorySecretStore};
///
/// let store = MemorySecretStore::from_pairs([("KAFKA_BROKERS", "b1:9092")]);
/// assert_eq!(store.get("KAFKA_BROKERS").as_deref(), Some("b1:9092"));
/// assert!(!store.has("KAFKA_SMS_TOPIC"));
/// ```
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Check if this store can currently answer lookups
    fn is_available(&self) -> bool {
        true
    }

    /// Retrieve a secret by key
    fn get(&self, key: &str) -> Option<String>;

    /// Check if a secret exists
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
