//! Chained secret store with fallback behavior

use std::sync::Arc;

use super::traits::SecretStore;

/// A secret store that layers several stores with fallback behavior
///
/// Reads try each available store in order and return the first non-empty
/// value. The resolver builds its source chain
/// as `[vault, env]`, with compiled defaults applied after the chain misses.
///
/// # Example
///
/// ```
/// use courier_core::secrets::{SecretStore, ChainSecretStore, EnvSecretStore, MemorySecretStore};
/// use std::sync::Arc;
///
/// let overrides = Arc::new(MemorySecretStore::from_pairs([("KAFKA_SMS_TOPIC", "sms-staging")]));
/// let env = Arc::new(EnvSecretStore::new());
///
/// // Try overrides first, then fall back to env
/// let chain = ChainSecretStore::new(vec![overrides, env]);
/// assert_eq!(chain.get("KAFKA_SMS_TOPIC").as_deref(), Some("sms-staging"));
/// ```
pub struct ChainSecretStore {
    stores: Vec<Arc<dyn SecretStore>>,
}

impl ChainSecretStore {
    /// Create a new chain store; stores are tried in order for reads
    pub fn new(stores: Vec<Arc<dyn SecretStore>>) -> Self {
        Self { stores }
    }

    /// Every non-empty value held for `key`, in layer order, with the name of
    /// the store that held it
    ///
    /// Typed lookups walk this list so a value that fails to parse in one
    /// layer can still be satisfied by a later one.
    pub fn candidates<'a>(&'a self, key: &'a str) -> impl Iterator<Item = (&'a str, String)> + 'a {
        self.stores
            .iter()
            .filter(|store| store.is_available())
            .filter_map(move |store| {
                store
                    .get(key)
                    .filter(|value| !value.is_empty())
                    .map(|value| (store.name(), value))
            })
    }
}

impl SecretStore for ChainSecretStore {
    fn name(&self) -> &str {
        "chain"
    }

    fn is_available(&self) -> bool {
        self.stores.iter().any(|s| s.is_available())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.candidates(key).next().map(|(_, value)| value)
    }
}

// Implement Debug manually since Arc<dyn SecretStore> doesn't implement Debug
impl std::fmt::Debug for ChainSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stores.iter().map(|s| s.name()).collect();
        f.debug_struct("ChainSecretStore")
            .field("stores", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::MemorySecretStore;

    #[test]
    fn test_chain_store_name() {
        let store = ChainSecretStore::new(vec![Arc::new(MemorySecretStore::new())]);
        assert_eq!(store.name(), "chain");
    }

    #[test]
    fn test_chain_store_fallback() {
        let store1 = Arc::new(MemorySecretStore::new());
        let store2 = Arc::new(MemorySecretStore::from_pairs([("key", "from_store2")]));

        let chain = ChainSecretStore::new(vec![store1, store2]);

        assert_eq!(chain.get("key"), Some("from_store2".to_string()));
    }

    #[test]
    fn test_chain_store_priority() {
        let store1 = Arc::new(MemorySecretStore::from_pairs([("key", "from_store1")]));
        let store2 = Arc::new(MemorySecretStore::from_pairs([("key", "from_store2")]));

        let chain = ChainSecretStore::new(vec![store1, store2]);

        assert_eq!(chain.get("key"), Some("from_store1".to_string()));
    }

    #[test]
    fn test_chain_store_skips_empty_values() {
        let store1 = Arc::new(MemorySecretStore::from_pairs([("key", "")]));
        let store2 = Arc::new(MemorySecretStore::from_pairs([("key", "fallback")]));

        let chain = ChainSecretStore::new(vec![store1, store2]);

        assert_eq!(chain.get("key"), Some("fallback".to_string()));
    }

    #[test]
    fn test_chain_store_candidates_in_order() {
        let store1 = Arc::new(MemorySecretStore::from_pairs([("flag", "maybe")]));
        let store2 = Arc::new(MemorySecretStore::from_pairs([("flag", "true")]));

        let chain = ChainSecretStore::new(vec![store1, store2]);
        let values: Vec<String> = chain.candidates("flag").map(|(_, v)| v).collect();

        assert_eq!(values, vec!["maybe".to_string(), "true".to_string()]);
    }

    #[test]
    fn test_empty_chain_finds_nothing() {
        let chain = ChainSecretStore::new(vec![]);
        assert_eq!(chain.get("key"), None);
        assert!(!chain.is_available());
        assert_eq!(chain.candidates("key").count(), 0);
    }

    #[test]
    fn test_candidates_name_their_layer() {
        let store1 = Arc::new(MemorySecretStore::new());
        let store2 = Arc::new(MemorySecretStore::from_pairs([("key", "value")]));

        let chain = ChainSecretStore::new(vec![store1, store2]);
        let found: Vec<(&str, String)> = chain.candidates("key").collect();

        assert_eq!(found, vec![("memory", "value".to_string())]);
        assert!(chain.has("key"));
        assert!(!chain.has("nonexistent"));
    }

    #[test]
    fn test_chain_store_debug_lists_layers() {
        let chain = ChainSecretStore::new(vec![Arc::new(MemorySecretStore::new())]);
        assert!(format!("{:?}", chain).contains("memory"));
    }
}
