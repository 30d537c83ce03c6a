//! Environment variable secret store

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::traits::SecretStore;

/// Alternate variable names accepted for a configuration key, tried in order
/// after the key itself.
static ENV_ALIASES: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("KAFKA_BROKERS", vec!["KAFKA_BOOTSTRAP_SERVERS"]);
    m
});

/// Secret store that reads from process environment variables
///
/// Empty variables count as unset so that an exported-but-blank variable
/// falls through to the compiled default. A key is read under its own name
/// first, then under any registered alias (`KAFKA_BROKERS` also accepts
/// `KAFKA_BOOTSTRAP_SERVERS`).
///
/// # Example
///
/// ```
/// use courier_core::secrets::{SecretStore, EnvSecretStore};
///
/// let store = EnvSecretStore::new();
/// let brokers = store.get("KAFKA_BROKERS");
/// # let _ = brokers;
/// ```
#[derive(Debug, Default)]
pub struct EnvSecretStore {
    _private: (), // Prevent direct construction, use new()
}

impl EnvSecretStore {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Get the alias variable names registered for a key
    pub fn aliases_for(key: &str) -> Option<&'static [&'static str]> {
        ENV_ALIASES.get(key).map(|v| v.as_slice())
    }

    fn read(name: &str) -> Option<String> {
        match env::var(name) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = Self::read(key) {
            return Some(value);
        }

        Self::aliases_for(key)?
            .iter()
            .find_map(|alias| Self::read(alias))
    }
}
