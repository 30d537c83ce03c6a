//! Typed per-key lookups over the secret chain

use std::time::Duration;

use crate::secrets::ChainSecretStore;

/// Typed accessors with per-key fallback
///
/// Each accessor walks the chain's non-empty values for the key in layer
/// order and takes the first one that coerces to the wanted type. When none
/// does, the supplied default is returned. Lookups never fail.
#[derive(Debug)]
pub struct ConfigLookup {
    chain: ChainSecretStore,
}

impl ConfigLookup {
    pub fn new(chain: ChainSecretStore) -> Self {
        Self { chain }
    }

    pub fn chain(&self) -> &ChainSecretStore {
        &self.chain
    }

    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.first_parsed(key, |raw| Some(raw.to_string()))
            .unwrap_or_else(|| default.to_string())
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.first_parsed(key, parse_bool).unwrap_or(default)
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.first_parsed(key, |raw| raw.parse::<i64>().ok())
            .unwrap_or(default)
    }

    /// Millisecond count as a `Duration`; negative values do not parse
    pub fn get_duration_ms(&self, key: &str, default: Duration) -> Duration {
        self.first_parsed(key, |raw| raw.parse::<u64>().ok().map(Duration::from_millis))
            .unwrap_or(default)
    }

    fn first_parsed<T>(&self, key: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        for (source, raw) in self.chain.candidates(key) {
            match parse(&raw) {
                Some(value) => {
                    tracing::debug!(target: "courier::config", key, source, "resolved");
                    return Some(value);
                }
                None => {
                    tracing::debug!(target: "courier::config", key, source, "value did not parse, trying next source");
                }
            }
        }
        tracing::debug!(target: "courier::config", key, "using default");
        None
    }
}

/// Strict boolean parsing
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`; anything
/// else, including surrounding whitespace, is rejected.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
