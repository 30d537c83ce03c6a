//! HashiCorp Vault secret store
//!
//! Reads one secret path once, at construction, and serves every later lookup
//! from the cached map. There is no refresh: notification settings change at
//! deploy time, so a restart picks up new values.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;

use super::traits::SecretStore;

/// Upper bound on the single startup read
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the Vault access token
const TOKEN_HEADER: &str = "X-Vault-Token";

/// Errors raised while building the Vault secret cache
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("failed to create Vault client: {0}")]
    ClientBuild(String),

    #[error("failed to read secrets from Vault path {path}: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read secrets from Vault path {path}: HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("no secrets found at path: {path}")]
    NoSecrets { path: String },

    #[error("invalid secret data format at path: {path}")]
    InvalidSecretFormat { path: String },
}

pub type VaultResult<T> = Result<T, VaultError>;

/// Connection parameters for the secret read
#[derive(Clone, PartialEq, Eq)]
pub struct VaultSettings {
    /// Base address, e.g. `https://vault.internal:8200`
    pub address: String,
    /// Access token sent as `X-Vault-Token`
    pub token: String,
    /// Logical path to read, e.g. `secret/data/notifications`
    pub path: String,
}

impl VaultSettings {
    pub fn new(
        address: impl Into<String>,
        token: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            token: token.into(),
            path: path.into(),
        }
    }

    /// Full URL of the logical read (`{address}/v1/{path}`)
    pub fn secret_url(&self) -> VaultResult<Url> {
        let raw = format!(
            "{}/v1/{}",
            self.address.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|e| VaultError::ClientBuild(format!("invalid address {:?}: {}", self.address, e)))
    }
}

impl std::fmt::Debug for VaultSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSettings")
            .field("address", &self.address)
            .field("token", &"<redacted>")
            .field("path", &self.path)
            .finish()
    }
}

/// Read-only secret store backed by a one-time Vault read
///
/// # Example
///
/// ```rust,ignore
/// use courier_core::secrets::{SecretStore, VaultSecretStore, VaultSettings};
///
/// let settings = VaultSettings::new("https://vault:8200", token, "secret/data/notifications");
/// let vault = VaultSecretStore::connect(&settings).await?;
/// let brokers = vault.get("KAFKA_BROKERS");
/// ```
pub struct VaultSecretStore {
    path: String,
    secrets: HashMap<String, String>,
}

impl VaultSecretStore {
    /// Authenticate with the token and fetch the secret path once
    pub async fn connect(settings: &VaultSettings) -> VaultResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| VaultError::ClientBuild(e.to_string()))?;
        Self::connect_with_client(settings, &client).await
    }

    /// Same as [`connect`](Self::connect) with a caller-supplied HTTP client
    pub async fn connect_with_client(settings: &VaultSettings, client: &Client) -> VaultResult<Self> {
        let url = settings.secret_url()?;
        let path = settings.path.clone();

        tracing::debug!(target: "courier::vault", path = %path, "reading secrets");

        let response = client
            .get(url)
            .header(TOKEN_HEADER, &settings.token)
            .send()
            .await
            .map_err(|source| VaultError::Request {
                path: path.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(VaultError::NoSecrets { path });
        }
        if !status.is_success() {
            return Err(VaultError::Status {
                path,
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|source| VaultError::Request {
            path: path.clone(),
            source,
        })?;

        let secrets = extract_secrets(&body, &path)?;
        tracing::debug!(target: "courier::vault", path = %path, keys = secrets.len(), "secrets cached");

        Ok(Self { path, secrets })
    }

    /// Build a store from an already-fetched map
    pub fn from_cache(path: impl Into<String>, secrets: HashMap<String, String>) -> Self {
        Self {
            path: path.into(),
            secrets,
        }
    }

    /// The Vault path this cache was read from
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of cached string secrets
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

/// Pull the nested `data.data` object out of a logical read response
///
/// Only string values are kept; anything else reads as absent.
pub fn extract_secrets(body: &Value, path: &str) -> VaultResult<HashMap<String, String>> {
    let outer = match body.get("data") {
        Some(Value::Null) | None => {
            return Err(VaultError::NoSecrets {
                path: path.to_string(),
            })
        }
        Some(outer) => outer,
    };

    let nested = outer
        .get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| VaultError::InvalidSecretFormat {
            path: path.to_string(),
        })?;

    if nested.is_empty() {
        return Err(VaultError::NoSecrets {
            path: path.to_string(),
        });
    }

    Ok(nested
        .iter()
        .filter_map(|(key, value)| value.as_str().map(|s| (key.clone(), s.to_string())))
        .collect())
}

impl SecretStore for VaultSecretStore {
    fn name(&self) -> &str {
        "vault"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.secrets.get(key).cloned()
    }
}

impl std::fmt::Debug for VaultSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSecretStore")
            .field("path", &self.path)
            .field("keys", &self.secrets.len())
            .finish()
    }
}
