//! Secret lookup abstractions and implementations
//!
//! Configuration values are looked up through a layered chain of stores:
//! - `SecretStore` trait for implementing custom sources
//! - `VaultSecretStore`: write-once cache of one Vault secret path
//! - `EnvSecretStore`: process environment
//! - `MemorySecretStore`: in-memory, for tests and overrides
//! - `ChainSecretStore`: ordered fallback across stores

mod traits;
mod env_store;
mod memory_store;
mod chain_store;
mod vault_store;

pub use traits::SecretStore;
pub use env_store::EnvSecretStore;
pub use memory_store::MemorySecretStore;
pub use chain_store::ChainSecretStore;
pub use vault_store::{extract_secrets, VaultError, VaultResult, VaultSecretStore, VaultSettings};
