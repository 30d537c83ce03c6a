//! Configuration-fatal errors

use thiserror::Error;

use crate::secrets::VaultError;

/// Errors that stop the resolver from being built
///
/// A missing or unparsable individual key is never one of these; it falls
/// through to the next layer and finally to the default.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),

    #[error(transparent)]
    Vault(#[from] VaultError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
