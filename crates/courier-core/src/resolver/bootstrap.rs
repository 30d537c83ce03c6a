//! Bootstrap values needed before any secret can be read

use crate::config::keys::{VAULT_ADDR, VAULT_PATH, VAULT_TOKEN};
use crate::secrets::VaultSettings;

use super::error::{ConfigError, ConfigResult};

/// Read `VAULT_ADDR`, `VAULT_TOKEN` and `VAULT_PATH` from the process environment
pub fn vault_settings_from_env() -> ConfigResult<VaultSettings> {
    vault_settings_with(|name| std::env::var(name).ok())
}

/// Same as [`vault_settings_from_env`] over an arbitrary lookup
///
/// Variables are checked in order; the first unset or empty one is reported.
pub fn vault_settings_with<F>(lookup: F) -> ConfigResult<VaultSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let require = |name: &'static str| {
        lookup(name)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingEnv(name))
    };

    let address = require(VAULT_ADDR)?;
    let token = require(VAULT_TOKEN)?;
    let path = require(VAULT_PATH)?;

    Ok(VaultSettings::new(address, token, path))
}
