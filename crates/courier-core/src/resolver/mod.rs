//! Configuration resolution
//!
//! Turns bootstrap variables plus the secret chain into a [`ResolvedConfig`].
//!
//! ```rust,ignore
//! let config = courier_core::resolver::load().await?;
//! let publisher = NotificationPublisher::new(config.kafka.clone(), logger)?;
//! ```
//!
//! [`ResolvedConfig`]: crate::config::ResolvedConfig

mod bootstrap;
mod config_resolver;
mod error;
mod lookup;

pub use bootstrap::{vault_settings_from_env, vault_settings_with};
pub use config_resolver::{load, ConfigResolver};
pub use error::{ConfigError, ConfigResult};
pub use lookup::{parse_bool, ConfigLookup};
