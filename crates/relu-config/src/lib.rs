//! Configuration system for the Relu SDK and CLI.
//!
//! Provides TOML-based configuration with:
//! - Client connection settings (`[client]`: API URL, key, timeout)
//! - The admin API key written by the setup step (`[admin]`)
//! - Config file layering (user config dir + project-local overrides)
//! - API key resolution (env var → config file)

pub mod discovery;
pub mod error;
pub mod secrets;
pub mod types;

pub use discovery::{
    LoadedConfig, load_config, load_config_file, load_config_with_options, save_config,
    user_config_dir, user_config_path,
};
pub use error::{ConfigError, Result};
pub use secrets::{API_KEY_ENV, API_URL_ENV, ResolvedSecret, SecretSource, resolve_api_key};
pub use types::*;
