//! Configuration types.
//!
//! ```toml
//! [client]
//! api_url = "https://api.relu.work/v1"
//! timeout_secs = 60
//!
//! [admin]
//! admin_api_key = "relu_admin_..."
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReluConfig {
    /// Client connection settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientSection>,

    /// Platform administration settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminSection>,
}

impl ReluConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    ///
    /// Fields are merged one by one, so a project file that only sets
    /// `timeout_secs` keeps the user file's `api_url`.
    pub fn merge(&mut self, other: ReluConfig) {
        if let Some(client) = other.client {
            match &mut self.client {
                Some(existing) => existing.merge(client),
                None => self.client = Some(client),
            }
        }

        if let Some(admin) = other.admin {
            match &mut self.admin {
                Some(existing) => existing.merge(admin),
                None => self.admin = Some(admin),
            }
        }
    }

    /// Store a newly generated admin key, replacing any previous value.
    pub fn set_admin_api_key(&mut self, key: impl Into<String>) {
        self.admin.get_or_insert_with(AdminSection::default).admin_api_key = Some(key.into());
    }

    /// The stored admin key, if any.
    pub fn admin_api_key(&self) -> Option<&str> {
        self.admin.as_ref()?.admin_api_key.as_deref()
    }

    /// Client section, or defaults if absent.
    pub fn client_or_default(&self) -> ClientSection {
        self.client.clone().unwrap_or_default()
    }
}

/// Client connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSection {
    /// API base URL; the SDK's production URL when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// API key. Prefer the `RELU_API_KEY` environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Custom user agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl ClientSection {
    fn merge(&mut self, other: ClientSection) {
        if other.api_url.is_some() {
            self.api_url = other.api_url;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent;
        }
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Whether the section stores an API key in plaintext.
    pub fn has_plaintext_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Platform administration settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSection {
    /// Admin API key generated during setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_api_key: Option<String>,
}

impl AdminSection {
    fn merge(&mut self, other: AdminSection) {
        if other.admin_api_key.is_some() {
            self.admin_api_key = other.admin_api_key;
        }
    }
}
