//! API key resolution.
//!
//! Resolution order:
//! 1. `RELU_API_KEY` environment variable
//! 2. Config file (with warning at load time)

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "RELU_API_KEY";

/// Environment variable overriding the API URL.
pub const API_URL_ENV: &str = "RELU_API_URL";

/// Result of API key resolution with provenance.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedSecret {
    /// The secret value.
    pub value: String,
    /// Where the secret was found.
    pub source: SecretSource,
}

impl std::fmt::Debug for ResolvedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSecret")
            .field("value", &"***")
            .field("source", &self.source)
            .finish()
    }
}

/// Where a secret was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// Environment variable.
    EnvVar(String),
    /// Config file (plaintext, not recommended).
    ConfigFile,
}

impl std::fmt::Display for SecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretSource::EnvVar(var) => write!(f, "env var {}", var),
            SecretSource::ConfigFile => write!(f, "config file (plaintext)"),
        }
    }
}

/// Resolve the API key from the environment, then the config file value.
pub fn resolve_api_key(config_value: Option<&str>) -> Option<ResolvedSecret> {
    resolve_from(std::env::var(API_KEY_ENV).ok(), config_value)
}

fn resolve_from(env_value: Option<String>, config_value: Option<&str>) -> Option<ResolvedSecret> {
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return Some(ResolvedSecret {
            value,
            source: SecretSource::EnvVar(API_KEY_ENV.to_string()),
        });
    }

    config_value
        .filter(|v| !v.is_empty())
        .map(|v| ResolvedSecret {
            value: v.to_string(),
            source: SecretSource::ConfigFile,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_wins_over_config() {
        let secret = resolve_from(Some("from-env".to_string()), Some("from-file")).unwrap();
        assert_eq!(secret.value, "from-env");
        assert_eq!(secret.source, SecretSource::EnvVar(API_KEY_ENV.to_string()));
    }

    #[test]
    fn test_config_fallback() {
        let secret = resolve_from(None, Some("from-file")).unwrap();
        assert_eq!(secret.source, SecretSource::ConfigFile);
    }

    #[test]
    fn test_empty_values_ignored() {
        assert!(resolve_from(Some(String::new()), Some("")).is_none());
        assert!(resolve_from(None, None).is_none());
    }

    #[test]
    fn test_debug_redacts_value() {
        let secret = resolve_from(None, Some("hunter2")).unwrap();
        assert!(!format!("{:?}", secret).contains("hunter2"));
        assert_eq!(secret.source.to_string(), "config file (plaintext)");
    }
}
