//! Client configuration.
//!
//! Resolution is a three-tier overlay evaluated once at construction:
//! explicit overrides, then environment variables, then built-in defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NcaNodeError, NcaNodeResult};

/// Default base URL for the v1 endpoint family.
pub const DEFAULT_BASE_URL: &str = "http://localhost:14579";

/// Default base URL for the v2 endpoint family.
pub const DEFAULT_BASE_URL_V2: &str = "http://localhost:14578";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Environment variable overriding the v1 base URL.
pub const ENV_BASE_URL: &str = "NCANODE_BASE_URL";

/// Environment variable overriding the v2 base URL.
pub const ENV_BASE_URL_V2: &str = "NCANODE_BASE_URL_V2";

/// Environment variable overriding the timeout (seconds).
pub const ENV_TIMEOUT: &str = "NCANODE_TIMEOUT";

/// Resolved client configuration.
///
/// Carries serde derives so host applications can embed it in their own
/// configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for the v1 endpoint family
    pub base_url: String,

    /// Base URL for the v2 endpoint family
    pub base_url_v2: String,

    /// Request timeout in seconds, applied to every call
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            base_url_v2: DEFAULT_BASE_URL_V2.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Optional per-field overrides for [`ClientConfig::resolve`].
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub base_url_v2: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl ClientConfig {
    /// Resolve configuration from overrides, environment and defaults.
    ///
    /// Each field is taken from the first tier that provides it. The result
    /// is validated before it is returned.
    pub fn resolve(overrides: ConfigOverrides) -> NcaNodeResult<Self> {
        let defaults = ClientConfig::default();

        let timeout_seconds = match overrides.timeout_seconds {
            Some(timeout) => timeout,
            None => match env_value(ENV_TIMEOUT) {
                Some(raw) => raw.parse::<u64>().map_err(|_| {
                    NcaNodeError::Configuration(format!("Invalid {ENV_TIMEOUT} value: {raw}"))
                })?,
                None => defaults.timeout_seconds,
            },
        };

        let config = ClientConfig {
            base_url: overrides
                .base_url
                .or_else(|| env_value(ENV_BASE_URL))
                .unwrap_or(defaults.base_url),
            base_url_v2: overrides
                .base_url_v2
                .or_else(|| env_value(ENV_BASE_URL_V2))
                .unwrap_or(defaults.base_url_v2),
            timeout_seconds,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> NcaNodeResult<()> {
        for url in [&self.base_url, &self.base_url_v2] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(NcaNodeError::Configuration(format!(
                    "Base URL must start with http:// or https://, got: {url}"
                )));
            }
        }

        if self.timeout_seconds == 0 {
            return Err(NcaNodeError::Configuration(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The timeout as a [`Duration`] for the transport.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:14579");
        assert_eq!(config.base_url_v2, "http://localhost:14578");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_resolve_with_overrides() {
        let config = ClientConfig::resolve(ConfigOverrides {
            base_url: Some("http://a.com".to_string()),
            base_url_v2: Some("http://b.com".to_string()),
            timeout_seconds: Some(10),
        })
        .unwrap();

        assert_eq!(config.base_url, "http://a.com");
        assert_eq!(config.base_url_v2, "http://b.com");
        assert_eq!(config.timeout_seconds, 10);
    }

    // Environment tiers share process-global state, so the whole tier is
    // exercised in one test to keep the suite parallel-safe.
    #[test]
    fn test_resolve_environment_tier() {
        std::env::set_var(ENV_BASE_URL, "http://env.example");
        std::env::set_var(ENV_TIMEOUT, "5");

        let config = ClientConfig::resolve(ConfigOverrides::default()).unwrap();
        assert_eq!(config.base_url, "http://env.example");
        assert_eq!(config.base_url_v2, DEFAULT_BASE_URL_V2);
        assert_eq!(config.timeout_seconds, 5);

        // Explicit overrides beat the environment.
        let config = ClientConfig::resolve(ConfigOverrides {
            base_url: Some("http://explicit.example".to_string()),
            timeout_seconds: Some(7),
            ..ConfigOverrides::default()
        })
        .unwrap();
        assert_eq!(config.base_url, "http://explicit.example");
        assert_eq!(config.timeout_seconds, 7);

        std::env::set_var(ENV_TIMEOUT, "not-a-number");
        let err = ClientConfig::resolve(ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, NcaNodeError::Configuration(_)));

        std::env::remove_var(ENV_BASE_URL);
        std::env::remove_var(ENV_TIMEOUT);
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let config = ClientConfig {
            base_url: "ftp://localhost".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NcaNodeError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig {
            timeout_seconds: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NcaNodeError::Configuration(_))
        ));
    }

    #[test]
    fn test_timeout_duration() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_serialization() {
        let config = ClientConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
