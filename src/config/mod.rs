//! Handler configuration.
//!
//! [`HandlerOptions`] carries the single recognized option, `production`.
//! It can be built directly, deserialized, or read from a
//! [`ConfigService`] backed by environment variables.

use dashmap::DashMap;
use serde::Deserialize;
use std::env;
use std::sync::Arc;

/// Environment key consulted by [`HandlerOptions::from_config`].
pub const PRODUCTION_KEY: &str = "ERROR_HANDLER_PRODUCTION";

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Create a service preloaded with the process environment.
    pub fn new() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// Options for an [`ErrorHandler`](crate::handler::ErrorHandler).
///
/// `production` defaults to `true`. Only an explicit `false` disables
/// message redaction; a missing field, a missing environment key or any
/// other value keeps it on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HandlerOptions {
    #[serde(default = "default_production")]
    pub production: bool,
}

fn default_production() -> bool {
    true
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            production: default_production(),
        }
    }
}

impl HandlerOptions {
    /// Options that expose error messages to clients.
    pub fn development() -> Self {
        Self { production: false }
    }

    /// Read options from a config service.
    ///
    /// Looks up [`PRODUCTION_KEY`]; only the literal `false` (trimmed,
    /// any case) turns production mode off.
    pub fn from_config(config: &ConfigService) -> Self {
        let production = match config.get(PRODUCTION_KEY) {
            Some(value) => !value.trim().eq_ignore_ascii_case("false"),
            None => true,
        };
        tracing::debug!(production, "loaded error handler options");
        Self { production }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_production() {
        assert!(HandlerOptions::default().production);
        assert!(!HandlerOptions::development().production);
    }

    #[test]
    fn test_from_config_only_false_disables() {
        let config = ConfigService::default();
        assert!(HandlerOptions::from_config(&config).production);

        for value in ["true", "0", "no", "", "off"] {
            config.set(PRODUCTION_KEY, value);
            assert!(HandlerOptions::from_config(&config).production, "{value:?}");
        }

        for value in ["false", "FALSE", " False "] {
            config.set(PRODUCTION_KEY, value);
            assert!(!HandlerOptions::from_config(&config).production, "{value:?}");
        }
    }

    #[test]
    fn test_deserialize_defaults_missing_field() {
        let options: HandlerOptions = serde_json::from_str("{}").unwrap();
        assert!(options.production);

        let options: HandlerOptions = serde_json::from_str(r#"{"production":false}"#).unwrap();
        assert!(!options.production);
    }

    #[test]
    fn test_config_service_set_get() {
        let config = ConfigService::default();
        assert_eq!(config.get("missing"), None);
        config.set("key", "value");
        assert_eq!(config.get("key").as_deref(), Some("value"));
    }
}
