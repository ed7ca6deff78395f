//! Environment-driven configuration shared by the workspace crates.
//!
//! Clients read their settings through [`FromEnv`] and the `env_*` helpers so
//! that missing or malformed variables surface as a typed [`ConfigError`]
//! instead of a panic deep inside a request path.

pub mod tracing;

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },

    #[error("Invalid value for '{key}': {details}")]
    InvalidValue { key: String, details: String },
}

/// Runtime environment, selects log format and verbosity
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Reads `APP_ENV`; anything other than `production` is development.
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Read a variable, falling back to `default` when unset
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a variable or fail with [`ConfigError::MissingEnvVar`]
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Read an optional variable; empty or whitespace-only values count as unset
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a variable into `T`, using `default` when the variable is unset.
///
/// A set-but-unparseable value is an error rather than a silent fallback.
pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env_optional(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Validate that `value` is an `http://` or `https://` URL
pub fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            details: "must start with http:// or https://".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("Production"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });
    }

    #[test]
    fn test_env_or_default_without_value() {
        temp_env::with_var_unset("QDRANT_TEST_MISSING", || {
            let result = env_or_default("QDRANT_TEST_MISSING", "fallback");
            assert_eq!(result, "fallback");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("QDRANT_TEST_REQUIRED", || {
            let err = env_required("QDRANT_TEST_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("QDRANT_TEST_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_optional_treats_blank_as_unset() {
        temp_env::with_var("QDRANT_TEST_BLANK", Some("   "), || {
            assert_eq!(env_optional("QDRANT_TEST_BLANK"), None);
        });
    }

    #[test]
    fn test_env_parse_uses_default_when_unset() {
        temp_env::with_var_unset("QDRANT_TEST_TIMEOUT", || {
            assert_eq!(env_parse("QDRANT_TEST_TIMEOUT", 30u64), Ok(30));
        });
    }

    #[test]
    fn test_env_parse_reads_value() {
        temp_env::with_var("QDRANT_TEST_TIMEOUT", Some(" 5 "), || {
            assert_eq!(env_parse("QDRANT_TEST_TIMEOUT", 30u64), Ok(5));
        });
    }

    #[test]
    fn test_env_parse_rejects_garbage() {
        temp_env::with_var("QDRANT_TEST_TIMEOUT", Some("soon"), || {
            let err = env_parse("QDRANT_TEST_TIMEOUT", 30u64).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "QDRANT_TEST_TIMEOUT"));
        });
    }

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("QDRANT_URL", "http://localhost:6333").is_ok());
        assert!(validate_http_url("QDRANT_URL", "https://cloud.example").is_ok());
        assert!(validate_http_url("QDRANT_URL", "localhost:6333").is_err());
    }
}
