//! Environment-driven configuration for the API server.

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server and platform settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// TCP port to listen on (`PORT`)
    pub port: u16,

    /// Deployment environment reported by the health check (`APP_ENV`)
    pub environment: String,

    /// Whether clients can receive share payloads (`BMI_SHARE_ENABLED`)
    pub share_enabled: bool,

    /// Whether clients can receive clipboard payloads (`BMI_CLIPBOARD_ENABLED`)
    pub clipboard_enabled: bool,

    /// Open the form with the sample record (`BMI_PREFILL_SAMPLE`)
    pub prefill_sample: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: "development".to_string(),
            share_enabled: true,
            clipboard_enabled: true,
            prefill_sample: true,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                name: "PORT",
                value: value.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.port,
        };

        Ok(Self {
            port,
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
            share_enabled: parse_flag(&lookup, "BMI_SHARE_ENABLED", defaults.share_enabled)?,
            clipboard_enabled: parse_flag(&lookup, "BMI_CLIPBOARD_ENABLED", defaults.clipboard_enabled)?,
            prefill_sample: parse_flag(&lookup, "BMI_PREFILL_SAMPLE", defaults.prefill_sample)?,
        })
    }
}

fn parse_flag<F>(lookup: &F, name: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(default);
    };

    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value,
            reason: "expected true/false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("APP_ENV", "production"),
            ("BMI_SHARE_ENABLED", "false"),
            ("BMI_CLIPBOARD_ENABLED", "0"),
            ("BMI_PREFILL_SAMPLE", "No"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "production");
        assert!(!config.share_enabled);
        assert!(!config.clipboard_enabled);
        assert!(!config.prefill_sample);
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_flag() {
        let err = AppConfig::from_lookup(lookup_from(&[("BMI_SHARE_ENABLED", "maybe")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "BMI_SHARE_ENABLED",
                value: "maybe".to_string(),
                reason: "expected true/false".to_string(),
            }
        );
    }
}
