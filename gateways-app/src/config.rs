//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub settings_path: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()?;

        let settings_path = lookup("GATEWAYS_SETTINGS")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("GATEWAYS_SETTINGS environment variable is required"))?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("LOG_FORMAT must be `pretty` or `json`, got `{}`", other),
        };

        Ok(Self {
            port,
            settings_path,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("GATEWAYS_SETTINGS", "gateways.json")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.settings_path, PathBuf::from("gateways.json"));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_settings_path_required() {
        let err = config(&[]).unwrap_err();
        assert!(err.to_string().contains("GATEWAYS_SETTINGS"));
    }

    #[test]
    fn test_json_logs_and_port() {
        let config = config(&[
            ("GATEWAYS_SETTINGS", "/etc/gateways.json"),
            ("PORT", "8080"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_bad_log_format() {
        assert!(config(&[("GATEWAYS_SETTINGS", "x"), ("LOG_FORMAT", "xml")]).is_err());
    }
}
