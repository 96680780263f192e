//! Configuration loading from disk and the process environment.

use std::path::Path;
use std::fs;
use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `backend.url`.
pub const ENV_BACKEND_URL: &str = "SCLWS_BACKEND_URL";

/// Environment variable overriding `listener.bind_address`.
pub const ENV_BIND_ADDRESS: &str = "SCLWS_BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse configuration text without validating it.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Apply `SCLWS_*` environment overrides on top of a loaded configuration.
pub fn apply_env_overrides(config: &mut ProxyConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

fn apply_overrides<F>(config: &mut ProxyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.is_empty()) {
        config.backend.url = url;
    }
    if let Some(addr) = lookup(ENV_BIND_ADDRESS).filter(|v| !v.is_empty()) {
        config.listener.bind_address = addr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"
            path = "/sclws/getstar"

            [backend]
            url = "http://127.0.0.1:6666"
            timeout_secs = 60

            [render]
            escape_html = false
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.listener.path, "/sclws/getstar");
        assert_eq!(config.backend.timeout_secs, 60);
        assert!(!config.render.escape_html);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[backend\nurl = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError::MaxConnections,
            ValidationError::MaxResponseBytes,
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: listener.max_connections must be greater than zero, \
             backend.max_response_bytes must be greater than zero"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/sclws-proxy.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BACKEND_URL, "http://10.1.1.1:7079"),
            (ENV_BIND_ADDRESS, ""),
        ]
        .into_iter()
        .collect();

        let mut config = ProxyConfig::default();
        apply_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.backend.url, "http://10.1.1.1:7079");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
