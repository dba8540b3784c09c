//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

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
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a configuration from a TOML file, apply environment overrides and
/// validate the result.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: GatewayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a configuration without a file: defaults plus environment
/// overrides, validated.
pub fn load_default_config() -> Result<GatewayConfig, ConfigError> {
    let mut config = GatewayConfig::default();
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Override the service base URLs from the environment.
///
/// Deployments commonly inject per-environment backend addresses this way
/// instead of templating the config file.
pub fn apply_env_overrides(config: &mut GatewayConfig) {
    override_from_env(&mut config.services.auth, "GATEWAY_AUTH_URL");
    override_from_env(&mut config.services.ledger, "GATEWAY_LEDGER_URL");
    override_from_env(&mut config.services.hr, "GATEWAY_HR_URL");
    override_from_env(&mut config.services.student, "GATEWAY_STUDENT_URL");
    override_from_env(&mut config.services.reporting, "GATEWAY_REPORTING_URL");
}

fn override_from_env(slot: &mut String, var: &str) {
    if let Ok(value) = std::env::var(var) {
        if !value.is_empty() {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_replaces_service_url() {
        std::env::set_var("GATEWAY_HR_URL", "http://hr.test:7001");

        let mut config = GatewayConfig::default();
        apply_env_overrides(&mut config);

        assert_eq!(config.services.hr, "http://hr.test:7001");
        assert_eq!(config.services.auth, "http://localhost:9092");

        std::env::remove_var("GATEWAY_HR_URL");
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        std::env::set_var("GATEWAY_REPORTING_URL", "");

        let mut config = GatewayConfig::default();
        apply_env_overrides(&mut config);

        assert_eq!(config.services.reporting, "http://localhost:9096");

        std::env::remove_var("GATEWAY_REPORTING_URL");
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = std::env::temp_dir();
        let path = dir.join("backoffice-gateway-broken-config-test.toml");
        fs::write(&path, "[services\nauth = ").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let _ = fs::remove_file(&path);
    }
}
