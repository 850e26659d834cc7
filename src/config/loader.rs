//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::FeederConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `node.cli_path`.
pub const NODE_CLI_ENV_VAR: &str = "DEFI_CLI";

/// Environment variable supplying `quote.api_token`.
pub const QUOTE_TOKEN_ENV_VAR: &str = "FINNHUB_TOKEN";

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

/// Parse a TOML file without overrides or validation.
pub fn read_config_file(path: &Path) -> Result<FeederConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut FeederConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(NODE_CLI_ENV_VAR).filter(|v| !v.is_empty()) {
        config.node.cli_path = path;
    }
    if let Some(token) = lookup(QUOTE_TOKEN_ENV_VAR).filter(|v| !v.is_empty()) {
        config.quote.api_token = Some(token);
    }
}

/// Load configuration from an optional TOML file plus the process environment,
/// then validate it.
pub fn load_config(path: Option<&Path>) -> Result<FeederConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => FeederConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
