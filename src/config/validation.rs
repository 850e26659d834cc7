//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: FeederConfig → Result<(), Vec<ValidationError>>
//! - Runs after environment overrides, before the config is used

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::FeederConfig;
use crate::node::values::MAX_SYMBOL_LEN;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check the configuration for semantic errors.
pub fn validate_config(config: &FeederConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.node.cli_path.trim().is_empty() {
        errors.push(ValidationError::new("node.cli_path", "must not be empty"));
    }
    if config.node.poll_interval_secs == 0 {
        errors.push(ValidationError::new("node.poll_interval_secs", "must be > 0"));
    }

    if config.oracle.currency.trim().is_empty() {
        errors.push(ValidationError::new("oracle.currency", "must not be empty"));
    }
    if config.oracle.weightage == 0 {
        errors.push(ValidationError::new("oracle.weightage", "must be > 0"));
    }
    if config.oracle.address_count == 0 {
        errors.push(ValidationError::new("oracle.address_count", "must be > 0"));
    }
    if config.oracle.skip_interval == 0 {
        errors.push(ValidationError::new("oracle.skip_interval", "must be > 0"));
    }

    if !config.fixed.enabled && !config.quote.enabled {
        errors.push(ValidationError::new(
            "fixed.enabled",
            "at least one price provider must be enabled",
        ));
    }

    if config.fixed.enabled {
        let symbols: Vec<&str> = config.fixed.prices.iter().map(|p| p.symbol.as_str()).collect();
        check_symbols("fixed.prices", &symbols, &mut errors);

        for price in &config.fixed.prices {
            if !price.price.is_finite() || price.price < 0.0 {
                errors.push(ValidationError::new(
                    "fixed.prices",
                    format!("price for {} must be finite and non-negative", price.symbol),
                ));
            }
        }
    }

    if config.quote.enabled {
        let symbols: Vec<&str> = config.quote.symbols.iter().map(String::as_str).collect();
        check_symbols("quote.symbols", &symbols, &mut errors);

        if let Err(e) = url::Url::parse(&config.quote.base_url) {
            errors.push(ValidationError::new(
                "quote.base_url",
                format!("invalid URL: {e}"),
            ));
        }

        let has_token = config
            .quote
            .api_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if !has_token {
            errors.push(ValidationError::new(
                "quote.api_token",
                "required when the quote provider is enabled (set FINNHUB_TOKEN)",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_symbols(field: &str, symbols: &[&str], errors: &mut Vec<ValidationError>) {
    if symbols.is_empty() {
        errors.push(ValidationError::new(field, "must list at least one symbol"));
    }

    let mut seen = HashSet::new();
    for symbol in symbols {
        let len = symbol.chars().count();
        if len == 0 || len > MAX_SYMBOL_LEN {
            errors.push(ValidationError::new(
                field,
                format!("symbol {symbol:?} must be 1-{MAX_SYMBOL_LEN} characters"),
            ));
        }
        if !seen.insert(*symbol) {
            errors.push(ValidationError::new(
                field,
                format!("duplicate symbol {symbol:?}"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::FixedPrice;

    fn valid_config() -> FeederConfig {
        let mut config = FeederConfig::default();
        config.quote.api_token = Some("token".into());
        config
    }

    fn fields(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_defaults_with_token_are_valid() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let errors = validate_config(&FeederConfig::default()).unwrap_err();
        assert_eq!(fields(&errors), vec!["quote.api_token"]);
    }

    #[test]
    fn test_missing_token_ok_when_quote_disabled() {
        let mut config = FeederConfig::default();
        config.quote.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.node.poll_interval_secs = 0;
        config.oracle.skip_interval = 0;
        config.fixed.prices = vec![
            FixedPrice::new("DFI", 1.0),
            FixedPrice::new("DFI", -2.0),
            FixedPrice::new("TOOLONGSYM", 1.0),
        ];
        config.quote.base_url = "not a url".into();

        let errors = validate_config(&config).unwrap_err();
        let fields = fields(&errors);

        assert!(fields.contains(&"node.poll_interval_secs"));
        assert!(fields.contains(&"oracle.skip_interval"));
        assert!(fields.contains(&"quote.base_url"));
        assert_eq!(fields.iter().filter(|f| **f == "fixed.prices").count(), 3);
    }

    #[test]
    fn test_requires_a_provider() {
        let mut config = valid_config();
        config.fixed.enabled = false;
        config.quote.enabled = false;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(fields(&errors), vec!["fixed.enabled"]);
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new("oracle.weightage", "must be > 0");
        assert_eq!(err.to_string(), "oracle.weightage: must be > 0");
    }
}
